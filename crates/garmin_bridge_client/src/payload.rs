//! Wire format of the bridge's `/garmin-data` response and its validation into
//! [`HealthRecord`](crate::HealthRecord).

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::warn;

use crate::{ExerciseEntry, HealthError, HealthRecord};

const DEFAULT_ACTIVITY_TYPE: &str = "Exercise";

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthPayload {
    pub date: Option<String>,
    pub sleep_score: Option<f64>,
    pub sleep_start_time: Option<String>,
    pub sleep_end_time: Option<String>,
    pub exercises: Option<Vec<ExercisePayload>>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExercisePayload {
    #[serde(rename = "type")]
    pub activity_type: Option<String>,
    pub start_time: Option<String>,
    pub duration: Option<f64>,
    pub calories: Option<f64>,
    pub distance: Option<f64>,
}

impl HealthPayload {
    /// Validate the payload for the date it was requested for.
    pub fn into_record(self, requested: NaiveDate) -> Result<HealthRecord, HealthError> {
        if let Some(raw) = self.date.as_deref().filter(|s| !s.trim().is_empty()) {
            let reported = crate::utils::parse_iso_date(raw)
                .map_err(|_| HealthError::Decode(format!("invalid date field: {raw}")))?;
            if reported != requested {
                return Err(HealthError::Decode(format!(
                    "requested {requested} but bridge returned {reported}"
                )));
            }
        }

        let sleep_score = self.sleep_score.and_then(|v| {
            if v.is_finite() && v >= 0.0 {
                Some(v.round() as u32)
            } else {
                warn!(date = %requested, value = v, "dropping invalid sleep score");
                None
            }
        });

        let exercises = self
            .exercises
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(idx, e)| e.into_entry(requested, idx))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(HealthRecord {
            date: requested,
            sleep_score,
            sleep_start_time: non_blank(self.sleep_start_time),
            sleep_end_time: non_blank(self.sleep_end_time),
            exercises,
        })
    }
}

impl ExercisePayload {
    fn into_entry(self, date: NaiveDate, idx: usize) -> Result<ExerciseEntry, HealthError> {
        let start_time = non_blank(self.start_time).ok_or_else(|| {
            HealthError::Decode(format!("exercise #{idx} on {date} has no startTime"))
        })?;

        let duration_seconds = match self.duration {
            None => 0.0,
            Some(v) if v.is_finite() && v >= 0.0 => v,
            Some(v) => {
                return Err(HealthError::Decode(format!(
                    "exercise #{idx} on {date} has invalid duration {v}"
                )));
            }
        };

        Ok(ExerciseEntry {
            activity_type: non_blank(self.activity_type)
                .unwrap_or_else(|| DEFAULT_ACTIVITY_TYPE.to_string()),
            start_time,
            duration_seconds,
            calories: non_negative(self.calories, "calories", date),
            distance_km: non_negative(self.distance, "distance", date),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn non_negative(value: Option<f64>, field: &str, date: NaiveDate) -> Option<f64> {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => Some(v),
        Some(v) => {
            warn!(%date, field, value = v, "dropping invalid exercise value");
            None
        }
        None => None,
    }
}
