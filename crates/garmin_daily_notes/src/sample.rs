//! Built-in sample data for trying the sync without a running bridge.

use async_trait::async_trait;
use chrono::NaiveDate;
use garmin_bridge_client::{
    ExerciseEntry, HealthDataSource, HealthError, HealthRecord, ServiceStatus,
};

/// Data source returning the same sample day for every date.
#[derive(Clone, Copy, Debug, Default)]
pub struct SampleSource;

impl SampleSource {
    pub fn record_for(date: NaiveDate) -> HealthRecord {
        HealthRecord {
            date,
            sleep_score: Some(85),
            sleep_start_time: Some("22:30".into()),
            sleep_end_time: Some("06:45".into()),
            exercises: vec![
                ExerciseEntry {
                    activity_type: "Running".into(),
                    start_time: "07:00".into(),
                    duration_seconds: 1800.0,
                    calories: Some(245.0),
                    distance_km: Some(3.2),
                },
                ExerciseEntry {
                    activity_type: "Cycling".into(),
                    start_time: "18:30".into(),
                    duration_seconds: 2400.0,
                    calories: Some(180.0),
                    distance_km: Some(12.5),
                },
            ],
        }
    }
}

#[async_trait]
impl HealthDataSource for SampleSource {
    async fn fetch_health_record(&self, date: NaiveDate) -> Result<HealthRecord, HealthError> {
        Ok(Self::record_for(date))
    }

    async fn check_connection(&self) -> Result<ServiceStatus, HealthError> {
        Ok(ServiceStatus {
            status: "ok".into(),
            message: Some("sample data".into()),
        })
    }

    async fn session_expired(&self) -> bool {
        false
    }

    async fn reauthenticate(&self) -> Result<(), HealthError> {
        Ok(())
    }
}
