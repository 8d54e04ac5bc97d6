//! Sync driver: fetch a day's metrics and merge them into its daily note.
//!
//! Dates are processed one at a time. A failed date is recorded and the batch
//! moves on; nothing is retried.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use garmin_bridge_client::HealthDataSource;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::SyncResult;
use crate::merge::{MergeAction, merge_section};
use crate::render::render_section;
use crate::vault::{VaultStore, resolve_path};

/// Result of writing one daily note.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NoteUpdate {
    pub date: NaiveDate,
    pub path: PathBuf,
    pub action: MergeAction,
    pub exercises: usize,
}

/// Terminal status of one date in a batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DateOutcome {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub status: DateStatus,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DateStatus {
    Synced {
        path: PathBuf,
        action: MergeAction,
    },
    Failed {
        error: String,
    },
}

impl DateOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, DateStatus::Synced { .. })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub outcomes: Vec<DateOutcome>,
}

impl BatchReport {
    pub fn successful(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.successful()
    }

    pub fn failures(&self) -> impl Iterator<Item = (NaiveDate, &str)> {
        self.outcomes.iter().filter_map(|o| match &o.status {
            DateStatus::Failed { error } => Some((o.date, error.as_str())),
            DateStatus::Synced { .. } => None,
        })
    }
}

pub struct NoteSyncer {
    source: Arc<dyn HealthDataSource>,
    vault: Arc<dyn VaultStore>,
    vault_root: PathBuf,
    cooldown: Duration,
}

impl NoteSyncer {
    pub fn new(
        source: Arc<dyn HealthDataSource>,
        vault: Arc<dyn VaultStore>,
        vault_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source,
            vault,
            vault_root: vault_root.into(),
            cooldown: Duration::from_millis(crate::config::DEFAULT_COOLDOWN_MS),
        }
    }

    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Fetch `date` and merge its data section into the daily note.
    pub async fn sync_date(&self, date: NaiveDate) -> SyncResult<NoteUpdate> {
        if self.source.session_expired().await {
            info!("session expired; re-authenticating");
            self.source.reauthenticate().await?;
        }

        let record = self.source.fetch_health_record(date).await?;
        info!(
            %date,
            sleep_score = ?record.sleep_score,
            exercises = record.exercises.len(),
            "fetched health record"
        );

        let path = resolve_path(&self.vault_root, date);
        if let Some(parent) = path.parent() {
            self.vault.create_dir_all(parent).await?;
        }

        let existing = if self.vault.note_exists(&path).await? {
            Some(self.vault.read_note(&path).await?)
        } else {
            None
        };

        let section = render_section(&record);
        let merged = merge_section(existing.as_deref(), &section, date);
        self.vault.write_note(&path, &merged.content).await?;
        info!(%date, path = %path.display(), action = %merged.action, "daily note updated");

        Ok(NoteUpdate {
            date,
            path,
            action: merged.action,
            exercises: record.exercises.len(),
        })
    }

    /// Sync each date in order, pausing between dates.
    ///
    /// `on_outcome` sees every outcome as soon as its date is done.
    pub async fn sync_dates<F>(&self, dates: &[NaiveDate], mut on_outcome: F) -> BatchReport
    where
        F: FnMut(&DateOutcome),
    {
        let mut report = BatchReport::default();
        for (idx, &date) in dates.iter().enumerate() {
            let status = match self.sync_date(date).await {
                Ok(update) => {
                    metrics::counter!("garmin_notes_dates_total", "outcome" => "synced")
                        .increment(1);
                    DateStatus::Synced {
                        path: update.path,
                        action: update.action,
                    }
                }
                Err(e) => {
                    metrics::counter!("garmin_notes_dates_total", "outcome" => "failed")
                        .increment(1);
                    warn!(%date, error = %e, "sync failed");
                    DateStatus::Failed {
                        error: e.to_string(),
                    }
                }
            };
            let outcome = DateOutcome { date, status };
            on_outcome(&outcome);
            report.outcomes.push(outcome);

            if idx + 1 < dates.len() && !self.cooldown.is_zero() {
                tokio::time::sleep(self.cooldown).await;
            }
        }
        report
    }
}
