//! `HealthDataSource` trait, daily health data model and a reqwest-based bridge client.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

pub mod config;
pub mod http_client;
pub mod payload;
pub mod session;
pub mod utils;

#[derive(Debug, Error)]
pub enum HealthError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("bridge responded with {status}: {message}")]
    Api { status: u16, message: String },
    #[error("malformed health data: {0}")]
    Decode(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("session expired; re-authenticate before fetching")]
    SessionExpired,
}

impl HealthError {
    /// Build an error for a non-success status that has no dedicated variant.
    pub fn from_status(status: u16, message: String) -> Self {
        HealthError::Api { status, message }
    }
}

/// One day of health metrics as produced by the data source.
#[derive(Clone, Debug, PartialEq)]
pub struct HealthRecord {
    pub date: NaiveDate,
    pub sleep_score: Option<u32>,
    pub sleep_start_time: Option<String>,
    pub sleep_end_time: Option<String>,
    pub exercises: Vec<ExerciseEntry>,
}

impl HealthRecord {
    /// A record carrying no metrics for `date`.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            sleep_score: None,
            sleep_start_time: None,
            sleep_end_time: None,
            exercises: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExerciseEntry {
    pub activity_type: String,
    /// Local time of day, e.g. `07:00`.
    pub start_time: String,
    /// Raw duration as reported; rounding happens only when rendering.
    pub duration_seconds: f64,
    pub calories: Option<f64>,
    pub distance_km: Option<f64>,
}

/// Body of the bridge's `/health` endpoint.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ServiceStatus {
    pub status: String,
    pub message: Option<String>,
}

impl ServiceStatus {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

#[async_trait]
pub trait HealthDataSource: Send + Sync + 'static {
    /// Fetch the metrics recorded for a single calendar date.
    ///
    /// Implementations must not log in implicitly; an expired session is reported as
    /// [`HealthError::SessionExpired`].
    async fn fetch_health_record(&self, date: NaiveDate) -> Result<HealthRecord, HealthError>;

    /// Probe the data source without fetching any metrics.
    async fn check_connection(&self) -> Result<ServiceStatus, HealthError>;

    /// Whether the current session must be refreshed before the next fetch.
    async fn session_expired(&self) -> bool;

    /// Establish a fresh session.
    async fn reauthenticate(&self) -> Result<(), HealthError>;
}
