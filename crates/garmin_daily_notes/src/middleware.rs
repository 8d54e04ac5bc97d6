//! Logging wrapper around a [`HealthDataSource`].
//!
//! Keeps timing and failure logging out of the sync driver and out of the
//! concrete data sources.

use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;
use garmin_bridge_client::{HealthDataSource, HealthError, HealthRecord, ServiceStatus};
use tracing::debug;

/// Middleware wrapper for a data source that logs every call with its duration.
pub struct LoggingSource<S: HealthDataSource> {
    inner: Arc<S>,
}

impl<S: HealthDataSource> Clone for LoggingSource<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S: HealthDataSource> LoggingSource<S> {
    pub fn new(source: S) -> Self {
        Self {
            inner: Arc::new(source),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Execute a fallible operation with logging.
    async fn with_logging<F, Fut, T>(&self, operation: F, name: &str) -> Result<T, HealthError>
    where
        F: FnOnce(Arc<S>) -> Fut,
        Fut: std::future::Future<Output = Result<T, HealthError>>,
    {
        let start = Instant::now();
        debug!("Starting operation: {}", name);

        let result = operation(self.inner.clone()).await;

        let duration = start.elapsed();
        match &result {
            Ok(_) => debug!("Operation completed: {} in {:?}", name, duration),
            Err(e) => debug!("Operation failed: {} in {:?} - error: {}", name, duration, e),
        }

        result
    }
}

#[async_trait::async_trait]
impl<S: HealthDataSource> HealthDataSource for LoggingSource<S> {
    async fn fetch_health_record(&self, date: NaiveDate) -> Result<HealthRecord, HealthError> {
        self.with_logging(
            |source| async move { source.fetch_health_record(date).await },
            &format!("fetch_health_record({date})"),
        )
        .await
    }

    async fn check_connection(&self) -> Result<ServiceStatus, HealthError> {
        self.with_logging(
            |source| async move { source.check_connection().await },
            "check_connection",
        )
        .await
    }

    async fn session_expired(&self) -> bool {
        let expired = self.inner.session_expired().await;
        debug!(expired, "session check");
        expired
    }

    async fn reauthenticate(&self) -> Result<(), HealthError> {
        self.with_logging(
            |source| async move { source.reauthenticate().await },
            "reauthenticate",
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockSource;

    #[tokio::test]
    async fn logging_source_forwards_calls() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 27).unwrap();
        let source = LoggingSource::new(MockSource::new().with_record(HealthRecord::empty(date)));

        let rec = source.fetch_health_record(date).await.expect("record");
        assert_eq!(rec.date, date);
        assert!(source.check_connection().await.unwrap().is_ok());
        assert_eq!(source.inner().fetch_count(), 1);
    }

    #[tokio::test]
    async fn logging_source_passes_errors_through() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 27).unwrap();
        let source = LoggingSource::new(MockSource::new());
        let err = source.fetch_health_record(date).await.unwrap_err();
        assert!(matches!(err, HealthError::NotFound(_)));
    }
}
