//! Error types for the note sync.

use std::path::PathBuf;

use thiserror::Error;

/// Note sync errors.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] garmin_bridge_client::HealthError),

    #[error("vault error at {}: {source}", path.display())]
    Vault {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SyncError {
    pub fn vault(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SyncError::Vault {
            path: path.into(),
            source,
        }
    }
}

impl From<SyncError> for String {
    fn from(err: SyncError) -> Self {
        err.to_string()
    }
}

/// Result type alias for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vault_error_names_the_path() {
        let err = SyncError::vault(
            "/vault/2025/June/June  27  2025.md",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("June  27  2025.md"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn fetch_error_converts_from_health_error() {
        let err: SyncError = garmin_bridge_client::HealthError::SessionExpired.into();
        assert!(matches!(err, SyncError::Fetch(_)));
        let s: String = err.into();
        assert!(s.starts_with("fetch failed"));
    }
}
