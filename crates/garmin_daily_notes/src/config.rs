use std::path::PathBuf;
use std::time::Duration;

use crate::error::{SyncError, SyncResult};

pub const DEFAULT_COOLDOWN_MS: u64 = 1000;

/// Settings for writing notes into the vault.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncConfig {
    pub vault_root: PathBuf,
    /// Pause between consecutive dates of a batch.
    pub cooldown: Duration,
}

impl SyncConfig {
    pub fn new(vault_root: impl Into<PathBuf>) -> Self {
        Self {
            vault_root: vault_root.into(),
            cooldown: Duration::from_millis(DEFAULT_COOLDOWN_MS),
        }
    }

    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Read settings from the environment, letting explicit values win.
    pub fn from_env(vault: Option<PathBuf>, cooldown_ms: Option<u64>) -> SyncResult<Self> {
        Self::from_env_with(|k| std::env::var(k).ok(), vault, cooldown_ms)
    }

    /// Testable helper that reads configuration values using the provided
    /// function instead of the process environment.
    pub fn from_env_with<F>(
        mut get: F,
        vault: Option<PathBuf>,
        cooldown_ms: Option<u64>,
    ) -> SyncResult<Self>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let vault_root = vault
            .or_else(|| {
                get("GARMIN_NOTES_VAULT_PATH")
                    .filter(|s| !s.trim().is_empty())
                    .map(PathBuf::from)
            })
            .ok_or_else(|| {
                SyncError::Config("vault path missing: pass --vault or set GARMIN_NOTES_VAULT_PATH".into())
            })?;

        let cooldown_ms = match cooldown_ms {
            Some(ms) => ms,
            None => match get("GARMIN_NOTES_COOLDOWN_MS") {
                Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                    SyncError::Config(format!("invalid GARMIN_NOTES_COOLDOWN_MS: {raw}"))
                })?,
                None => DEFAULT_COOLDOWN_MS,
            },
        };

        Ok(Self {
            vault_root,
            cooldown: Duration::from_millis(cooldown_ms),
        })
    }
}
