//! Shared test doubles for the data source and vault collaborators.
#![cfg(test)]

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use garmin_bridge_client::{HealthDataSource, HealthError, HealthRecord, ServiceStatus};

use crate::error::{SyncError, SyncResult};
use crate::vault::VaultStore;

/// Data source serving canned records; dates without one fail with `NotFound`.
#[derive(Default)]
pub struct MockSource {
    records: HashMap<NaiveDate, HealthRecord>,
    failing: HashSet<NaiveDate>,
    expired: AtomicBool,
    fetches: AtomicUsize,
    logins: AtomicUsize,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(mut self, record: HealthRecord) -> Self {
        self.records.insert(record.date, record);
        self
    }

    pub fn failing_on(mut self, date: NaiveDate) -> Self {
        self.failing.insert(date);
        self
    }

    pub fn expired(self) -> Self {
        self.expired.store(true, Ordering::SeqCst);
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn login_count(&self) -> usize {
        self.logins.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HealthDataSource for MockSource {
    async fn fetch_health_record(&self, date: NaiveDate) -> Result<HealthRecord, HealthError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.expired.load(Ordering::SeqCst) {
            return Err(HealthError::SessionExpired);
        }
        if self.failing.contains(&date) {
            return Err(HealthError::from_status(500, "bridge exploded".into()));
        }
        self.records
            .get(&date)
            .cloned()
            .ok_or_else(|| HealthError::NotFound(format!("no data for {date}")))
    }

    async fn check_connection(&self) -> Result<ServiceStatus, HealthError> {
        Ok(ServiceStatus {
            status: "ok".into(),
            message: Some("mock".into()),
        })
    }

    async fn session_expired(&self) -> bool {
        self.expired.load(Ordering::SeqCst)
    }

    async fn reauthenticate(&self) -> Result<(), HealthError> {
        self.logins.fetch_add(1, Ordering::SeqCst);
        self.expired.store(false, Ordering::SeqCst);
        Ok(())
    }
}

/// In-memory vault.
#[derive(Default)]
pub struct MemoryVault {
    notes: Mutex<HashMap<PathBuf, String>>,
    dirs: Mutex<HashSet<PathBuf>>,
    read_only: AtomicBool,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_note(self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.notes
            .lock()
            .unwrap()
            .insert(path.into(), content.to_string());
        self
    }

    pub fn read_only(self) -> Self {
        self.read_only.store(true, Ordering::SeqCst);
        self
    }

    pub fn note(&self, path: &Path) -> Option<String> {
        self.notes.lock().unwrap().get(path).cloned()
    }

    pub fn has_dir(&self, path: &Path) -> bool {
        self.dirs.lock().unwrap().contains(path)
    }
}

fn denied(path: &Path) -> SyncError {
    SyncError::vault(
        path,
        std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only vault"),
    )
}

#[async_trait]
impl VaultStore for MemoryVault {
    async fn read_note(&self, path: &Path) -> SyncResult<String> {
        self.note(path).ok_or_else(|| {
            SyncError::vault(path, std::io::Error::from(std::io::ErrorKind::NotFound))
        })
    }

    async fn write_note(&self, path: &Path, content: &str) -> SyncResult<()> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(denied(path));
        }
        self.notes
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    async fn note_exists(&self, path: &Path) -> SyncResult<bool> {
        Ok(self.notes.lock().unwrap().contains_key(path))
    }

    async fn create_dir_all(&self, path: &Path) -> SyncResult<()> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(denied(path));
        }
        self.dirs.lock().unwrap().insert(path.to_path_buf());
        Ok(())
    }
}
