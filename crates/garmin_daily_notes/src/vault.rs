//! Daily note locations and vault storage.
//!
//! Notes live at `<root>/<year>/<Month>/<Month>  <DD>  <year>.md`. The double
//! spaces in the file name match the existing vault convention and must not be
//! collapsed.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::{SyncError, SyncResult};

/// File name of the daily note for `date`, e.g. `June  27  2025.md`.
pub fn note_file_name(date: NaiveDate) -> String {
    let month = date.format("%B");
    format!("{month}  {:02}  {}.md", date.day(), date.year())
}

/// Path of the daily note for `date` under `vault_root`.
pub fn resolve_path(vault_root: &Path, date: NaiveDate) -> PathBuf {
    vault_root
        .join(date.year().to_string())
        .join(date.format("%B").to_string())
        .join(note_file_name(date))
}

/// Heading text of a freshly created note, e.g. `June 27, 2025`.
pub fn note_title(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Document store holding the daily notes.
#[async_trait]
pub trait VaultStore: Send + Sync {
    async fn read_note(&self, path: &Path) -> SyncResult<String>;

    /// Create or overwrite a note.
    async fn write_note(&self, path: &Path, content: &str) -> SyncResult<()>;

    async fn note_exists(&self, path: &Path) -> SyncResult<bool>;

    async fn create_dir_all(&self, path: &Path) -> SyncResult<()>;
}

/// Vault backed by the local filesystem.
#[derive(Clone, Debug)]
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[async_trait]
impl VaultStore for FsVault {
    async fn read_note(&self, path: &Path) -> SyncResult<String> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| SyncError::vault(path, e))
    }

    /// Writes to a sibling `.tmp` file and renames it over the note.
    async fn write_note(&self, path: &Path, content: &str) -> SyncResult<()> {
        let tmp = temp_path_for(path);
        let result = async {
            let mut file = tokio::fs::File::create(&tmp).await?;
            file.write_all(content.as_bytes()).await?;
            file.sync_all().await?;
            drop(file);
            tokio::fs::rename(&tmp, path).await
        }
        .await;

        if let Err(e) = result {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(SyncError::vault(path, e));
        }
        Ok(())
    }

    async fn note_exists(&self, path: &Path) -> SyncResult<bool> {
        tokio::fs::try_exists(path)
            .await
            .map_err(|e| SyncError::vault(path, e))
    }

    async fn create_dir_all(&self, path: &Path) -> SyncResult<()> {
        let exists = tokio::fs::try_exists(path)
            .await
            .map_err(|e| SyncError::vault(path, e))?;
        if exists {
            return Ok(());
        }
        tokio::fs::create_dir_all(path)
            .await
            .map_err(|e| SyncError::vault(path, e))?;
        debug!(path = %path.display(), "created vault directory");
        Ok(())
    }
}
