//! Merge Garmin health data into dated markdown notes.
//!
//! Each day's note lives at `<vault>/<year>/<Month>/<Month>  <DD>  <YYYY>.md` and
//! carries at most one `## Garmin Data` section, which is rewritten in place on
//! every sync.

pub mod cli;
pub mod config;
pub mod error;
pub mod merge;
pub mod middleware;
pub mod render;
pub mod sample;
pub mod sync;
pub mod vault;

mod test_utils;

pub use config::SyncConfig;
pub use error::{SyncError, SyncResult};
pub use merge::{MergeAction, Merged, merge_section};
pub use middleware::LoggingSource;
pub use render::{SECTION_MARKER, render_section};
pub use sample::SampleSource;
pub use sync::{BatchReport, DateOutcome, DateStatus, NoteSyncer, NoteUpdate};
pub use vault::{FsVault, VaultStore, note_file_name, note_title, resolve_path};
