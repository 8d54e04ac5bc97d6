//! Command-line arguments and date selection.

use std::path::PathBuf;

use chrono::{Duration, NaiveDate};
use clap::Parser;
use garmin_bridge_client::utils::{expand_range, last_week, parse_iso_date};

use crate::error::{SyncError, SyncResult};

const CREDENTIALS_HELP: &str = "\
GARMIN_USERNAME and GARMIN_PASSWORD are optional. Set them only when the bridge
sits behind a proxy that serves POST /login; the stock bridge needs no login.";

/// Sync Garmin health data into daily markdown notes.
#[derive(Debug, Parser)]
#[command(name = "garmin-daily-notes", version, after_help = CREDENTIALS_HELP)]
pub struct Cli {
    /// One date (YYYY-MM-DD) or an inclusive start and end date. Defaults to today.
    #[arg(value_name = "DATE", num_args = 0..=2)]
    pub dates: Vec<String>,

    /// Sync the last seven days plus today.
    #[arg(long, conflicts_with_all = ["dates", "yesterday"])]
    pub last_week: bool,

    /// Sync yesterday's note.
    #[arg(long, conflicts_with = "dates")]
    pub yesterday: bool,

    /// Check the bridge connection and exit.
    #[arg(long)]
    pub check: bool,

    /// Use built-in sample data instead of the bridge.
    #[arg(long)]
    pub sample: bool,

    /// Vault root directory (overrides GARMIN_NOTES_VAULT_PATH).
    #[arg(long, value_name = "PATH")]
    pub vault: Option<PathBuf>,

    /// Bridge base URL (overrides GARMIN_BRIDGE_URL).
    #[arg(long, value_name = "URL")]
    pub server_url: Option<String>,

    /// Pause between dates in milliseconds (overrides GARMIN_NOTES_COOLDOWN_MS).
    #[arg(long, value_name = "N")]
    pub cooldown_ms: Option<u64>,

    /// Print the batch report as JSON on stdout.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Dates to sync, in processing order.
    pub fn resolve_dates(&self, today: NaiveDate) -> SyncResult<Vec<NaiveDate>> {
        if self.last_week {
            return Ok(last_week(today));
        }
        if self.yesterday {
            return Ok(vec![today - Duration::days(1)]);
        }
        match self.dates.as_slice() {
            [] => Ok(vec![today]),
            [single] => Ok(vec![parse_date(single)?]),
            [start, end] => {
                let (start, end) = (parse_date(start)?, parse_date(end)?);
                if start > end {
                    return Err(SyncError::InvalidInput(format!(
                        "start date {start} is after end date {end}"
                    )));
                }
                Ok(expand_range(start, end))
            }
            _ => Err(SyncError::InvalidInput(
                "expected at most two dates".into(),
            )),
        }
    }
}

fn parse_date(raw: &str) -> SyncResult<NaiveDate> {
    parse_iso_date(raw)
        .map_err(|e| SyncError::InvalidInput(format!("invalid date {raw:?} (want YYYY-MM-DD): {e}")))
}
