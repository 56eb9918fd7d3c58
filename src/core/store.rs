//! Store abstraction for missionctl's on-disk state.
//!
//! A `Store` is a handle over the root directory that holds the append-only
//! audit trail. All log paths are derived here so that every subsystem
//! agrees on the layout:
//!
//! - `logs/audit/events_<YYYYMMDD>.json`: signed mission records, one JSON
//!   object per line, keyed by UTC calendar day.
//! - `logs/audit/kill_switch.log`: one line per guard halt event.

use crate::core::error::MissionError;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Store {
    /// Absolute path to the store root directory.
    pub root: PathBuf,
}

impl Store {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Store { root: root.into() }
    }

    pub fn audit_dir(&self) -> PathBuf {
        self.root.join("logs").join("audit")
    }

    /// Path of the signed event log for the UTC day containing `ts`.
    pub fn events_path(&self, ts: DateTime<Utc>) -> PathBuf {
        self.audit_dir()
            .join(format!("events_{}.json", super::time::day_stamp(ts)))
    }

    pub fn kill_switch_path(&self) -> PathBuf {
        self.audit_dir().join("kill_switch.log")
    }

    /// Create the audit directory if missing. Append sites call this before
    /// the first write so a fresh store root works without setup.
    pub fn ensure_audit_dir(&self) -> Result<(), MissionError> {
        fs::create_dir_all(self.audit_dir()).map_err(MissionError::IoError)
    }

    /// All per-day event files currently present, sorted by file name
    /// (file names sort chronologically because of the day-stamp suffix).
    pub fn event_files(&self) -> Result<Vec<PathBuf>, MissionError> {
        let dir = self.audit_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut files: Vec<PathBuf> = fs::read_dir(&dir)
            .map_err(MissionError::IoError)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| is_event_file(p))
            .collect();
        files.sort();
        Ok(files)
    }
}

fn is_event_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with("events_") && n.ends_with(".json"))
        .unwrap_or(false)
}
