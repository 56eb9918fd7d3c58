//! Audit trail rendering and verification.
//!
//! Read-only tooling over the per-day event files. The timeline renderer
//! makes the signed trail legible to operators without fabricating missing
//! structure; the verifier recomputes every signature under the configured
//! secret, which is how an external auditor detects tampering.

use crate::core::audit::{AuditLog, AuditRecord};
use crate::core::error::MissionError;
use crate::core::store::Store;
use colored::Colorize;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct Timeline {
    pub rendered_at: String,
    pub event_count: usize,
    pub sources: Vec<String>,
    pub events: Vec<AuditRecord>,
    pub gaps: Vec<String>,
}

/// Collect the first `limit` records of each event file (files are
/// append-ordered, so these are the oldest), sorted by timestamp.
/// Unparseable lines become gap notes, never fabricated events.
pub fn collect_timeline(store: &Store, limit: usize) -> Result<Timeline, MissionError> {
    let mut events = Vec::new();
    let mut sources = Vec::new();
    let mut gaps = Vec::new();

    let files = store.event_files()?;
    if files.is_empty() {
        gaps.push("no event files found".to_string());
    }

    for path in &files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        match read_records(path, limit) {
            Ok((records, bad_lines)) => {
                if bad_lines > 0 {
                    gaps.push(format!("{}: {} unparseable line(s)", name, bad_lines));
                }
                events.extend(records);
                sources.push(name);
            }
            Err(e) => gaps.push(format!("{}: read error - {}", name, e)),
        }
    }

    events.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

    Ok(Timeline {
        rendered_at: super::time::now_rfc3339(),
        event_count: events.len(),
        sources,
        events,
        gaps,
    })
}

fn read_records(path: &Path, limit: usize) -> Result<(Vec<AuditRecord>, usize), MissionError> {
    let file = File::open(path).map_err(MissionError::IoError)?;
    let reader = BufReader::new(file);
    let mut records = Vec::new();
    let mut bad_lines = 0;

    for line in reader.lines() {
        let line = line.map_err(MissionError::IoError)?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<AuditRecord>(&line) {
            Ok(record) => records.push(record),
            Err(_) => bad_lines += 1,
        }
        if records.len() >= limit {
            break;
        }
    }

    Ok((records, bad_lines))
}

pub fn render_timeline(store: &Store, format: &str, limit: usize) -> Result<(), MissionError> {
    let timeline = collect_timeline(store, limit)?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&timeline)?);
        return Ok(());
    }

    println!("{}", "MISSION AUDIT TIMELINE".bold());
    println!("Rendered: {}", timeline.rendered_at);
    println!("Total Events: {}", timeline.event_count);
    println!("Sources: {}", timeline.sources.join(", "));
    println!();

    if !timeline.gaps.is_empty() {
        println!("{}", "GAPS / MISSING DATA:".yellow());
        for gap in &timeline.gaps {
            println!("  - {}", gap);
        }
        println!();
    }

    println!("{:<22} {:<20} {:<10} MISSION", "TIME", "ACTION", "STATUS");
    println!("{}", "-".repeat(72));
    for ev in &timeline.events {
        let mission = ev
            .metadata
            .get("mission_id")
            .and_then(|v| v.as_str())
            .unwrap_or("-");
        println!(
            "{:<22} {:<20} {:<10} {}",
            truncate(&ev.timestamp, 22),
            truncate(&ev.action, 20),
            format!("{:?}", ev.system_status).to_uppercase(),
            mission
        );
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct VerifySummary {
    pub files: usize,
    pub records: usize,
    pub valid: usize,
    pub invalid: Vec<String>,
    pub unparseable: usize,
}

impl VerifySummary {
    pub fn all_valid(&self) -> bool {
        self.invalid.is_empty() && self.unparseable == 0
    }
}

/// Recompute every record's signature under `secret`.
pub fn verify_trail(store: &Store, secret: &str) -> Result<VerifySummary, MissionError> {
    let log = AuditLog::new(store.clone(), secret);
    let mut summary = VerifySummary {
        files: 0,
        records: 0,
        valid: 0,
        invalid: Vec::new(),
        unparseable: 0,
    };

    for path in store.event_files()? {
        summary.files += 1;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let (records, bad_lines) = read_records(&path, usize::MAX)?;
        summary.unparseable += bad_lines;
        for record in records {
            summary.records += 1;
            if log.verify(&record) {
                summary.valid += 1;
            } else {
                summary.invalid.push(format!("{}: {}", name, record.event_id));
            }
        }
    }

    Ok(summary)
}

pub fn render_verification(store: &Store, secret: &str) -> Result<bool, MissionError> {
    let summary = verify_trail(store, secret)?;

    println!("Files checked:   {}", summary.files);
    println!("Records checked: {}", summary.records);
    println!("Valid:           {}", summary.valid);
    if summary.unparseable > 0 {
        println!("Unparseable:     {}", summary.unparseable);
    }
    for entry in &summary.invalid {
        println!("  {} {}", "TAMPERED".red().bold(), entry);
    }
    if summary.all_valid() {
        println!("{}", "Audit trail verified.".green());
    } else {
        println!("{}", "Audit trail verification FAILED.".red().bold());
    }

    Ok(summary.all_valid())
}
