//! missionctl: deterministic missions-control core for themed content fleets.
//!
//! Generates one content item per (account, day) from a reproducible seed,
//! gates it against a safety policy, aligns a posting slot with auspicious
//! lunar/solar windows, and records every decision in a signed append-only
//! audit trail.
//!
//! # Pipeline
//!
//! seed -> compose -> guard -> anchor -> align -> audit, orchestrated per
//! account.
//! Everything downstream of the seed is a pure function of it, so a
//! 365-day content plan is reproducible across process restarts.
//!
//! # State layout
//!
//! - `logs/audit/events_<YYYYMMDD>.json`: signed records, one per line
//! - `logs/audit/kill_switch.log`: one line per guard halt
//!
//! External publish/query clients are out of scope: this crate produces
//! validated, scheduled items for a surrounding service to publish.

pub mod core;

use crate::core::{config, cosmic, error, orchestrator, store::Store, timeline};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "missionctl",
    version = env!("CARGO_PKG_VERSION"),
    about = "Deterministic missions control for themed content fleets"
)]
struct Cli {
    /// Project directory holding missions.toml and the logs/ tree.
    #[clap(long, global = true)]
    dir: Option<PathBuf>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Execute the launch sequence for the whole fleet.
    Run {
        /// Number of day indices to generate per account.
        #[clap(long, default_value = "1")]
        days: u32,
        /// Output format: 'text' or 'json'.
        #[clap(long, default_value = "text")]
        format: String,
    },
    /// Compose one deterministic mission and print it.
    Compose {
        #[clap(long)]
        account: String,
        #[clap(long, default_value = "0")]
        day: u32,
        /// Category override; defaults to the account's configured category.
        #[clap(long)]
        category: Option<String>,
    },
    /// Inspect the lunar phase and the next auspicious window.
    Phase {
        /// RFC 3339 timestamp; defaults to now.
        #[clap(long)]
        at: Option<String>,
    },
    /// Audit trail tooling.
    Audit {
        #[clap(subcommand)]
        command: AuditCommand,
    },
}

#[derive(Subcommand, Debug)]
enum AuditCommand {
    /// Render the signed event files as a timeline.
    Timeline {
        /// Output format: 'text' or 'json'.
        #[clap(long, default_value = "text")]
        format: String,
        /// Keep at most the first N events of each file, oldest first.
        #[clap(long, default_value = "100")]
        limit: usize,
    },
    /// Recompute every record signature and report tampering.
    Verify,
}

pub fn run() -> Result<(), error::MissionError> {
    let cli = Cli::parse();
    let dir = match cli.dir {
        Some(d) => d,
        None => std::env::current_dir()?,
    };
    let config = config::load_config(&dir)?;
    let store = Store::new(&dir);

    match cli.command {
        Command::Run { days, format } => {
            let mut orchestrator = orchestrator::MissionOrchestrator::new(config, store)?;
            let report = orchestrator.run(days, Utc::now());

            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            for outcome in &report.outcomes {
                println!(
                    "{} {}: {} aligned, {} rejected",
                    "MISSION READY".green().bold(),
                    outcome.account,
                    outcome.accepted.len(),
                    outcome.rejected.len()
                );
                for scheduled in &outcome.accepted {
                    println!(
                        "  {}  {}  {} ({})",
                        scheduled.item.mission_id,
                        scheduled.scheduled_at.to_rfc3339(),
                        scheduled.phase.phase_name,
                        scheduled.item.vector
                    );
                }
                for rejected in &outcome.rejected {
                    println!(
                        "  {} day {}: {}",
                        "REJECTED".red(),
                        rejected.day_index,
                        rejected.reasons.join("; ")
                    );
                }
            }
            if report.halted {
                println!("{}", "KILL SWITCH ACTIVE: publishing is halted.".red().bold());
            }
            if let Some(reason) = &report.stop_reason {
                println!("{} {}", "Run stopped early:".red(), reason);
            }
            Ok(())
        }
        Command::Compose {
            account,
            day,
            category,
        } => {
            let category = category
                .or_else(|| {
                    config
                        .accounts
                        .iter()
                        .find(|a| a.name == account)
                        .map(|a| a.category.clone())
                })
                .ok_or_else(|| {
                    error::MissionError::NotFound(format!(
                        "account {:?} not in manifest and no --category given",
                        account
                    ))
                })?;
            let mut item = crate::core::compose::compose(&account, day, &category);
            item.final_caption = Some(crate::core::psych::embed_sublime_messaging(
                &item.anchor_message,
                item.vector,
            ));
            println!("{}", serde_json::to_string_pretty(&item)?);
            Ok(())
        }
        Command::Phase { at } => {
            let ts = parse_ts(at.as_deref())?;
            let phase = cosmic::CelestialPhase::at(ts);
            println!("Timestamp:       {}", ts.to_rfc3339());
            println!("Moon Phase:      {:.4} ({})", phase.phase, phase.phase_name);
            println!("Peak:            {}", phase.is_peak);
            println!("Auspicious:      {}", cosmic::is_auspicious(ts));
            println!(
                "Next Window:     {}",
                cosmic::next_window(ts).to_rfc3339()
            );
            Ok(())
        }
        Command::Audit { command } => match command {
            AuditCommand::Timeline { format, limit } => {
                timeline::render_timeline(&store, &format, limit)
            }
            AuditCommand::Verify => {
                let ok = timeline::render_verification(&store, &config.secret)?;
                if !ok {
                    return Err(error::MissionError::ValidationError(
                        "audit trail verification failed".to_string(),
                    ));
                }
                Ok(())
            }
        },
    }
}

fn parse_ts(at: Option<&str>) -> Result<DateTime<Utc>, error::MissionError> {
    match at {
        None => Ok(Utc::now()),
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| error::MissionError::ValidationError(format!("bad timestamp: {}", e))),
    }
}
