//! Mission orchestration: the fleet run loop.
//!
//! Sequencing per (account, day): seed -> compose -> guard -> anchor ->
//! (per account) align -> audit. A rejected day skips that day and moves on; a failed
//! account never stops the fleet; an internal error anywhere is routed into
//! the guard's halt mechanism so the audit trail always records why a run
//! stopped. The report enumerates accepted, rejected, and halted outcomes
//! per account so callers never need to read the logs.

use crate::core::audit::AuditLog;
use crate::core::compose;
use crate::core::config::{AccountConfig, MissionConfig};
use crate::core::cosmic::{self, ScheduledItem};
use crate::core::error::MissionError;
use crate::core::guard::SafetyGuard;
use crate::core::psych;
use crate::core::store::Store;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Clone, Serialize)]
pub struct RejectedMission {
    pub day_index: u32,
    pub mission_id: String,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountOutcome {
    pub account: String,
    pub accepted: Vec<ScheduledItem>,
    pub rejected: Vec<RejectedMission>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub outcomes: Vec<AccountOutcome>,
    /// True when the guard tripped at any point during the run.
    pub halted: bool,
    /// Reason for an early stop, if the run itself failed.
    pub stop_reason: Option<String>,
}

pub struct MissionOrchestrator {
    config: MissionConfig,
    guard: SafetyGuard,
    audit: AuditLog,
}

impl MissionOrchestrator {
    pub fn new(config: MissionConfig, store: Store) -> Result<Self, MissionError> {
        let guard = SafetyGuard::new(config.guard.clone(), store.clone())?;
        let audit = AuditLog::new(store, config.secret.clone());
        Ok(MissionOrchestrator {
            config,
            guard,
            audit,
        })
    }

    pub fn accounts(&self) -> &[AccountConfig] {
        &self.config.accounts
    }

    /// Execute the launch sequence for the whole fleet: `days` missions per
    /// account, aligned from `now`. Never returns `Err`: internal failures
    /// become a guard halt plus an audit record, and the report carries the
    /// stop reason.
    pub fn run(&mut self, days: u32, now: DateTime<Utc>) -> RunReport {
        let mut report = RunReport {
            outcomes: Vec::new(),
            halted: false,
            stop_reason: None,
        };

        let accounts = self.config.accounts.clone();
        for account in &accounts {
            tracing::info!(account = %account.name, "processing fleet node");
            match self.run_account(account, days, now) {
                Ok(outcome) => {
                    tracing::info!(
                        account = %account.name,
                        accepted = outcome.accepted.len(),
                        rejected = outcome.rejected.len(),
                        "mission plan ready"
                    );
                    report.outcomes.push(outcome);
                }
                Err(e) => {
                    // An unexpected failure ends the run through the halt
                    // path; earlier accounts keep their outcomes.
                    let reason = format!("orchestration failure: {}", e);
                    if self.guard.trigger_kill_switch(&reason).is_err() {
                        tracing::error!(reason = %reason, "halt record write failed");
                    }
                    if let Err(append_err) = self.audit.append(
                        "SYSTEM_HALT",
                        json!({ "account": account.name, "reason": reason }),
                        self.guard.is_active(),
                    ) {
                        tracing::error!(error = %append_err, "halt audit record write failed");
                    }
                    report.halted = true;
                    report.stop_reason = Some(reason);
                    return report;
                }
            }
        }

        report.halted = !self.guard.is_active();
        report
    }

    /// One account: compose and gate each day, then align the survivors.
    fn run_account(
        &mut self,
        account: &AccountConfig,
        days: u32,
        now: DateTime<Utc>,
    ) -> Result<AccountOutcome, MissionError> {
        let mut plan = Vec::new();
        let mut rejected = Vec::new();

        for day_index in 0..days {
            let mut item = compose::compose(&account.name, day_index, &account.category);

            if self.guard.evaluate(&item)? {
                // Cleared items get their sublime caption before alignment.
                item.final_caption = Some(psych::embed_sublime_messaging(
                    &item.anchor_message,
                    item.vector,
                ));
                self.audit.append(
                    "MISSION_CLEARED",
                    json!({
                        "page": account.name,
                        "mission_id": item.mission_id,
                        "day_index": day_index,
                        "alignment_score": item.alignment_score,
                    }),
                    self.guard.is_active(),
                )?;
                plan.push(item);
                continue;
            }

            let reasons: Vec<String> = self
                .guard
                .check(&item)
                .iter()
                .map(ToString::to_string)
                .collect();
            self.audit.append(
                "MISSION_REJECTED",
                json!({
                    "page": account.name,
                    "mission_id": item.mission_id,
                    "day_index": day_index,
                    "reasons": reasons,
                }),
                self.guard.is_active(),
            )?;
            rejected.push(RejectedMission {
                day_index,
                mission_id: item.mission_id,
                reasons,
            });
        }

        let accepted = cosmic::align(plan, now);

        for scheduled in &accepted {
            self.audit.append(
                "MISSION_PREPARED",
                json!({
                    "page": account.name,
                    "mission_id": scheduled.item.mission_id,
                    "cosmic_window": scheduled.scheduled_at.to_rfc3339(),
                    "moon_phase": scheduled.phase.phase,
                    "alignment_score": scheduled.item.alignment_score,
                }),
                self.guard.is_active(),
            )?;
        }

        Ok(AccountOutcome {
            account: account.name.clone(),
            accepted,
            rejected,
        })
    }
}
