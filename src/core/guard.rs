//! Safety guard: mission-drift and prohibited-pattern gating.
//!
//! Two independent checks, both of which must pass:
//! - alignment check: `alignment_score >= drift_threshold`
//! - pattern check: the serialized item contains no deny-listed phrase
//!   (case-insensitive substring semantics)
//!
//! A violation is a normal control-flow outcome, not an error: `evaluate`
//! returns `Ok(false)`, trips the kill switch, and the caller decides what
//! to skip. The ACTIVE -> HALTED transition is one-way for the lifetime of
//! the guard instance; resetting means constructing a new guard.

use crate::core::config::GuardPolicy;
use crate::core::error::MissionError;
use crate::core::store::Store;
use crate::core::{compose::ContentItem, time};
use regex::Regex;
use std::io::Write;

#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// Alignment score fell below the configured threshold.
    Drift { score: f64, threshold: f64 },
    /// A deny-listed phrase appeared in the serialized item.
    DeniedPattern { phrase: String },
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::Drift { score, threshold } => {
                write!(f, "mission drift: score {} below threshold {}", score, threshold)
            }
            Violation::DeniedPattern { phrase } => {
                write!(f, "prohibited pattern: {:?}", phrase)
            }
        }
    }
}

pub struct SafetyGuard {
    policy: GuardPolicy,
    /// Deny phrases compiled as case-insensitive literal regexes. Escaping
    /// the phrase keeps exact substring semantics.
    patterns: Vec<(String, Regex)>,
    store: Store,
    active: bool,
}

impl SafetyGuard {
    pub fn new(policy: GuardPolicy, store: Store) -> Result<Self, MissionError> {
        let patterns = policy
            .denied_phrases
            .iter()
            .map(|phrase| {
                Regex::new(&format!("(?i){}", regex::escape(phrase)))
                    .map(|re| (phrase.clone(), re))
                    .map_err(|e| MissionError::ConfigError(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SafetyGuard {
            policy,
            patterns,
            store,
            active: true,
        })
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Pure check: all violations for `item`, in check order.
    pub fn check(&self, item: &ContentItem) -> Vec<Violation> {
        let mut violations = Vec::new();

        if item.alignment_score < self.policy.drift_threshold {
            violations.push(Violation::Drift {
                score: item.alignment_score,
                threshold: self.policy.drift_threshold,
            });
        }

        // Serialize the whole item so the deny-list covers every field, not
        // just the caption.
        let haystack = serde_json::to_string(item).unwrap_or_default();
        for (phrase, re) in &self.patterns {
            if re.is_match(&haystack) {
                violations.push(Violation::DeniedPattern {
                    phrase: phrase.clone(),
                });
            }
        }

        violations
    }

    /// Gate one item. `Ok(true)` = safe to schedule. On any violation the
    /// kill switch trips, a halt record is appended, and `Ok(false)` is
    /// returned; only the halt-record write itself can error.
    pub fn evaluate(&mut self, item: &ContentItem) -> Result<bool, MissionError> {
        let violations = self.check(item);
        if violations.is_empty() {
            return Ok(true);
        }

        for violation in &violations {
            tracing::error!(mission_id = %item.mission_id, %violation, "risk alert");
        }
        let reason = format!(
            "{}: {}",
            item.mission_id,
            violations
                .iter()
                .map(Violation::to_string)
                .collect::<Vec<_>>()
                .join("; ")
        );
        self.trigger_kill_switch(&reason)?;
        Ok(false)
    }

    /// Flip ACTIVE -> HALTED and append one line to `kill_switch.log`.
    pub fn trigger_kill_switch(&mut self, reason: &str) -> Result<(), MissionError> {
        self.active = false;
        tracing::error!(reason, "kill switch activated");

        self.store.ensure_audit_dir()?;
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.store.kill_switch_path())
            .map_err(MissionError::IoError)?;
        writeln!(file, "{} - {}", time::now_rfc3339(), reason).map_err(MissionError::IoError)?;
        Ok(())
    }
}
