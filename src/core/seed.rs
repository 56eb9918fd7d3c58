//! Deterministic mission seeds.
//!
//! A mission seed is a SHA-256 digest over a fixed-format namespace string
//! built from the account name and a day index. Identical inputs always
//! yield the identical digest: no clock, no I/O, no randomness. The digest
//! is the single source of truth for everything derived downstream (mission
//! id, vector, alignment score), which is what makes a 365-day plan
//! reproducible across process restarts and across implementations.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Namespace token baked into every seed. Changing it re-keys the entire
/// content universe, so it is a compile-time constant rather than config.
const SEED_NAMESPACE: &str = "LakhanBhai-DAO";

/// Lowercase hex SHA-256 digest for `(account, day_index)`.
pub fn mission_seed(account: &str, day_index: u32) -> String {
    let raw = format!("{}-{}-Day-{}-Institutional", SEED_NAMESPACE, account, day_index);
    let mut hasher = Sha256::new();
    hasher.update(raw.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Psychological mission vectors, assigned deterministically from a seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionVector {
    CognitiveInterruption,
    SelfCorrectionPath,
    SublimeAwareness,
    KarmaFeedbackLoop,
    PauseBreakAwareness,
}

pub const VECTOR_COUNT: u32 = 5;

impl MissionVector {
    /// Map a hex digest to a vector as `int(digest, 16) mod 5`.
    ///
    /// The digest is a 256-bit number; rather than widening into a bignum we
    /// fold hex digits left to right, reducing mod 5 at each step. This is a
    /// uniform deterministic index, not a statistical sample. Non-hex
    /// characters contribute nothing, so a malformed digest still maps to a
    /// valid vector instead of panicking.
    pub fn from_digest(digest: &str) -> MissionVector {
        let index = digest
            .chars()
            .filter_map(|c| c.to_digit(16))
            .fold(0u32, |acc, d| (acc * 16 + d) % VECTOR_COUNT);
        Self::from_index(index)
    }

    fn from_index(index: u32) -> MissionVector {
        match index % VECTOR_COUNT {
            0 => MissionVector::CognitiveInterruption,
            1 => MissionVector::SelfCorrectionPath,
            2 => MissionVector::SublimeAwareness,
            3 => MissionVector::KarmaFeedbackLoop,
            _ => MissionVector::PauseBreakAwareness,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MissionVector::CognitiveInterruption => "Cognitive Interruption",
            MissionVector::SelfCorrectionPath => "Self-Correction Path",
            MissionVector::SublimeAwareness => "Sublime Awareness",
            MissionVector::KarmaFeedbackLoop => "Karma-Feedback Loop",
            MissionVector::PauseBreakAwareness => "Pause-Break Awareness",
        }
    }
}

impl std::fmt::Display for MissionVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// First byte of the digest as an integer, used for the alignment score.
pub fn first_digest_byte(digest: &str) -> u8 {
    u8::from_str_radix(digest.get(0..2).unwrap_or("00"), 16).unwrap_or(0)
}
