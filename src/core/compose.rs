//! Content composition: seed -> mission content item.
//!
//! The anchor table is a fixed two-level lookup (vector, category) -> triple
//! held as a flat ordered slice. Lookup is exact-match only; anything
//! unmapped falls through to the single global default triple. Adding a
//! category or vector means adding a row, never touching control flow.

use crate::core::seed::{self, MissionVector};
use serde::{Deserialize, Serialize};

/// A psychological anchor: the message/script/visual triple for one mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorTriple {
    pub message: &'static str,
    pub script: &'static str,
    pub visual: &'static str,
}

/// One deterministic content item for one account on one day.
///
/// The guard reads it as composed; once cleared, the orchestrator stamps
/// `final_caption` before alignment. No other field is ever mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub mission_id: String,
    pub vector: MissionVector,
    pub anchor_message: String,
    pub script: String,
    pub visual_cue: String,
    /// Sublime-messaging caption, set after the guard clears the item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_caption: Option<String>,
    /// Deterministic derivative of the seed in [1.0, 2.0], used as a
    /// synthetic safety signal. This is NOT a model confidence.
    pub alignment_score: f64,
    pub category: String,
}

pub const DEFAULT_ANCHOR: AnchorTriple = AnchorTriple {
    message: "Alignment is the only goal.",
    script: "Pause. Realize the observer within.",
    visual: "Deep blue gradient, single white dot glowing.",
};

/// The fixed anchor table. Order is irrelevant to lookup (exact match), but
/// rows are grouped by vector for readability.
const ANCHOR_TABLE: &[(MissionVector, &str, AnchorTriple)] = &[
    (
        MissionVector::CognitiveInterruption,
        "Mythology",
        AnchorTriple {
            message: "The gods do not judge; they mirror your internal chaos.",
            script: "[Pause] Observe the thought that just passed. Why did it arise?",
            visual: "Static ancient statue, slow zoom into eyes.",
        },
    ),
    (
        MissionVector::CognitiveInterruption,
        "Karma",
        AnchorTriple {
            message: "Karma is not a punishment, it is a precision feedback loop.",
            script: "Stop. Breathe. What action are you repeating today?",
            visual: "Slow motion water ripple, reversed.",
        },
    ),
    (
        MissionVector::CognitiveInterruption,
        "Crystals",
        AnchorTriple {
            message: "Crystalline structure is the physical manifestation of frequency stability.",
            script: "Notice the density of your physical body. How does it react to this stone?",
            visual: "Macro shot of Amethyst crystal structure.",
        },
    ),
    (
        MissionVector::CognitiveInterruption,
        "Sacred Geometry",
        AnchorTriple {
            message: "Metatron\u{2019}s Cube is the map of the multidimensional self.",
            script: "Observe the convergence of lines. Where does your awareness rest?",
            visual: "Gold lines forming Metatron's Cube on black background.",
        },
    ),
    (
        MissionVector::SelfCorrectionPath,
        "Dharma",
        AnchorTriple {
            message: "Duty is the alignment of your breath with the universal pulse.",
            script: "If you could change one reaction today, what would it be?",
            visual: "Golden ratio sacred geometry expanding.",
        },
    ),
    (
        MissionVector::SelfCorrectionPath,
        "Consciousness",
        AnchorTriple {
            message: "Awareness is the only act that dissolves the ego.",
            script: "In this moment, who is witnessing this message?",
            visual: "Single star light expanding in a void.",
        },
    ),
    (
        MissionVector::KarmaFeedbackLoop,
        "Karma",
        AnchorTriple {
            message: "Repetition is feedback. Your loops are teachers.",
            script: "DOWNLOAD: Get the '7 Karma Principles for a Better Life' guide in bio.",
            visual: "Endless spiral staircase, view from above.",
        },
    ),
];

/// Exact-match lookup of `(vector, category)` with single-default fallback.
pub fn anchor_for(vector: MissionVector, category: &str) -> AnchorTriple {
    ANCHOR_TABLE
        .iter()
        .find(|(v, c, _)| *v == vector && *c == category)
        .map(|(_, _, triple)| *triple)
        .unwrap_or(DEFAULT_ANCHOR)
}

/// Compose the mission content item for `(account, day_index, category)`.
pub fn compose(account: &str, day_index: u32, category: &str) -> ContentItem {
    let digest = seed::mission_seed(account, day_index);
    let vector = MissionVector::from_digest(&digest);
    let anchor = anchor_for(vector, category);

    ContentItem {
        mission_id: format!("MISSION-{}", digest[..8].to_uppercase()),
        vector,
        anchor_message: anchor.message.to_string(),
        script: anchor.script.to_string(),
        visual_cue: anchor.visual.to_string(),
        final_caption: None,
        alignment_score: alignment_score(&digest),
        category: category.to_string(),
    }
}

/// `1.0 + first_byte/255`, rounded to 2 decimal places -> [1.0, 2.0].
fn alignment_score(digest: &str) -> f64 {
    let raw = 1.0 + f64::from(seed::first_digest_byte(digest)) / 255.0;
    (raw * 100.0).round() / 100.0
}
