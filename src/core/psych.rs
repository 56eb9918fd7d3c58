//! Psychological anchoring: the sublime-messaging caption layer.
//!
//! Runs between the guard verdict and timing alignment. Each cleared item
//! gets a `final_caption` built from its anchor message plus one fixed line
//! from the message bank for its vector. The pick is deterministic (first
//! entry of the bank) so captions are reproducible across runs.

use crate::core::seed::MissionVector;

/// Bank for vectors without a dedicated entry in the table below.
const FALLBACK_BANK: &[&str] = &[
    "[PAUSE] Observe the urge to scroll. Who is scrolling?",
    "Silence is the state where clarity arises.",
    "Stop. Breathe. Re-align with your primary mission.",
];

/// The fixed message bank, keyed by vector. Same table-as-data shape as the
/// anchor table in `compose`: adding a vector means adding a row.
const SUBLIME_BANK: &[(MissionVector, &[&str])] = &[
    (
        MissionVector::SublimeAwareness,
        &[
            "The observer is the observed.",
            "Time is a local variable; consciousness is the constant.",
            "Myth is the blueprint of the collective psyche.",
        ],
    ),
    (
        MissionVector::KarmaFeedbackLoop,
        &[
            "Repetition is feedback. What is your loop telling you?",
            "Karma ends with learning. What is the lesson today?",
            "Every reaction is a forgotten choice.",
        ],
    ),
    (MissionVector::PauseBreakAwareness, FALLBACK_BANK),
];

/// First entry of the vector's bank, falling back to the pause-break lines
/// for vectors with no row of their own.
pub fn anchor_line(vector: MissionVector) -> &'static str {
    SUBLIME_BANK
        .iter()
        .find(|(v, _)| *v == vector)
        .map(|(_, bank)| bank[0])
        .unwrap_or(FALLBACK_BANK[0])
}

/// Embed the vector's anchor line under `base` as a bracketed interrupt.
pub fn embed_sublime_messaging(base: &str, vector: MissionVector) -> String {
    format!(
        "{}\n\n[Institutional Anchor: {}]",
        base,
        anchor_line(vector)
    )
}
