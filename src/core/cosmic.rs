//! Cosmic timing engine: lunar phase math and auspicious-window search.
//!
//! Phase is a pure function of the timestamp against a fixed reference new
//! moon, so every computation here is deterministic and stateless. Window
//! search is a bounded linear scan in 30-minute steps; it is deliberately a
//! scan and not a priority queue, which buys a proven iteration bound and
//! identical results on every run.

use crate::core::compose::ContentItem;
use chrono::{DateTime, Duration, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

pub const LUNAR_CYCLE_DAYS: f64 = 29.53059;

/// Search step and bound: every 30 minutes across the next 48 hours.
pub const SEARCH_STEP_MINUTES: i64 = 30;
pub const SEARCH_MAX_PROBES: usize = 96;

/// Reference epoch: the new moon of 2024-01-11 11:57 UTC.
pub fn reference_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 11, 11, 57, 0)
        .single()
        .expect("fixed calendar date is valid")
}

/// Lunar phase in [0, 1): 0 = new moon, 0.5 = full moon.
pub fn moon_phase(ts: DateTime<Utc>) -> f64 {
    let elapsed = (ts - reference_epoch()).num_seconds() as f64;
    (elapsed / (LUNAR_CYCLE_DAYS * 86_400.0)).rem_euclid(1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseName {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl PhaseName {
    /// Non-overlapping boundary thresholds; first match wins.
    pub fn classify(phase: f64) -> PhaseName {
        if phase < 0.05 || phase > 0.95 {
            PhaseName::NewMoon
        } else if phase < 0.25 {
            PhaseName::WaxingCrescent
        } else if phase < 0.30 {
            PhaseName::FirstQuarter
        } else if phase < 0.45 {
            PhaseName::WaxingGibbous
        } else if phase < 0.55 {
            PhaseName::FullMoon
        } else if phase < 0.75 {
            PhaseName::WaningGibbous
        } else if phase < 0.80 {
            PhaseName::LastQuarter
        } else {
            PhaseName::WaningCrescent
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PhaseName::NewMoon => "New Moon",
            PhaseName::WaxingCrescent => "Waxing Crescent",
            PhaseName::FirstQuarter => "First Quarter",
            PhaseName::WaxingGibbous => "Waxing Gibbous",
            PhaseName::FullMoon => "Full Moon",
            PhaseName::WaningGibbous => "Waning Gibbous",
            PhaseName::LastQuarter => "Last Quarter",
            PhaseName::WaningCrescent => "Waning Crescent",
        }
    }
}

impl std::fmt::Display for PhaseName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Full-moon peak window, open at both ends.
pub fn is_peak(phase: f64) -> bool {
    phase > 0.45 && phase < 0.55
}

/// Snapshot of the lunar state at one instant. Recomputed on demand, never
/// persisted on its own.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CelestialPhase {
    pub phase: f64,
    pub phase_name: PhaseName,
    pub is_peak: bool,
}

impl CelestialPhase {
    pub fn at(ts: DateTime<Utc>) -> CelestialPhase {
        let phase = moon_phase(ts);
        CelestialPhase {
            phase: (phase * 10_000.0).round() / 10_000.0,
            phase_name: PhaseName::classify(phase),
            is_peak: is_peak(phase),
        }
    }
}

/// Whether `ts` falls in an auspicious window.
///
/// Lunar rules: outside the new-moon band, the full-moon peak and the growth
/// phase (0.10, 0.40) qualify. Solar rules: dawn [04:00, 06:59] and sunset
/// [18:00, 20:59] hours qualify regardless of phase. Hours are UTC so the
/// result never depends on host timezone.
pub fn is_auspicious(ts: DateTime<Utc>) -> bool {
    let phase = moon_phase(ts);

    if phase > 0.05 && phase < 0.95 {
        if is_peak(phase) {
            return true;
        }
        if phase > 0.10 && phase < 0.40 {
            return true;
        }
    }

    let hour = ts.hour();
    (4..=6).contains(&hour) || (18..=20).contains(&hour)
}

/// Bounded forward scan for the next auspicious slot.
///
/// Probes `start`, then every 30 minutes, at most `max_probes` times. On
/// exhaustion returns `start` unchanged as the deterministic fallback.
pub fn next_window_bounded(start: DateTime<Utc>, max_probes: usize) -> DateTime<Utc> {
    let mut current = start;
    for _ in 0..max_probes {
        if is_auspicious(current) {
            return current;
        }
        current += Duration::minutes(SEARCH_STEP_MINUTES);
    }
    tracing::warn!(start = %start, "no auspicious window within search bound, falling back to start");
    start
}

/// Next auspicious slot within 48 hours of `start` (96 probes).
pub fn next_window(start: DateTime<Utc>) -> DateTime<Utc> {
    next_window_bounded(start, SEARCH_MAX_PROBES)
}

/// A content item with its assigned posting slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledItem {
    #[serde(flatten)]
    pub item: ContentItem,
    pub scheduled_at: DateTime<Utc>,
    pub phase: CelestialPhase,
}

/// Align a sequence of items to auspicious windows.
///
/// Sequential and cursor-based: each search starts 4 hours after the
/// previously assigned slot (the first, 4 hours after `now`), so assigned
/// times across the output are non-decreasing and never collide.
pub fn align(items: Vec<ContentItem>, now: DateTime<Utc>) -> Vec<ScheduledItem> {
    let mut scheduled = Vec::with_capacity(items.len());
    let mut cursor = now;

    for item in items {
        let slot = next_window(cursor + Duration::hours(4));
        scheduled.push(ScheduledItem {
            item,
            scheduled_at: slot,
            phase: CelestialPhase::at(slot),
        });
        cursor = slot;
    }

    scheduled
}
