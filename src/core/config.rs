//! Mission configuration: the fleet manifest, guard policy, and audit secret.
//!
//! Loaded from `missions.toml` when present; a missing file is not an error
//! and yields the built-in defaults. Guard thresholds and the deny-list are
//! configuration data injected into the guard at construction, not literals
//! inside policy logic.

use crate::core::error::MissionError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "missions.toml";

/// One themed account in the fleet.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccountConfig {
    pub name: String,
    pub category: String,
    /// Opaque platform page id, passed through to external publish clients.
    #[serde(default)]
    pub platform_id: String,
}

/// Safety-guard policy knobs.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GuardPolicy {
    /// Minimum alignment score; anything strictly below is a drift violation.
    #[serde(default = "default_threshold")]
    pub drift_threshold: f64,
    /// Case-insensitive phrases that must not appear anywhere in an item.
    #[serde(default = "default_denied_phrases")]
    pub denied_phrases: Vec<String>,
}

fn default_threshold() -> f64 {
    0.85
}

fn default_denied_phrases() -> Vec<String> {
    [
        "buy now",
        "hurry",
        "exclusive offer",
        "click link",
        "don't miss",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for GuardPolicy {
    fn default() -> Self {
        GuardPolicy {
            drift_threshold: default_threshold(),
            denied_phrases: default_denied_phrases(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MissionConfig {
    /// Shared secret for audit-record signatures. Real deployments override
    /// this; the default keeps local runs verifiable out of the box.
    #[serde(default = "default_secret")]
    pub secret: String,
    #[serde(default)]
    pub guard: GuardPolicy,
    #[serde(default = "default_fleet", rename = "account")]
    pub accounts: Vec<AccountConfig>,
}

fn default_secret() -> String {
    "LAKHAN-BHAI-INSTITUTIONAL-SECRET".to_string()
}

fn default_fleet() -> Vec<AccountConfig> {
    [
        ("MythicWisdom", "Mythology", "123456789"),
        ("DharmaDotes", "Dharma", "234567890"),
        ("KarmaKronicles", "Karma", "345678901"),
        ("ConsciousQuotes", "Consciousness", "456789012"),
        ("CrystalVibesHub", "Crystals", "567890123"),
        ("WeAreOneGlobal", "Global Unity", "678901234"),
        ("SacredGeometry", "Sacred Geometry", "789012345"),
    ]
    .iter()
    .map(|(name, category, id)| AccountConfig {
        name: name.to_string(),
        category: category.to_string(),
        platform_id: id.to_string(),
    })
    .collect()
}

impl Default for MissionConfig {
    fn default() -> Self {
        MissionConfig {
            secret: default_secret(),
            guard: GuardPolicy::default(),
            accounts: default_fleet(),
        }
    }
}

/// Load config from `<dir>/missions.toml`.
///
/// No file = no overrides (not an error); a file that fails to parse is a
/// config error rather than a silent fallback.
pub fn load_config(dir: &Path) -> Result<MissionConfig, MissionError> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(MissionConfig::default());
    }
    let content = fs::read_to_string(&path).map_err(MissionError::IoError)?;
    toml::from_str(&content).map_err(|e| MissionError::ConfigError(e.to_string()))
}
