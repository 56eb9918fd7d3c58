//! Verifiable audit log: HMAC-signed, append-only, one file per UTC day.
//!
//! Every decision the pipeline makes lands here as one JSON line. The
//! signature covers the canonical form of the metadata (object keys sorted
//! recursively), so an external auditor can recompute it under the shared
//! secret and detect any tampering. Append is the only write operation.

use crate::core::error::MissionError;
use crate::core::store::Store;
use crate::core::time;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::Sha256;
use std::io::Write;

type HmacSha256 = Hmac<Sha256>;

/// Guard status stamped onto each record at append time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SystemStatus {
    #[serde(rename = "VERIFIED")]
    Verified,
    #[serde(rename = "HALTED")]
    Halted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub timestamp: String,
    pub event_id: String,
    pub action: String,
    pub metadata: Value,
    /// `sha256=<hex>` over the canonical metadata.
    pub signature: String,
    pub system_status: SystemStatus,
}

pub struct AuditLog {
    store: Store,
    secret: String,
}

impl AuditLog {
    pub fn new(store: Store, secret: impl Into<String>) -> Self {
        AuditLog {
            store,
            secret: secret.into(),
        }
    }

    /// Sign `metadata` and append one record for `action` to the current
    /// UTC day's event file. `active` is the caller's guard state.
    pub fn append(
        &self,
        action: &str,
        metadata: Value,
        active: bool,
    ) -> Result<AuditRecord, MissionError> {
        let record = AuditRecord {
            timestamp: time::now_rfc3339(),
            event_id: time::new_event_id(),
            action: action.to_string(),
            signature: self.sign(&metadata),
            metadata,
            system_status: if active {
                SystemStatus::Verified
            } else {
                SystemStatus::Halted
            },
        };

        self.store.ensure_audit_dir()?;
        let path = self.store.events_path(Utc::now());
        let line = serde_json::to_string(&record)?;
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(MissionError::IoError)?;
        writeln!(file, "{}", line).map_err(MissionError::IoError)?;

        Ok(record)
    }

    /// `sha256=<hex>` HMAC over the canonical metadata form.
    pub fn sign(&self, metadata: &Value) -> String {
        let payload = canonical_json(metadata);
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(payload.as_bytes());
        format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
    }

    /// Recompute the signature from `record.metadata` and compare it against
    /// the stored one in constant time.
    pub fn verify(&self, record: &AuditRecord) -> bool {
        let Some(hex_sig) = record.signature.strip_prefix("sha256=") else {
            return false;
        };
        let Ok(expected) = hex::decode(hex_sig) else {
            return false;
        };
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(canonical_json(&record.metadata).as_bytes());
        mac.verify_slice(&expected).is_ok()
    }
}

/// Compact JSON with object keys sorted recursively. Array order is
/// preserved (it is semantic).
pub fn canonical_json(value: &Value) -> String {
    serde_json::to_string(&sort_keys(value)).unwrap_or_default()
}

fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let mut sorted = serde_json::Map::new();
            for (k, v) in entries {
                sorted.insert(k.clone(), sort_keys(v));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}
