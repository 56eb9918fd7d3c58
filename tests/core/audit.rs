use chrono::Utc;
use missionctl::core::audit::{AuditLog, AuditRecord, SystemStatus};
use missionctl::core::store::Store;
use missionctl::core::timeline;
use serde_json::json;
use tempfile::tempdir;

#[test]
fn test_append_writes_one_json_line_per_record() {
    let tmp = tempdir().unwrap();
    let store = Store::new(tmp.path());
    let log = AuditLog::new(store.clone(), "secret");

    log.append("CONTENT_AUDIT", json!({"id": "M-001", "status": "APPROVED"}), true)
        .unwrap();
    log.append("MISSION_PREPARED", json!({"id": "M-002"}), true)
        .unwrap();

    let path = store.events_path(Utc::now());
    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    for line in &lines {
        let record: AuditRecord = serde_json::from_str(line).unwrap();
        assert!(record.signature.starts_with("sha256="));
        assert_eq!(record.system_status, SystemStatus::Verified);
    }
}

#[test]
fn test_signature_roundtrip_and_tamper_detection() {
    let tmp = tempdir().unwrap();
    let log = AuditLog::new(Store::new(tmp.path()), "secret");

    let record = log
        .append("MISSION_PREPARED", json!({"page": "MythicWisdom", "z_score": 1.17}), true)
        .unwrap();
    assert!(log.verify(&record));

    // Mutating any metadata value must break the match.
    let mut tampered = record.clone();
    tampered.metadata["z_score"] = json!(1.99);
    assert!(!log.verify(&tampered));

    let mut renamed = record.clone();
    renamed.metadata["page"] = json!("DharmaDotes");
    assert!(!log.verify(&renamed));
}

#[test]
fn test_halted_state_is_stamped_on_records() {
    let tmp = tempdir().unwrap();
    let log = AuditLog::new(Store::new(tmp.path()), "secret");

    let record = log.append("MISSION_REJECTED", json!({"id": "M-999"}), false).unwrap();
    assert_eq!(record.system_status, SystemStatus::Halted);
    // Status is outside the signed payload; it reflects the guard, not the
    // metadata.
    assert!(log.verify(&record));
}

#[test]
fn test_append_is_append_only_across_instances() {
    let tmp = tempdir().unwrap();
    let store = Store::new(tmp.path());

    AuditLog::new(store.clone(), "secret")
        .append("FIRST", json!({}), true)
        .unwrap();
    AuditLog::new(store.clone(), "secret")
        .append("SECOND", json!({}), true)
        .unwrap();

    let content = std::fs::read_to_string(store.events_path(Utc::now())).unwrap();
    let actions: Vec<String> = content
        .lines()
        .map(|l| serde_json::from_str::<AuditRecord>(l).unwrap().action)
        .collect();
    assert_eq!(actions, vec!["FIRST", "SECOND"]);
}

#[test]
fn test_verify_trail_detects_edited_file() {
    let tmp = tempdir().unwrap();
    let store = Store::new(tmp.path());
    let log = AuditLog::new(store.clone(), "secret");
    log.append("MISSION_PREPARED", json!({"id": "M-001"}), true)
        .unwrap();

    let summary = timeline::verify_trail(&store, "secret").unwrap();
    assert!(summary.all_valid());

    // Edit the metadata on disk without re-signing.
    let path = store.events_path(Utc::now());
    let edited = std::fs::read_to_string(&path).unwrap().replace("M-001", "M-666");
    std::fs::write(&path, edited).unwrap();

    let summary = timeline::verify_trail(&store, "secret").unwrap();
    assert!(!summary.all_valid());
    assert_eq!(summary.invalid.len(), 1);
}

#[test]
fn test_timeline_reports_unparseable_lines_as_gaps() {
    let tmp = tempdir().unwrap();
    let store = Store::new(tmp.path());
    let log = AuditLog::new(store.clone(), "secret");
    log.append("MISSION_PREPARED", json!({"id": "M-001"}), true)
        .unwrap();

    // Corrupt the file with a trailing garbage line.
    use std::io::Write;
    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .open(store.events_path(Utc::now()))
        .unwrap();
    writeln!(file, "{{not json").unwrap();

    let timeline = timeline::collect_timeline(&store, 100).unwrap();
    assert_eq!(timeline.event_count, 1);
    assert_eq!(timeline.gaps.len(), 1);
}
