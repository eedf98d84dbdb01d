use crate::store::tests::test_helpers::metric_record;
use crate::store::{JsonlMetricsStore, MetricsStore, StoreError};
use crate::types::LoadId;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

#[test]
fn missing_file_opens_empty() {
    // Arrange
    let dir = tempdir().unwrap();

    // Act
    let store = JsonlMetricsStore::open(&dir.path().join("metrics.jsonl")).unwrap();

    // Assert
    assert!(store.records().is_empty());
}

#[test]
fn flushed_records_survive_reopen() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("metrics.jsonl");
    let mut store = JsonlMetricsStore::open(&path).unwrap();
    store.insert_record(metric_record("a.log", 1)).unwrap();
    store.insert_record(metric_record("a.log", 2)).unwrap();

    // Act
    store.flush().unwrap();
    let reopened = JsonlMetricsStore::open(&path).unwrap();

    // Assert
    assert_eq!(reopened.records(), &[metric_record("a.log", 1), metric_record("a.log", 2)]);
    assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 2);
}

#[test]
fn unflushed_records_are_not_written() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("metrics.jsonl");
    let mut store = JsonlMetricsStore::open(&path).unwrap();

    store.insert_record(metric_record("a.log", 1)).unwrap();

    assert!(!path.exists());
}

#[test]
fn purge_then_flush_rewrites_the_file() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("metrics.jsonl");
    let mut store = JsonlMetricsStore::open(&path).unwrap();
    store.insert_record(metric_record("a.log", 1)).unwrap();
    store.insert_record(metric_record("b.log", 2)).unwrap();
    store.flush().unwrap();

    // Act
    store.purge_load_batch(&LoadId("a.log".to_string())).unwrap();
    store.flush().unwrap();

    // Assert
    let reopened = JsonlMetricsStore::open(&path).unwrap();
    assert_eq!(reopened.records(), &[metric_record("b.log", 2)]);
}

#[test]
fn records_are_written_with_metric_type_tag() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("metrics.jsonl");
    let mut store = JsonlMetricsStore::open(&path).unwrap();

    store.insert_record(metric_record("a.log", 1)).unwrap();
    store.flush().unwrap();

    let line = fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
    assert_eq!(json["metric_type"], "ojs::counter");
    assert_eq!(json["load_id"], "a.log");
    assert_eq!(json["assoc_type"], "galley");
    assert_eq!(json["file_type"], "pdf");
}

#[test]
fn malformed_line_reports_its_position() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("metrics.jsonl");
    fs::write(&path, "\n{not json}\n").unwrap();

    let err = JsonlMetricsStore::open(&path).unwrap_err();

    assert!(matches!(err, StoreError::Decode { line: 2, .. }));
}

#[test]
fn rollback_discards_writes_since_begin() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("metrics.jsonl");
    let mut store = JsonlMetricsStore::open(&path).unwrap();
    store.insert_record(metric_record("a.log", 1)).unwrap();
    store.flush().unwrap();

    // Act
    store.begin();
    store.purge_load_batch(&LoadId("a.log".to_string())).unwrap();
    store.insert_record(metric_record("b.log", 2)).unwrap();
    store.rollback();
    store.flush().unwrap();

    // Assert
    assert_eq!(store.records(), &[metric_record("a.log", 1)]);
    let reopened = JsonlMetricsStore::open(&path).unwrap();
    assert_eq!(reopened.records(), &[metric_record("a.log", 1)]);
}

#[test]
fn rollback_after_flush_keeps_flushed_rows() {
    let dir = tempdir().unwrap();
    let mut store = JsonlMetricsStore::open(&dir.path().join("metrics.jsonl")).unwrap();

    store.begin();
    store.insert_record(metric_record("a.log", 1)).unwrap();
    store.flush().unwrap();
    store.rollback();

    assert_eq!(store.records(), &[metric_record("a.log", 1)]);
}
