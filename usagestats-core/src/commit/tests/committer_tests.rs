use crate::commit::LoadCommitter;
use crate::store::tests::test_helpers::staging_record;
use crate::store::{
    JsonlMetricsStore, MemoryMetricsStore, MemoryStagingStore, MetricsStore, StagingStore, StoreError,
};
use crate::types::{LoadId, MetricRecord, MetricType};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

fn load() -> LoadId {
    LoadId("access.log".to_string())
}

fn staged(ids: &[u64]) -> MemoryStagingStore {
    let mut staging = MemoryStagingStore::new();
    for id in ids {
        staging.insert(staging_record("access.log", *id, "10.0.0.1")).unwrap();
    }
    staging
}

/// Accepts writes but fails every flush.
#[derive(Default)]
struct UnavailableStore {
    records: Vec<MetricRecord>,
}

impl MetricsStore for UnavailableStore {
    fn purge_load_batch(&mut self, _load_id: &LoadId) -> Result<usize, StoreError> {
        Ok(0)
    }

    fn insert_record(&mut self, record: MetricRecord) -> Result<(), StoreError> {
        self.records.push(record);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    fn records(&self) -> &[MetricRecord] {
        &self.records
    }
}

#[test]
fn commit_moves_staged_rows_into_metrics() {
    // Arrange
    let mut staging = staged(&[1, 2]);
    let mut metrics = MemoryMetricsStore::new();

    // Act
    let written = LoadCommitter::default()
        .commit(&mut staging, &mut metrics, &load())
        .unwrap();

    // Assert
    assert_eq!(written, 2);
    assert!(staging.is_empty());
    let ids: Vec<u64> = metrics.records().iter().map(|r| r.assoc_id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert!(metrics.records().iter().all(|r| r.metric_type == MetricType::Counter));
}

#[test]
fn recommitting_a_load_replaces_its_rows() {
    // Arrange
    let mut metrics = MemoryMetricsStore::new();
    let committer = LoadCommitter::default();
    committer.commit(&mut staged(&[1, 2]), &mut metrics, &load()).unwrap();

    // Act
    committer.commit(&mut staged(&[1, 2]), &mut metrics, &load()).unwrap();

    // Assert
    assert_eq!(metrics.records().len(), 2);
}

#[test]
fn commit_leaves_other_loads_untouched() {
    let mut metrics = MemoryMetricsStore::new();
    let mut other = MemoryStagingStore::new();
    other.insert(staging_record("other.log", 9, "10.0.0.1")).unwrap();
    let committer = LoadCommitter::default();
    committer
        .commit(&mut other, &mut metrics, &LoadId("other.log".to_string()))
        .unwrap();

    committer.commit(&mut staged(&[1]), &mut metrics, &load()).unwrap();

    assert_eq!(metrics.records().len(), 2);
}

#[test]
fn failed_commit_keeps_staging() {
    // Arrange
    let mut staging = staged(&[1, 2, 3]);
    let mut metrics = UnavailableStore::default();

    // Act
    let result = LoadCommitter::default().commit(&mut staging, &mut metrics, &load());

    // Assert
    assert!(matches!(result, Err(StoreError::Unavailable(_))));
    let ids: Vec<u64> = staging.rows_for(&load()).map(|r| r.assoc_id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn failed_flush_never_reaches_a_later_commit() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("metrics.jsonl");
    let mut metrics = JsonlMetricsStore::open(&path).unwrap();
    let committer = LoadCommitter::default();
    let failed = LoadId("a.log".to_string());
    let mut staging_a = MemoryStagingStore::new();
    staging_a.insert(staging_record("a.log", 1, "10.0.0.1")).unwrap();

    // A directory in place of the file makes the rename in flush fail.
    fs::create_dir(&path).unwrap();
    assert!(committer.commit(&mut staging_a, &mut metrics, &failed).is_err());
    fs::remove_dir(&path).unwrap();

    let mut staging_b = MemoryStagingStore::new();
    staging_b.insert(staging_record("b.log", 2, "10.0.0.1")).unwrap();

    // Act
    committer
        .commit(&mut staging_b, &mut metrics, &LoadId("b.log".to_string()))
        .unwrap();

    // Assert
    let reopened = JsonlMetricsStore::open(&path).unwrap();
    let loads: Vec<&str> = reopened.records().iter().map(|r| r.load_id.as_str()).collect();
    assert_eq!(loads, vec!["b.log"]);
    assert_eq!(staging_a.rows_for(&failed).count(), 1);
}

#[test]
fn failed_commit_restores_previous_rows_of_the_load() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("metrics.jsonl");
    let mut metrics = JsonlMetricsStore::open(&path).unwrap();
    let committer = LoadCommitter::default();
    committer.commit(&mut staged(&[1, 2]), &mut metrics, &load()).unwrap();
    fs::remove_file(&path).unwrap();
    fs::create_dir(&path).unwrap();

    // Act
    let result = committer.commit(&mut staged(&[7]), &mut metrics, &load());

    // Assert
    assert!(matches!(result, Err(StoreError::Write { .. })));
    let ids: Vec<u64> = metrics.records().iter().map(|r| r.assoc_id).collect();
    assert_eq!(ids, vec![1, 2]);
}
