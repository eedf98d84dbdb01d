use crate::store::tests::test_helpers::metric_record;
use crate::store::{MemoryMetricsStore, MetricsStore};
use crate::types::LoadId;
use pretty_assertions::assert_eq;

#[test]
fn purge_removes_only_the_given_batch() {
    // Arrange
    let mut store = MemoryMetricsStore::new();
    store.insert_record(metric_record("a.log", 1)).unwrap();
    store.insert_record(metric_record("b.log", 2)).unwrap();
    store.insert_record(metric_record("a.log", 3)).unwrap();

    // Act
    let purged = store.purge_load_batch(&LoadId("a.log".to_string())).unwrap();

    // Assert
    assert_eq!(purged, 2);
    assert_eq!(store.records(), &[metric_record("b.log", 2)]);
}

#[test]
fn rollback_restores_rows_as_of_begin() {
    let mut store = MemoryMetricsStore::new();
    store.insert_record(metric_record("a.log", 1)).unwrap();

    store.begin();
    store.purge_load_batch(&LoadId("a.log".to_string())).unwrap();
    store.insert_record(metric_record("a.log", 2)).unwrap();
    store.rollback();

    assert_eq!(store.records(), &[metric_record("a.log", 1)]);
}
