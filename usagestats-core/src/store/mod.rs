//! Staging and permanent storage of usage records.

mod error;
mod jsonl;
mod memory;
mod staging;
#[cfg(test)]
pub(crate) mod tests;

pub use error::StoreError;
pub use jsonl::JsonlMetricsStore;
pub use memory::MemoryMetricsStore;
pub use staging::MemoryStagingStore;

use crate::types::{AssocType, LoadId, MetricRecord, StagingRecord};

/// Temporary rows of the load currently being processed.
pub trait StagingStore {
    /// Returns the number of rows removed.
    fn delete_by_load(&mut self, load_id: &LoadId) -> Result<usize, StoreError>;

    fn insert(&mut self, record: StagingRecord) -> Result<(), StoreError>;

    /// Removes the most recently inserted row matching the key within the load.
    /// Returns whether a row was removed.
    fn delete_record(
        &mut self,
        assoc_type: AssocType,
        assoc_id: u64,
        ip: &str,
        load_id: &LoadId,
    ) -> Result<bool, StoreError>;

    /// Removes and returns every row of the load, in insertion order.
    fn drain(&mut self, load_id: &LoadId) -> Result<Vec<StagingRecord>, StoreError>;
}

/// Permanent usage-event rows, replaced one load batch at a time.
///
/// A batch runs between [`MetricsStore::begin`] and a successful
/// [`MetricsStore::flush`]. [`MetricsStore::rollback`] discards every write
/// made since `begin`, so a failed batch never reaches a later flush.
pub trait MetricsStore {
    fn begin(&mut self) {}

    fn rollback(&mut self) {}

    /// Removes every row tagged with the load id. Returns the number removed.
    fn purge_load_batch(&mut self, load_id: &LoadId) -> Result<usize, StoreError>;

    fn insert_record(&mut self, record: MetricRecord) -> Result<(), StoreError>;

    /// Makes the writes since the last flush durable.
    fn flush(&mut self) -> Result<(), StoreError> {
        Ok(())
    }

    fn records(&self) -> &[MetricRecord];
}
