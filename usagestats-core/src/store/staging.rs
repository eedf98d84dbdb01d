use crate::store::{StagingStore, StoreError};
use crate::types::{AssocType, LoadId, StagingRecord};

/// Staging rows kept in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStagingStore {
    rows: Vec<StagingRecord>,
}

impl MemoryStagingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows_for(&self, load_id: &LoadId) -> impl Iterator<Item = &StagingRecord> {
        self.rows.iter().filter(move |r| &r.load_id == load_id)
    }
}

impl StagingStore for MemoryStagingStore {
    fn delete_by_load(&mut self, load_id: &LoadId) -> Result<usize, StoreError> {
        let before = self.rows.len();
        self.rows.retain(|r| &r.load_id != load_id);
        Ok(before - self.rows.len())
    }

    fn insert(&mut self, record: StagingRecord) -> Result<(), StoreError> {
        self.rows.push(record);
        Ok(())
    }

    fn delete_record(
        &mut self,
        assoc_type: AssocType,
        assoc_id: u64,
        ip: &str,
        load_id: &LoadId,
    ) -> Result<bool, StoreError> {
        let latest = self.rows.iter().rposition(|r| {
            r.assoc_type == assoc_type && r.assoc_id == assoc_id && r.ip == ip && &r.load_id == load_id
        });

        match latest {
            Some(idx) => {
                self.rows.remove(idx);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn drain(&mut self, load_id: &LoadId) -> Result<Vec<StagingRecord>, StoreError> {
        let (drained, kept) = std::mem::take(&mut self.rows)
            .into_iter()
            .partition(|r| &r.load_id == load_id);
        self.rows = kept;
        Ok(drained)
    }
}
