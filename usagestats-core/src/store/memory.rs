use crate::store::{MetricsStore, StoreError};
use crate::types::{LoadId, MetricRecord};

#[derive(Debug, Default)]
pub struct MemoryMetricsStore {
    records: Vec<MetricRecord>,
    checkpoint: Option<Vec<MetricRecord>>,
}

impl MemoryMetricsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MetricsStore for MemoryMetricsStore {
    fn begin(&mut self) {
        self.checkpoint = Some(self.records.clone());
    }

    fn rollback(&mut self) {
        if let Some(records) = self.checkpoint.take() {
            self.records = records;
        }
    }

    fn purge_load_batch(&mut self, load_id: &LoadId) -> Result<usize, StoreError> {
        let before = self.records.len();
        self.records.retain(|r| &r.load_id != load_id);
        Ok(before - self.records.len())
    }

    fn insert_record(&mut self, record: MetricRecord) -> Result<(), StoreError> {
        self.records.push(record);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        self.checkpoint = None;
        Ok(())
    }

    fn records(&self) -> &[MetricRecord] {
        &self.records
    }
}
