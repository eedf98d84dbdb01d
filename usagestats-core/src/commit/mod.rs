#[cfg(test)]
mod tests;

use crate::store::{MetricsStore, StagingStore, StoreError};
use crate::types::{LoadId, MetricRecord, MetricType, StagingRecord};

/// Replaces the permanent rows of a load with its staged rows.
///
/// Committing the same load twice leaves exactly one copy of its rows.
#[derive(Debug, Clone, Copy)]
pub struct LoadCommitter {
    metric_type: MetricType,
}

impl Default for LoadCommitter {
    fn default() -> Self {
        Self {
            metric_type: MetricType::Counter,
        }
    }
}

impl LoadCommitter {
    pub fn new(metric_type: MetricType) -> Self {
        Self { metric_type }
    }

    /// Returns the number of rows written.
    ///
    /// On failure the metrics store is rolled back to its state before the
    /// purge and the drained rows are put back so staging still holds the load.
    pub fn commit(
        &self,
        staging: &mut dyn StagingStore,
        metrics: &mut dyn MetricsStore,
        load_id: &LoadId,
    ) -> Result<usize, StoreError> {
        let rows = staging.drain(load_id)?;

        metrics.begin();
        match self.persist(metrics, load_id, &rows) {
            Ok(written) => Ok(written),
            Err(e) => {
                metrics.rollback();
                for row in rows {
                    staging.insert(row)?;
                }
                Err(e)
            }
        }
    }

    fn persist(
        &self,
        metrics: &mut dyn MetricsStore,
        load_id: &LoadId,
        rows: &[StagingRecord],
    ) -> Result<usize, StoreError> {
        let purged = metrics.purge_load_batch(load_id)?;
        if purged > 0 {
            tracing::debug!(load_id = %load_id, purged, "replacing previously committed rows");
        }

        for row in rows {
            metrics.insert_record(MetricRecord::from_staging(row.clone(), self.metric_type))?;
        }

        metrics.flush()?;
        Ok(rows.len())
    }
}
