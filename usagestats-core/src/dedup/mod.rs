//! COUNTER double-click filtering.
//!
//! Two requests for the same object from the same address within the
//! threshold count once: the earlier staged row is replaced by the later one.


use crate::store::{StagingStore, StoreError};
use crate::types::{AssocType, FileType, StagingRecord};
use ahash::AHashMap;

/// Longest threshold; state older than this can never match again.
pub const MAX_THRESHOLD: i64 = 30;
pub const HTML_THRESHOLD: i64 = 10;
pub const OTHER_THRESHOLD: i64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub assoc_type: AssocType,
    pub assoc_id: u64,
    pub ip: String,
}

impl DedupKey {
    pub fn of(record: &StagingRecord) -> DedupKey {
        DedupKey {
            assoc_type: record.assoc_type,
            assoc_id: record.assoc_id,
            ip: record.ip.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupVerdict {
    New,
    /// Replaces the previous access of the same key.
    DoubleClick,
}

/// Seconds two accesses must be apart to count separately.
pub fn threshold_for(file_type: Option<FileType>) -> i64 {
    match file_type {
        None | Some(FileType::Html) => HTML_THRESHOLD,
        Some(FileType::Pdf) | Some(FileType::Other) => OTHER_THRESHOLD,
    }
}

/// Last-seen time per key for the file being processed.
#[derive(Debug, Default)]
pub struct DoubleClickFilter {
    last_seen: AHashMap<DedupKey, i64>,
}

impl DoubleClickFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an access at `now` and classifies it.
    ///
    /// The window slides: every access refreshes the key, so a steady burst
    /// collapses into its last access no matter how long it runs.
    pub fn observe(&mut self, key: DedupKey, file_type: Option<FileType>, now: i64) -> DedupVerdict {
        self.sweep(now);

        let verdict = match self.last_seen.get(&key) {
            Some(last) if now - last < threshold_for(file_type) => DedupVerdict::DoubleClick,
            _ => DedupVerdict::New,
        };

        self.last_seen.insert(key, now);
        verdict
    }

    /// Applies [`observe`](Self::observe) to a staging row: a double click removes
    /// the previously staged row of the key, then the new row is staged.
    pub fn stage(
        &mut self,
        staging: &mut dyn StagingStore,
        record: StagingRecord,
        now: i64,
    ) -> Result<DedupVerdict, StoreError> {
        let verdict = self.observe(DedupKey::of(&record), record.file_type, now);

        if verdict == DedupVerdict::DoubleClick {
            let removed =
                staging.delete_record(record.assoc_type, record.assoc_id, &record.ip, &record.load_id)?;
            if !removed {
                tracing::debug!(assoc_type = %record.assoc_type, assoc_id = record.assoc_id, "double click without a staged row");
            }
        }

        staging.insert(record)?;
        Ok(verdict)
    }

    pub fn len(&self) -> usize {
        self.last_seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_seen.is_empty()
    }

    pub fn clear(&mut self) {
        self.last_seen.clear();
    }

    fn sweep(&mut self, now: i64) {
        self.last_seen.retain(|_, last| *last + MAX_THRESHOLD >= now);
    }
}
