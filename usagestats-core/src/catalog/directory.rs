use crate::catalog::{Journal, JournalLookup};
use ahash::AHashMap;

/// Journals by URL path, built once per run.
#[derive(Debug, Clone, Default)]
pub struct JournalDirectory {
    by_path: AHashMap<String, Journal>,
}

impl JournalDirectory {
    pub fn build(lookup: &dyn JournalLookup) -> Self {
        Self::from_journals(lookup.all_journals())
    }

    pub fn from_journals(journals: impl IntoIterator<Item = Journal>) -> Self {
        let by_path = journals
            .into_iter()
            .map(|j| (j.path.clone(), j))
            .collect();
        Self { by_path }
    }

    pub fn get(&self, path: &str) -> Option<&Journal> {
        self.by_path.get(path)
    }

    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }
}
