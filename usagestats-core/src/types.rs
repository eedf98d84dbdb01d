use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// The kind of scholarly object a usage event targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssocType {
    Article,
    Galley,
    Issue,
    IssueGalley,
}

impl AssocType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssocType::Article => "article",
            AssocType::Galley => "galley",
            AssocType::Issue => "issue",
            AssocType::IssueGalley => "issue_galley",
        }
    }

    /// The type a URL addressing a child of this type narrows to.
    pub fn child(&self) -> Option<AssocType> {
        match self {
            AssocType::Article => Some(AssocType::Galley),
            AssocType::Issue => Some(AssocType::IssueGalley),
            AssocType::Galley | AssocType::IssueGalley => None,
        }
    }
}

impl fmt::Display for AssocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content type of a resolved galley. Accesses to non-galley objects carry no file type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Pdf,
    Html,
    Other,
}

/// Metric stream tag written on every permanent row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricType {
    #[serde(rename = "ojs::counter")]
    Counter,
}

impl MetricType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricType::Counter => "ojs::counter",
        }
    }
}

/// Identifies one staging batch and one permanent-store transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoadId(pub String);

impl LoadId {
    /// The load id of a file is its base name, so re-processing the same file
    /// always targets the same batch.
    pub fn from_path(path: &Path) -> LoadId {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        LoadId(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LoadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One parsed access-log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub ip: String,
    /// Seconds since the epoch; `None` when the date field could not be read.
    pub timestamp: Option<i64>,
    /// Request target, percent-decoded and rewritten to path form.
    pub url: String,
    pub return_code: String,
    pub user_agent: String,
}

/// A countable access produced by URL resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedAccess {
    pub assoc_type: AssocType,
    pub assoc_id: u64,
    pub journal_id: u64,
    pub file_type: Option<FileType>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// e.g., US, GB, etc
    pub country_code: Option<String>,
    pub region: Option<String>,
    pub city_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagingRecord {
    pub load_id: LoadId,
    pub assoc_type: AssocType,
    pub assoc_id: u64,
    /// YYYYMMDD
    pub day: String,
    pub country_code: Option<String>,
    pub region: Option<String>,
    pub city_name: Option<String>,
    pub file_type: Option<FileType>,
    /// Requesting address; scopes double-click deletes, never persisted.
    pub ip: String,
}

/// A permanent usage-event row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub load_id: LoadId,
    pub metric_type: MetricType,
    pub assoc_type: AssocType,
    pub assoc_id: u64,
    pub day: String,
    pub country_code: Option<String>,
    pub region: Option<String>,
    pub city_name: Option<String>,
    pub file_type: Option<FileType>,
}

impl MetricRecord {
    pub fn from_staging(record: StagingRecord, metric_type: MetricType) -> MetricRecord {
        MetricRecord {
            load_id: record.load_id,
            metric_type,
            assoc_type: record.assoc_type,
            assoc_id: record.assoc_id,
            day: record.day,
            country_code: record.country_code,
            region: record.region,
            city_name: record.city_name,
            file_type: record.file_type,
        }
    }
}
