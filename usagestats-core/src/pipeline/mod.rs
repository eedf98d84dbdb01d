//! Per-file transform: parse, validate, filter, resolve, enrich, deduplicate,
//! stage, and commit.

mod error;

pub use error::{ProcessError, SetupError};

use crate::catalog::{InMemoryCatalog, Repositories};
use crate::commit::LoadCommitter;
use crate::conf::RuntimeConfig;
use crate::dedup::{DedupVerdict, DoubleClickFilter};
use crate::enrichment::{GeoLocator, build_geo_locator};
use crate::filter::{FilterDecision, RequestFilter};
use crate::parse::{InvalidEntry, LogParser, day_of, validate_entry};
use crate::resolve::UrlResolver;
use crate::store::{JsonlMetricsStore, MemoryStagingStore, MetricsStore, StagingStore, StoreError};
use crate::types::{LoadId, StagingRecord};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Committed,
    /// A staging or permanent store failed; the file should be tried again.
    RetryLater,
}

/// Line counters for one processed file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileStats {
    pub lines: usize,
    pub blank: usize,
    pub filtered: usize,
    pub unresolved: usize,
    pub double_clicks: usize,
    pub staged: usize,
    pub committed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub load_id: LoadId,
    pub outcome: LoadOutcome,
    pub stats: FileStats,
}

pub struct Pipeline {
    parser: LogParser,
    filter: RequestFilter,
    resolver: UrlResolver,
    geo: Box<dyn GeoLocator>,
    staging: Box<dyn StagingStore>,
    metrics: Box<dyn MetricsStore>,
    committer: LoadCommitter,
}

impl Pipeline {
    pub fn new(
        parser: LogParser,
        filter: RequestFilter,
        resolver: UrlResolver,
        geo: Box<dyn GeoLocator>,
        staging: Box<dyn StagingStore>,
        metrics: Box<dyn MetricsStore>,
    ) -> Self {
        Self {
            parser,
            filter,
            resolver,
            geo,
            staging,
            metrics,
            committer: LoadCommitter::default(),
        }
    }

    /// Wires every stage from configuration: HCL catalog, JSON-lines metrics
    /// store, in-memory staging.
    pub fn from_config(cfg: &RuntimeConfig) -> Result<Self, SetupError> {
        let parser = LogParser::from_config(&cfg.parser)?;
        let filter = RequestFilter::from_config(&cfg.robots)?;

        let catalog = Arc::new(InMemoryCatalog::load(&cfg.catalog_path)?);
        let resolver = UrlResolver::from_repositories(Repositories::from_catalog(catalog));
        tracing::info!(
            catalog = %cfg.catalog_path.display(),
            journals = resolver.directory().len(),
            "catalog loaded"
        );

        let geo = build_geo_locator(&cfg.geoip)?;
        let metrics = JsonlMetricsStore::open(&cfg.metrics_path)?;

        Ok(Self::new(
            parser,
            filter,
            resolver,
            geo,
            Box::new(MemoryStagingStore::new()),
            Box::new(metrics),
        ))
    }

    pub fn metrics(&self) -> &dyn MetricsStore {
        self.metrics.as_ref()
    }

    /// Processes one log file into a committed load batch.
    ///
    /// An unreadable file or any invalid line fails the whole file and nothing
    /// is committed. A staging or commit failure is not an error: it yields
    /// [`LoadOutcome::RetryLater`] and the load's staged rows are discarded.
    pub fn process_file(&mut self, path: &Path) -> Result<FileReport, ProcessError> {
        let load_id = LoadId::from_path(path);
        let file = File::open(path).map_err(|source| ProcessError::OpenFile {
            path: path.to_path_buf(),
            source,
        })?;

        // Leftovers of an earlier failed attempt.
        if let Err(e) = self.staging.delete_by_load(&load_id) {
            tracing::warn!(load_id = %load_id, error = %e, "staging failed, file will be retried");
            return Ok(self.retry_later(load_id, FileStats::default()));
        }

        let mut stats = match self.stage_file(path, file, &load_id) {
            Ok(stats) => stats,
            Err(StageFailure::Store(e)) => {
                tracing::warn!(load_id = %load_id, error = %e, "staging failed, file will be retried");
                return Ok(self.retry_later(load_id, FileStats::default()));
            }
            Err(StageFailure::Reject(e)) => {
                self.discard_staging(&load_id);
                return Err(e);
            }
        };

        match self
            .committer
            .commit(self.staging.as_mut(), self.metrics.as_mut(), &load_id)
        {
            Ok(written) => stats.committed = written,
            Err(e) => {
                tracing::warn!(load_id = %load_id, error = %e, "commit failed, file will be retried");
                return Ok(self.retry_later(load_id, stats));
            }
        }

        Ok(self.report(load_id, LoadOutcome::Committed, stats))
    }

    /// The next attempt re-stages from the file, so nothing staged is kept.
    fn retry_later(&mut self, load_id: LoadId, stats: FileStats) -> FileReport {
        self.discard_staging(&load_id);
        self.report(load_id, LoadOutcome::RetryLater, stats)
    }

    fn discard_staging(&mut self, load_id: &LoadId) {
        if let Err(e) = self.staging.delete_by_load(load_id) {
            tracing::warn!(load_id = %load_id, error = %e, "failed to clear staging");
        }
    }

    fn report(&self, load_id: LoadId, outcome: LoadOutcome, stats: FileStats) -> FileReport {
        tracing::info!(
            load_id = %load_id,
            lines = stats.lines,
            filtered = stats.filtered,
            unresolved = stats.unresolved,
            double_clicks = stats.double_clicks,
            committed = stats.committed,
            outcome = ?outcome,
            "file processed"
        );

        FileReport {
            load_id,
            outcome,
            stats,
        }
    }

    fn stage_file(&mut self, path: &Path, file: File, load_id: &LoadId) -> Result<FileStats, StageFailure> {
        let mut stats = FileStats::default();
        let mut dedup = DoubleClickFilter::new();

        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line_no = idx + 1;
            let line = line.map_err(|source| {
                StageFailure::Reject(ProcessError::ReadLine {
                    path: path.to_path_buf(),
                    line: line_no,
                    source,
                })
            })?;
            stats.lines += 1;

            if line.trim().is_empty() {
                stats.blank += 1;
                continue;
            }

            let invalid = |reason: InvalidEntry| {
                StageFailure::Reject(ProcessError::InvalidEntry {
                    path: path.to_path_buf(),
                    line: line_no,
                    reason,
                })
            };

            let parsed = self.parser.parse_line(&line);
            let now = validate_entry(parsed.as_ref()).map_err(invalid)?;
            let (Some(entry), Some(day)) = (parsed, day_of(now)) else {
                return Err(invalid(InvalidEntry::OutOfRangeTimestamp(now)));
            };

            let decision = self.filter.check(&entry);
            if decision != FilterDecision::Accept {
                tracing::debug!(line = line_no, url = %entry.url, ?decision, "entry filtered");
                stats.filtered += 1;
                continue;
            }

            let Some(access) = self.resolver.resolve(&entry.url) else {
                tracing::debug!(line = line_no, url = %entry.url, "no countable object");
                stats.unresolved += 1;
                continue;
            };

            let geo = self.geo.locate(&entry.ip);
            let record = StagingRecord {
                load_id: load_id.clone(),
                assoc_type: access.assoc_type,
                assoc_id: access.assoc_id,
                day,
                country_code: geo.country_code,
                region: geo.region,
                city_name: geo.city_name,
                file_type: access.file_type,
                ip: entry.ip,
            };

            let verdict = dedup
                .stage(self.staging.as_mut(), record, now)
                .map_err(StageFailure::Store)?;
            if verdict == DedupVerdict::DoubleClick {
                stats.double_clicks += 1;
            } else {
                stats.staged += 1;
            }
        }

        Ok(stats)
    }
}

enum StageFailure {
    Reject(ProcessError),
    Store(StoreError),
}
