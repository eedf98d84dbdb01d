//! Batch file acquisition.
//!
//! Files are dropped into `stage/`, claimed into `processing/` by rename, and
//! end up in `archive/` once committed or `reject/` when unreadable or invalid.
//! A file whose commit failed goes back to `stage/` for the next run, as does
//! anything a previous run left behind in `processing/`.

mod error;

pub use error::LoaderError;

use crate::conf::discover;
use crate::pipeline::{LoadOutcome, Pipeline};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const STAGE_DIR: &str = "stage";
pub const PROCESSING_DIR: &str = "processing";
pub const ARCHIVE_DIR: &str = "archive";
pub const REJECT_DIR: &str = "reject";

/// Where a file ended up after a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Archived,
    Rejected,
    Returned,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub archived: Vec<PathBuf>,
    pub rejected: Vec<PathBuf>,
    pub returned: Vec<PathBuf>,
    /// Files moved from `processing/` back to `stage/` at the start of the run.
    pub recovered: Vec<PathBuf>,
    /// Processed files that could not be moved out of `processing/`.
    pub unsettled: Vec<PathBuf>,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.archived.len() + self.rejected.len() + self.returned.len() + self.unsettled.len()
    }

    fn record(&mut self, disposition: Disposition, path: PathBuf) {
        match disposition {
            Disposition::Archived => self.archived.push(path),
            Disposition::Rejected => self.rejected.push(path),
            Disposition::Returned => self.returned.push(path),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileLoader {
    stage: PathBuf,
    processing: PathBuf,
    archive: PathBuf,
    reject: PathBuf,
}

impl FileLoader {
    pub fn new(files_dir: &Path) -> Self {
        Self {
            stage: files_dir.join(STAGE_DIR),
            processing: files_dir.join(PROCESSING_DIR),
            archive: files_dir.join(ARCHIVE_DIR),
            reject: files_dir.join(REJECT_DIR),
        }
    }

    pub fn stage_dir(&self) -> &Path {
        &self.stage
    }

    pub fn processing_dir(&self) -> &Path {
        &self.processing
    }

    pub fn archive_dir(&self) -> &Path {
        &self.archive
    }

    pub fn reject_dir(&self) -> &Path {
        &self.reject
    }

    pub fn ensure_dirs(&self) -> Result<(), LoaderError> {
        for dir in [&self.stage, &self.processing, &self.archive, &self.reject] {
            fs::create_dir_all(dir).map_err(|source| LoaderError::CreateDir {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(())
    }

    /// Staged files, sorted by name.
    pub fn staged_files(&self) -> Result<Vec<PathBuf>, LoaderError> {
        Ok(discover(&self.stage, "*")?)
    }

    /// Moves a staged file into `processing/`.
    ///
    /// Returns `None` when the file is gone, i.e. another run claimed it first.
    pub fn claim(&self, staged: &Path) -> Result<Option<PathBuf>, LoaderError> {
        let Some(name) = staged.file_name() else {
            return Ok(None);
        };
        let claimed = self.processing.join(name);

        match fs::rename(staged, &claimed) {
            Ok(()) => Ok(Some(claimed)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(LoaderError::Move {
                from: staged.to_path_buf(),
                to: claimed,
                source,
            }),
        }
    }

    /// Moves files left in `processing/` by an interrupted run back to `stage/`.
    ///
    /// A file whose name is already staged again stays where it is.
    pub fn recover_processing(&self) -> Result<Vec<PathBuf>, LoaderError> {
        let mut recovered = Vec::new();

        for leftover in discover(&self.processing, "*")? {
            let Some(name) = leftover.file_name() else {
                continue;
            };
            let target = self.stage.join(name);
            if target.exists() {
                tracing::warn!(file = %leftover.display(), "not recovering, a file of the same name is staged");
                continue;
            }

            match fs::rename(&leftover, &target) {
                Ok(()) => {
                    tracing::warn!(file = %target.display(), "recovered file from an interrupted run");
                    recovered.push(target);
                }
                Err(e) => {
                    tracing::error!(file = %leftover.display(), error = %e, "failed to recover file");
                }
            }
        }

        Ok(recovered)
    }

    /// Processes every staged file, one at a time.
    pub fn run(&self, pipeline: &mut Pipeline) -> Result<RunSummary, LoaderError> {
        self.ensure_dirs()?;
        let mut summary = RunSummary {
            recovered: self.recover_processing()?,
            ..RunSummary::default()
        };

        for staged in self.staged_files()? {
            let Some(claimed) = self.claim(&staged)? else {
                tracing::debug!(file = %staged.display(), "already claimed");
                continue;
            };

            let disposition = self.process_claimed(pipeline, &claimed);
            match self.settle(&claimed, disposition) {
                Ok(settled) => summary.record(disposition, settled),
                Err(e) => {
                    tracing::error!(file = %claimed.display(), ?disposition, error = %e, "failed to settle file");
                    summary.unsettled.push(claimed);
                }
            }
        }

        tracing::info!(
            archived = summary.archived.len(),
            rejected = summary.rejected.len(),
            returned = summary.returned.len(),
            recovered = summary.recovered.len(),
            unsettled = summary.unsettled.len(),
            "run finished"
        );
        Ok(summary)
    }

    fn process_claimed(&self, pipeline: &mut Pipeline, claimed: &Path) -> Disposition {
        match pipeline.process_file(claimed) {
            Ok(report) => match report.outcome {
                LoadOutcome::Committed => Disposition::Archived,
                LoadOutcome::RetryLater => {
                    tracing::warn!(file = %claimed.display(), "returning file to stage");
                    Disposition::Returned
                }
            },
            Err(e) => {
                tracing::error!(file = %claimed.display(), error = %e, "file rejected");
                Disposition::Rejected
            }
        }
    }

    /// Moves a claimed file to its final directory and returns the new path.
    pub fn settle(&self, claimed: &Path, disposition: Disposition) -> Result<PathBuf, LoaderError> {
        let dir = match disposition {
            Disposition::Archived => &self.archive,
            Disposition::Rejected => &self.reject,
            Disposition::Returned => &self.stage,
        };
        let target = match claimed.file_name() {
            Some(name) => dir.join(name),
            None => dir.clone(),
        };

        fs::rename(claimed, &target).map_err(|source| LoaderError::Move {
            from: claimed.to_path_buf(),
            to: target.clone(),
            source,
        })?;
        Ok(target)
    }
}
