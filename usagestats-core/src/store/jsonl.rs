use crate::store::{MetricsStore, StoreError};
use crate::types::{LoadId, MetricRecord};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Metric rows persisted as one JSON object per line.
///
/// Rows are held in memory and written out on [`MetricsStore::flush`] by
/// replacing the file, so a crash mid-write leaves the previous contents.
#[derive(Debug)]
pub struct JsonlMetricsStore {
    path: PathBuf,
    records: Vec<MetricRecord>,
    dirty: bool,
    /// Rows and dirty flag as of the last `begin`.
    checkpoint: Option<(Vec<MetricRecord>, bool)>,
}

impl JsonlMetricsStore {
    /// Opens the store, starting empty when the file does not exist yet.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let records = match File::open(path) {
            Ok(file) => read_records(path, file)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(StoreError::read(path, e)),
        };

        Ok(Self {
            path: path.to_path_buf(),
            records,
            dirty: false,
            checkpoint: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_all(&self) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| StoreError::write(dir, e))?;

        let tmp = NamedTempFile::new_in(dir).map_err(|e| StoreError::write(dir, e))?;
        {
            let mut out = BufWriter::new(tmp.as_file());
            for record in &self.records {
                serde_json::to_writer(&mut out, record)?;
                out.write_all(b"\n")
                    .map_err(|e| StoreError::write(tmp.path(), e))?;
            }
            out.flush().map_err(|e| StoreError::write(tmp.path(), e))?;
        }

        tmp.persist(&self.path)
            .map_err(|e| StoreError::write(&self.path, e.error))?;
        Ok(())
    }
}

fn read_records(path: &Path, file: File) -> Result<Vec<MetricRecord>, StoreError> {
    let mut records = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| StoreError::read(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|source| StoreError::Decode {
            path: path.to_path_buf(),
            line: idx + 1,
            source,
        })?;
        records.push(record);
    }
    Ok(records)
}

impl MetricsStore for JsonlMetricsStore {
    fn begin(&mut self) {
        self.checkpoint = Some((self.records.clone(), self.dirty));
    }

    fn rollback(&mut self) {
        if let Some((records, dirty)) = self.checkpoint.take() {
            self.records = records;
            self.dirty = dirty;
        }
    }

    fn purge_load_batch(&mut self, load_id: &LoadId) -> Result<usize, StoreError> {
        let before = self.records.len();
        self.records.retain(|r| &r.load_id != load_id);
        let purged = before - self.records.len();
        self.dirty |= purged > 0;
        Ok(purged)
    }

    fn insert_record(&mut self, record: MetricRecord) -> Result<(), StoreError> {
        self.records.push(record);
        self.dirty = true;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        if self.dirty {
            self.write_all()?;
            self.dirty = false;
        }
        self.checkpoint = None;
        Ok(())
    }

    fn records(&self) -> &[MetricRecord] {
        &self.records
    }
}
