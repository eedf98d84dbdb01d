use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use usagestats_core::conf::{RuntimeConfig, load_config};
use usagestats_core::loader::FileLoader;
use usagestats_core::pipeline::Pipeline;
use usagestats_core::store::{JsonlMetricsStore, MetricsStore};
use usagestats_core::types::MetricRecord;

/// A fixture config directory copied into a temp dir, so runs can move files
/// and write metrics without touching the checked-in fixtures.
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    pub fn from_fixture(name: &str) -> Self {
        let fixture = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("fixtures")
            .join(name);

        let dir = TempDir::new().expect("failed to create temp dir");
        copy_dir(&fixture, dir.path());

        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn config(&self) -> RuntimeConfig {
        load_config(self.root()).expect("fixture config loads")
    }

    pub fn loader(&self) -> FileLoader {
        let loader = FileLoader::new(&self.config().files_dir);
        loader.ensure_dirs().expect("failed to create loader dirs");
        loader
    }

    pub fn pipeline(&self) -> Pipeline {
        Pipeline::from_config(&self.config()).expect("fixture pipeline builds")
    }

    /// Writes a log file into the stage directory.
    pub fn stage(&self, name: &str, lines: &[&str]) -> PathBuf {
        let path = self.loader().stage_dir().join(name);
        fs::write(&path, lines.join("\n")).expect("failed to stage file");
        path
    }

    /// Committed rows as persisted on disk.
    pub fn committed(&self) -> Vec<MetricRecord> {
        JsonlMetricsStore::open(&self.config().metrics_path)
            .expect("metrics store opens")
            .records()
            .to_vec()
    }
}

fn copy_dir(from: &Path, to: &Path) {
    fs::create_dir_all(to).expect("failed to create dir");
    for entry in fs::read_dir(from).expect("fixture dir exists") {
        let entry = entry.unwrap();
        let target = to.join(entry.file_name());
        if entry.path().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), &target).expect("failed to copy fixture");
        }
    }
}
