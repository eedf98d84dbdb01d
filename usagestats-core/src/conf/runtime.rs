use crate::conf::spec::UsageStatsSpec;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Fully resolved configuration: every path is anchored at the config root.
#[derive(Debug, Clone, Serialize)]
pub struct RuntimeConfig {
    pub root: PathBuf,
    pub files_dir: PathBuf,
    pub parser: ParserConfig,
    pub robots: RobotsConfig,
    pub geoip: GeoipConfig,
    pub catalog_path: PathBuf,
    pub metrics_path: PathBuf,
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParserConfig {
    pub create_log_files: bool,
    pub access_log_file_parse_regex: Option<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            create_log_files: true,
            access_log_file_parse_regex: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RobotsConfig {
    pub dir: PathBuf,
    pub detect_crawlers: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GeoipConfig {
    pub enable: bool,
    pub city_db: Option<PathBuf>,
}

impl RuntimeConfig {
    pub fn from_spec(root: &Path, spec: UsageStatsSpec) -> RuntimeConfig {
        RuntimeConfig {
            root: root.to_path_buf(),
            files_dir: anchor(root, &spec.loader.files_dir),
            parser: ParserConfig {
                create_log_files: spec.parser.create_log_files,
                access_log_file_parse_regex: spec
                    .parser
                    .access_log_file_parse_regex
                    .filter(|p| !p.trim().is_empty()),
            },
            robots: RobotsConfig {
                dir: anchor(root, &spec.robots.dir),
                detect_crawlers: spec.robots.detect_crawlers,
            },
            geoip: GeoipConfig {
                enable: spec.geoip.enable,
                city_db: spec.geoip.city_db.map(|p| anchor(root, &p)),
            },
            catalog_path: anchor(root, &spec.catalog.path),
            metrics_path: anchor(root, &spec.metrics.path),
            log_dir: spec.logging.log_dir.map(|p| anchor(root, &p)),
        }
    }
}

fn anchor(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
