use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level shape of `usagestats.hcl`.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct UsageStatsSpec {
    pub loader: LoaderSpec,
    pub parser: ParserSpec,
    pub robots: RobotsSpec,
    pub geoip: GeoipSpec,
    pub catalog: CatalogSpec,
    pub metrics: MetricsSpec,
    pub logging: LoggingSpec,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderSpec {
    /// Root holding the stage/processing/archive/reject directories.
    pub files_dir: PathBuf,
}

impl Default for LoaderSpec {
    fn default() -> Self {
        Self {
            files_dir: PathBuf::from("usageEventLogs"),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserSpec {
    /// Logs are written by our own access logging, use the built-in pattern.
    pub create_log_files: bool,

    /// Pattern for external log files, used when `create_log_files` is off.
    pub access_log_file_parse_regex: Option<String>,
}

impl Default for ParserSpec {
    fn default() -> Self {
        Self {
            create_log_files: true,
            access_log_file_parse_regex: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RobotsSpec {
    /// Directory expected to hold exactly one robot list file.
    pub dir: PathBuf,

    /// Also drop user agents classified as crawlers by woothee.
    pub detect_crawlers: bool,
}

impl Default for RobotsSpec {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("lib/counter"),
            detect_crawlers: false,
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeoipSpec {
    pub enable: bool,
    pub city_db: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogSpec {
    pub path: PathBuf,
}

impl Default for CatalogSpec {
    fn default() -> Self {
        Self {
            path: PathBuf::from("catalog.hcl"),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetricsSpec {
    /// JSON-lines file holding the permanent metric rows.
    pub path: PathBuf,
}

impl Default for MetricsSpec {
    fn default() -> Self {
        Self {
            path: PathBuf::from("metrics.jsonl"),
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSpec {
    /// Write logs to a daily rolling file in this directory instead of stdout.
    pub log_dir: Option<PathBuf>,
}
