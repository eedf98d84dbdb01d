use crate::catalog::{InMemoryCatalog, JournalDirectory};
use crate::conf::{ConfigError, RuntimeConfig, load_config};
use crate::filter::RobotList;
use crate::loader::FileLoader;
use crate::parse::LogParser;
use owo_colors::OwoColorize;
use std::path::PathBuf;

pub fn check(path: PathBuf, plain: bool) -> anyhow::Result<()> {
    let summary = load_config(&path).and_then(|cfg| summarize(&cfg));

    match summary {
        Ok(lines) => {
            for line in lines {
                if plain {
                    println!("✔ {line}");
                } else {
                    println!("{} {line}", "✔".green());
                }
            }
            Ok(())
        }
        Err(err) => {
            print_config_error(err, plain);
            std::process::exit(1);
        }
    }
}

/// Loads everything a run would load and describes it.
fn summarize(cfg: &RuntimeConfig) -> Result<Vec<String>, ConfigError> {
    let parser = LogParser::from_config(&cfg.parser)?;
    let robots = RobotList::discover(&cfg.robots.dir)?;
    let catalog = InMemoryCatalog::load(&cfg.catalog_path)?;
    let journals = JournalDirectory::build(&catalog);
    let staged = FileLoader::new(&cfg.files_dir)
        .staged_files()
        .map(|files| files.len())
        .unwrap_or(0);

    let mut lines = vec![
        "Config loaded successfully".to_string(),
        format!("parse pattern {}", parser.pattern()),
    ];

    lines.push(match &robots {
        Some(list) => format!("{} robot patterns", list.len()),
        None => format!("no robot list in {}", cfg.robots.dir.display()),
    });
    if cfg.robots.detect_crawlers {
        lines.push("crawler detection enabled".to_string());
    }

    lines.push(match (cfg.geoip.enable, &cfg.geoip.city_db) {
        (true, Some(db)) => format!("geoip database {}", db.display()),
        _ => "geoip disabled".to_string(),
    });

    lines.push(format!("{} journals", journals.len()));
    lines.push(format!("metrics written to {}", cfg.metrics_path.display()));
    lines.push(format!("{staged} files staged in {}", cfg.files_dir.display()));

    Ok(lines)
}

fn print_config_error(err: ConfigError, plain: bool) {
    let hint = config_error_hint(&err);
    if plain {
        eprintln!("{err}");
    } else {
        eprintln!();
        eprintln!("{} {err}", "error:".red().bold());
    }
    if let Some(hint) = hint {
        eprintln!();
        eprintln!("{hint}");
    }
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        //---------------------------------------------------------------------
        // Parser errors
        //---------------------------------------------------------------------
        ConfigError::MissingCaptureGroups { .. } => Some(
            "Access log patterns need five capture groups, in this order:\n\
             address, date, request target, status, user agent.\n\
             \n\
             Leave access_log_file_parse_regex unset to use the combined log format.",
        ),

        ConfigError::InvalidPattern { .. } => Some(
            "The access log pattern is not a valid regular expression.\n\
             \n\
             Delimiters and trailing flags (`/.../i`) are accepted; lookaround\n\
             and backreferences are not supported.",
        ),

        //---------------------------------------------------------------------
        // Geo errors
        //---------------------------------------------------------------------
        ConfigError::MissingGeoipDb => Some(
            "Geo enrichment needs a MaxMind city database.\n\
             \n\
             Example:\n\
             \n\
             geoip = {\n\
             \x20 enable  = true\n\
             \x20 city_db = \"GeoLite2-City.mmdb\"\n\
             }",
        ),

        //---------------------------------------------------------------------
        // Catalog errors
        //---------------------------------------------------------------------
        ConfigError::DuplicateJournal { .. } => Some(
            "Journal paths are the URL segment after /index.php/ and must be unique.",
        ),

        ConfigError::DanglingCatalogEntry { .. } => Some(
            "Every catalog entry must reference an existing parent.\n\
             \n\
             Check the journal_id of articles and issues in the catalog file.",
        ),

        //---------------------------------------------------------------------
        // Everything else: no hint
        //---------------------------------------------------------------------
        _ => None,
    }
}
