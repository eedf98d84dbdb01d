use crate::conf::load_config;
use crate::logging::init_logging;
use crate::pipeline::{LoadOutcome, Pipeline};
use anyhow::{Context, bail};
use std::path::Path;

pub fn process(config_dir: &Path, file: &Path) -> anyhow::Result<()> {
    let cfg = load_config(config_dir).context("failed to load usagestats config")?;
    let _guard = init_logging(cfg.log_dir.as_deref());

    let mut pipeline = Pipeline::from_config(&cfg).context("failed to set up the pipeline")?;
    let report = pipeline
        .process_file(file)
        .with_context(|| format!("rejected {}", file.display()))?;

    if report.outcome == LoadOutcome::RetryLater {
        bail!("metrics store rejected {}, try again later", report.load_id);
    }

    Ok(())
}
