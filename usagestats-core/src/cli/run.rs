use crate::conf::load_config;
use crate::loader::FileLoader;
use crate::logging::init_logging;
use crate::pipeline::Pipeline;
use anyhow::Context;
use std::path::Path;

pub fn run(config_dir: &Path) -> anyhow::Result<()> {
    let cfg = load_config(config_dir).context("failed to load usagestats config")?;
    let _guard = init_logging(cfg.log_dir.as_deref());

    let mut pipeline = Pipeline::from_config(&cfg).context("failed to set up the pipeline")?;
    let loader = FileLoader::new(&cfg.files_dir);
    let summary = loader
        .run(&mut pipeline)
        .with_context(|| format!("failed to process files in {}", cfg.files_dir.display()))?;

    if summary.total() == 0 {
        tracing::info!(stage = %loader.stage_dir().display(), "nothing to process");
    }

    Ok(())
}
