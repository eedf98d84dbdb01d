use crate::conf::error::ConfigError;
use crate::conf::runtime::RuntimeConfig;
use crate::conf::spec::UsageStatsSpec;
use crate::parse::LogParser;

use std::fs;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "usagestats.hcl";

pub fn load_config(root: &Path) -> Result<RuntimeConfig, ConfigError> {
    let spec = load_spec_config(root)?;
    let config = RuntimeConfig::from_spec(root, spec);

    validate_config(&config)?;

    Ok(config)
}

pub fn load_spec_config(root: &Path) -> Result<UsageStatsSpec, ConfigError> {
    //--------------------------------------------------------------------------
    // Hard fail: IO and parsing
    //--------------------------------------------------------------------------
    let path = root.join(CONFIG_FILE_NAME);
    let entry = fs::read_to_string(&path).map_err(|e| ConfigError::read_file(&path, e))?;

    hcl::from_str(&entry).map_err(|e| ConfigError::parse(&path, e))
}

/// Checks the parts of the config that would otherwise only fail on the first file.
fn validate_config(config: &RuntimeConfig) -> Result<(), ConfigError> {
    LogParser::from_config(&config.parser)?;

    if config.geoip.enable && config.geoip.city_db.is_none() {
        return Err(ConfigError::MissingGeoipDb);
    }

    Ok(())
}
