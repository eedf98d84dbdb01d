mod discover;
mod error;
mod loader;
mod runtime;
pub mod spec;

pub use discover::{discover, first_file};
pub use error::ConfigError;
pub use loader::{CONFIG_FILE_NAME, load_config, load_spec_config};
pub use runtime::{GeoipConfig, ParserConfig, RobotsConfig, RuntimeConfig};
