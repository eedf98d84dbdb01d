mod check;
mod process;
mod run;

pub use check::*;
pub use process::*;
pub use run::*;

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Process every file waiting in the stage directory (default)
    Run {
        /// Path to config directory
        #[arg(long, default_value = "config")]
        config: PathBuf,
    },

    /// Process a single log file in place, without moving it
    Process {
        /// Log file to process
        file: PathBuf,

        /// Path to config directory
        #[arg(long, default_value = "config")]
        config: PathBuf,
    },

    /// Validate configuration and exit
    Check {
        /// Path to config directory
        #[arg(default_value = "config")]
        path: PathBuf,

        /// Print without colors
        #[arg(short, long, default_value = "false")]
        plain: bool,
    },
}
