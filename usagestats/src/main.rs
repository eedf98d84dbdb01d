use clap::Parser;
use std::path::PathBuf;
use usagestats_core::cli::{self, Command};

#[derive(Parser, Debug)]
#[command(
    name = "usagestats",
    version,
    about = "usagestats: COUNTER usage statistics loader"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Run { config }) => cli::run(&config),

        Some(Command::Process { file, config }) => cli::process(&config, &file),

        Some(Command::Check { path, plain }) => cli::check(path, plain),

        None => cli::run(&PathBuf::from("config")),
    }
}
