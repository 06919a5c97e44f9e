//! turbofeed - Yandex Turbo RSS exporter for CMS categories.

mod cli;
mod config;
mod content;
mod generator;
mod logger;
mod site;
mod substitute;
mod task;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::TurboConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = TurboConfig::load(&cli)?;

    match &cli.command {
        Commands::Run { args } => cli::run::run_tasks(args, &config),
        Commands::Tasks => cli::tasks::list_tasks(&config),
    }
}
