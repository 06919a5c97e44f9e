//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Yandex Turbo feed exporter CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: turbofeed.toml)
    #[arg(short = 'C', long, global = true, default_value = "turbofeed.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run export tasks (all enabled tasks when none are named)
    #[command(visible_alias = "r")]
    Run {
        #[command(flatten)]
        args: RunArgs,
    },

    /// List available routines and configured tasks
    #[command(visible_alias = "t")]
    Tasks,
}

/// Run command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct RunArgs {
    /// Task ids to run. If omitted, runs every enabled task.
    #[arg(value_name = "TASK")]
    pub tasks: Vec<String>,

    /// Minify the written XML
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// Override site URL, e.g. when the scheduler runs on a staging host.
    ///
    /// Example:
    ///   turbofeed run --site-url "https://example.com"
    #[arg(short = 'U', long = "site-url", value_hint = clap::ValueHint::Url)]
    pub site_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_with_tasks() {
        let cli = Cli::parse_from(["turbofeed", "run", "news", "blog", "-m", "-v"]);
        assert!(cli.verbose);
        let Commands::Run { args } = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(args.tasks, vec!["news", "blog"]);
        assert_eq!(args.minify, Some(true));
        assert!(args.site_url.is_none());
    }

    #[test]
    fn test_parse_custom_config() {
        let cli = Cli::parse_from(["turbofeed", "tasks", "-C", "site/turbo.toml"]);
        assert_eq!(cli.config, PathBuf::from("site/turbo.toml"));
        assert!(matches!(cli.command, Commands::Tasks));
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
