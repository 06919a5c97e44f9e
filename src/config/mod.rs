//! Configuration management for `turbofeed.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── feed       # [feed], [feed.image]
//! │   ├── revars     # [revars]
//! │   ├── site       # [site]
//! │   └── task       # [[task]]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # TurboConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section       | Purpose                                          |
//! |---------------|--------------------------------------------------|
//! | `[site]`      | Site URL, timezone, media root, content snapshot |
//! | `[feed]`      | Output directory, language, minify, image tag    |
//! | `[revars]`    | Placeholder substitution table                   |
//! | `[[task]]`    | Export tasks and their parameters                |

pub mod section;
pub mod types;
mod util;

use util::{find_config_file, resolve_path};

pub use section::{
    ArticleListMode, FeedSectionConfig, ImageConfig, RevarVariable, RevarsConfig,
    SiteSectionConfig, TaskConfig, TaskParams,
};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{Cli, Commands, RunArgs},
    log,
};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing turbofeed.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TurboConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Site location and content source
    #[serde(default)]
    pub site: SiteSectionConfig,

    /// Feed output settings
    #[serde(default)]
    pub feed: FeedSectionConfig,

    /// Placeholder substitution
    #[serde(default)]
    pub revars: RevarsConfig,

    /// Export tasks
    #[serde(default)]
    pub task: Vec<TaskConfig>,
}

impl TurboConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd to find the config file.
    /// The project root is the config file's parent directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let Some(config_path) = find_config_file(&cwd, &cli.config) else {
            bail!(ConfigError::Validation(format!(
                "config file '{}' not found in {} or any parent directory",
                cli.config.display(),
                cwd.display()
            )));
        };

        let mut config = Self::from_path(&config_path)?;
        config.config_path = config_path;
        config.finalize(cli);
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Finalize configuration after loading.
    fn finalize(&mut self, cli: &Cli) {
        let root = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        self.root = root;
        self.apply_command_options(cli);
        self.normalize_paths();
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Media root as an absolute path.
    pub fn media_root(&self) -> &Path {
        &self.site.media_root
    }

    /// Content snapshot as an absolute path.
    pub fn content_path(&self) -> &Path {
        &self.site.content
    }

    /// Tasks to run: the named ones, or every enabled task when `ids` is empty.
    pub fn select_tasks(&self, ids: &[String]) -> Result<Vec<&TaskConfig>> {
        if ids.is_empty() {
            return Ok(self.task.iter().filter(|t| t.enable).collect());
        }

        ids.iter()
            .map(|id| {
                self.task
                    .iter()
                    .find(|t| &t.id == id)
                    .with_context(|| format!("no task with id '{id}' in config"))
            })
            .collect()
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Run { args } => self.apply_run_args(args),
            Commands::Tasks => {}
        }
    }

    /// Apply run arguments from CLI.
    fn apply_run_args(&mut self, args: &RunArgs) {
        Self::update_option(&mut self.feed.minify, args.minify.as_ref());

        // Override site URL if provided via CLI
        if let Some(ref url) = args.site_url {
            self.site.url = Some(url.clone());
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve media root and content snapshot relative to the root directory.
    fn normalize_paths(&mut self) {
        self.site.media_root = resolve_path(&self.root, &self.site.media_root);
        self.site.content = resolve_path(&self.root, &self.site.content);
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.site.validate(&mut diag);
        self.feed.validate(&mut diag);
        self.revars.validate(&mut diag);
        section::validate_tasks(&self.task, &mut diag);

        diag.print_warnings();

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config with a minimal `[site]` section.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> TurboConfig {
    let config = format!("[site]\nurl = \"https://example.com\"\n{extra}");
    let (parsed, ignored) = TurboConfig::parse_with_ignored(&config).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_from_str_invalid_toml() {
        // Invalid TOML syntax - unclosed bracket
        assert!(TurboConfig::from_str("[site\nurl = \"https://example.com\"").is_err());
    }

    #[test]
    fn test_config_default() {
        let config = TurboConfig::default();
        assert_eq!(config.get_root(), Path::new(""));
        assert!(config.site.url.is_none());
        assert_eq!(config.feed.language, "ru");
        assert!(config.task.is_empty());
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[site]\nurl = \"https://example.com\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = TurboConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.site.url.as_deref(), Some("https://example.com"));
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_no_unknown_fields() {
        let (_, ignored) = TurboConfig::parse_with_ignored("[site]\nurl = \"https://x.org\"").unwrap();
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_finalize_resolves_paths_and_cli_overrides() {
        let cli = Cli::parse_from([
            "turbofeed",
            "run",
            "--minify",
            "--site-url",
            "https://cdn.example.com",
        ]);
        let mut config = test_parse_config("");
        config.config_path = PathBuf::from("/srv/site/turbofeed.toml");
        config.finalize(&cli);

        assert_eq!(config.get_root(), Path::new("/srv/site"));
        assert_eq!(config.media_root(), Path::new("/srv/site/media"));
        assert_eq!(config.content_path(), Path::new("/srv/site/content.json"));
        assert!(config.feed.minify);
        assert_eq!(config.site.url.as_deref(), Some("https://cdn.example.com"));
    }

    #[test]
    fn test_select_tasks() {
        let config = test_parse_config(
            r#"[[task]]
id = "news"
routine = "yandexturbo.channel"
[task.params]
catid = [5]

[[task]]
id = "blog"
routine = "yandexturbo.channel"
enable = false
[task.params]
catid = [6]
"#,
        );

        let all: Vec<&str> = config
            .select_tasks(&[])
            .unwrap()
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(all, vec!["news"]);

        let named = config.select_tasks(&["blog".to_string()]).unwrap();
        assert_eq!(named[0].id, "blog");

        assert!(config.select_tasks(&["missing".to_string()]).is_err());
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let config = TurboConfig::from_str(
            "[site]\ntimezone = \"Mars/Olympus\"\n[revars]\nnesting = 0\n[[task]]\nid = \"x\"\nroutine = \"nope\"",
        )
        .unwrap();
        let err = config.validate().unwrap_err();
        let Some(ConfigError::Diagnostics(diag)) = err.downcast_ref::<ConfigError>() else {
            panic!("expected diagnostics, got {err}");
        };
        // url, timezone, nesting, routine, catid
        assert_eq!(diag.errors().len(), 5);
    }
}
