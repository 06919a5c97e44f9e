//! `[[task]]` scheduled export tasks.
//!
//! Each table configures one run of a routine (see `crate::task::ROUTINES`):
//!
//! ```toml
//! [[task]]
//! id = "news"
//! routine = "yandexturbo.channel"
//!
//! [task.params]
//! catid = [5]
//! count = 20
//! show_child_category_articles = true
//! levels = 2
//! ex_or_include_articles = "exclude"
//! excluded_articles = [12, 13]
//! ```

use crate::{
    config::{ConfigDiagnostics, FieldPath},
    task::find_routine,
};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskConfig {
    /// Unique task id, used to select tasks on the command line.
    pub id: String,
    /// Routine key, e.g. `yandexturbo.channel`.
    pub routine: String,
    /// Disabled tasks are skipped by `run` unless selected explicitly.
    #[serde(default = "default_true")]
    pub enable: bool,
    #[serde(default)]
    pub params: TaskParams,
}

const fn default_true() -> bool {
    true
}

/// How the explicit article id lists are applied.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ArticleListMode {
    /// Drop `excluded_articles` from the selection (default).
    #[default]
    Exclude,
    /// Keep only `included_articles`.
    Include,
}

/// Parameters of a channel export run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskParams {
    /// Category ids; the first one names the channel and the output file.
    pub catid: Vec<u32>,
    /// Maximum number of articles, `0` for no limit.
    pub count: usize,
    /// `true` keeps the listed categories, `false` excludes them.
    pub category_filtering_type: bool,
    /// Also select articles from child categories.
    pub show_child_category_articles: bool,
    /// Depth of child categories to include.
    pub levels: u32,
    pub ex_or_include_articles: ArticleListMode,
    pub included_articles: Vec<u32>,
    pub excluded_articles: Vec<u32>,
    /// Channel title override (default: category title).
    pub channel_name: String,
    /// Channel link override (default: category alias).
    pub channel_link: String,
    /// Channel description override (default: category description).
    pub channel_description: String,
}

impl Default for TaskParams {
    fn default() -> Self {
        Self {
            catid: Vec::new(),
            count: 0,
            category_filtering_type: true,
            show_child_category_articles: false,
            levels: 0,
            ex_or_include_articles: ArticleListMode::Exclude,
            included_articles: Vec::new(),
            excluded_articles: Vec::new(),
            channel_name: String::new(),
            channel_link: String::new(),
            channel_description: String::new(),
        }
    }
}

/// Validate all `[[task]]` tables.
///
/// # Checks
/// - ids are non-empty and unique
/// - the routine key is registered
/// - at least one category is configured
pub fn validate_tasks(tasks: &[TaskConfig], diag: &mut ConfigDiagnostics) {
    let mut seen = FxHashSet::default();

    for (i, task) in tasks.iter().enumerate() {
        if task.id.trim().is_empty() {
            diag.error(FieldPath::task(i, "id"), "task id must not be empty");
        } else if !seen.insert(task.id.as_str()) {
            diag.error(
                FieldPath::task(i, "id"),
                format!("duplicate task id '{}'", task.id),
            );
        }

        if find_routine(&task.routine).is_none() {
            diag.error_with_hint(
                FieldPath::task(i, "routine"),
                format!("unknown routine '{}'", task.routine),
                "run `turbofeed tasks` to list available routines",
            );
        }

        task.params.validate(i, diag);
    }
}

impl TaskParams {
    fn validate(&self, index: usize, diag: &mut ConfigDiagnostics) {
        if self.catid.is_empty() {
            diag.error_with_hint(
                FieldPath::task(index, "params.catid"),
                "at least one category is required",
                "the first category names the channel and the output file",
            );
        }

        if self.show_child_category_articles && self.levels == 0 {
            diag.warn(
                FieldPath::task(index, "params.levels"),
                "child categories are enabled but levels is 0, no children will be included",
            );
        }

        if self.ex_or_include_articles == ArticleListMode::Include
            && self.included_articles.is_empty()
        {
            diag.warn(
                FieldPath::task(index, "params.included_articles"),
                "include mode with an empty list applies no article filter",
            );
        }
    }
}
