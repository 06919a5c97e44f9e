//! `run` command: execute the selected export tasks in order.

use crate::{
    cli::RunArgs,
    config::TurboConfig,
    content::SnapshotStore,
    debug, log,
    logger::{status_error, status_success},
    site::SiteContext,
    substitute,
    task::{TaskEnv, run_task},
    utils::plural::plural_count,
};
use anyhow::{Result, bail};

/// Run tasks named in `args`, or every enabled task.
///
/// Every selected task runs even when an earlier one fails; the command fails
/// if any task did.
pub fn run_tasks(args: &RunArgs, config: &TurboConfig) -> Result<()> {
    let tasks = config.select_tasks(&args.tasks)?;
    if tasks.is_empty() {
        log!("task"; "no enabled tasks configured");
        return Ok(());
    }

    let store = SnapshotStore::load(config.content_path())?;
    debug!("content"; "snapshot: {} categories, {} articles",
        store.category_count(), store.article_count());

    let site = SiteContext::from_config(config)?;
    let substitution = substitute::from_config(&config.revars);
    let env = TaskEnv {
        site: &site,
        store: &store,
        substitution: substitution.as_ref(),
        feed: &config.feed,
    };

    let mut failed = 0;
    for task in &tasks {
        match run_task(task, &env) {
            Ok(status) => status_success(&format!("{}: {}", task.id, status)),
            Err(e) => {
                failed += 1;
                status_error(&format!("{}: failed", task.id), &format!("{e:#}"));
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} failed", failed, plural_count(tasks.len(), "task"));
    }
    Ok(())
}
