//! Export routines and task execution.
//!
//! A configured `[[task]]` names its routine by a stable key. The registry
//! below is the single source of routines; config validation and the `tasks`
//! command both read it.

pub mod channel;

use crate::{
    config::{FeedSectionConfig, TaskConfig, TaskParams},
    content::ContentStore,
    log,
    site::SiteContext,
    substitute::TextSubstitution,
};
use anyhow::{Context, Result};
use std::fmt;

/// Outcome of a successful task run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Ok,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => f.write_str("ok"),
        }
    }
}

/// Collaborators shared by every task of one run.
pub struct TaskEnv<'a> {
    pub site: &'a SiteContext,
    pub store: &'a dyn ContentStore,
    pub substitution: &'a dyn TextSubstitution,
    pub feed: &'a FeedSectionConfig,
}

pub type Handler = fn(&TaskParams, &TaskEnv<'_>) -> Result<TaskStatus>;

/// A registered export routine.
pub struct Routine {
    pub key: &'static str,
    pub title: &'static str,
    pub handler: Handler,
}

impl fmt::Debug for Routine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Routine")
            .field("key", &self.key)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

pub static ROUTINES: &[Routine] = &[Routine {
    key: "yandexturbo.channel",
    title: "Yandex Turbo channel export",
    handler: channel::channel_create,
}];

pub fn find_routine(key: &str) -> Option<&'static Routine> {
    ROUTINES.iter().find(|r| r.key == key)
}

/// Run one configured task.
pub fn run_task(task: &TaskConfig, env: &TaskEnv<'_>) -> Result<TaskStatus> {
    let routine = find_routine(&task.routine)
        .with_context(|| format!("unknown routine '{}'", task.routine))?;

    log!("task"; "{} ({})", task.id, routine.key);
    (routine.handler)(&task.params, env)
}
