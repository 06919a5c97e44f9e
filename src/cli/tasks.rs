//! `tasks` command: list routines and configured tasks.

use crate::{config::TurboConfig, task::ROUTINES};
use anyhow::Result;
use owo_colors::OwoColorize;
use std::fmt::Write;

pub fn list_tasks(config: &TurboConfig) -> Result<()> {
    print!("{}", render(config)?);
    Ok(())
}

fn render(config: &TurboConfig) -> Result<String> {
    let mut out = String::new();

    writeln!(out, "{}", "Routines".bold())?;
    for routine in ROUTINES {
        writeln!(out, "  {} {}", format!("{:<24}", routine.key).cyan(), routine.title)?;
    }

    writeln!(out, "\n{}", "Tasks".bold())?;
    if config.task.is_empty() {
        writeln!(out, "  {}", "none configured".dimmed())?;
    }
    for task in &config.task {
        let state = if task.enable {
            "enabled".green().to_string()
        } else {
            "disabled".dimmed().to_string()
        };
        writeln!(
            out,
            "  {:<16} {:<24} catid={:?} {}",
            task.id, task.routine, task.params.catid, state
        )?;
    }

    Ok(out)
}
