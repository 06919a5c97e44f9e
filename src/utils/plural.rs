//! Pluralization for log lines.

/// `plural_count(1, "task")` -> `"1 task"`, `plural_count(3, "task")` -> `"3 tasks"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} {noun}{suffix}")
}
