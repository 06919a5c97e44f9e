//! Config field path used in diagnostics.

use owo_colors::OwoColorize;
use std::{borrow::Cow, fmt};

/// Dotted path of a config field, e.g. `site.url` or `task[0].params.catid`.
///
/// # Example
///
/// ```ignore
/// const URL: FieldPath = FieldPath::new("site.url");
/// diag.error(URL, "required");
/// diag.error(FieldPath::task(0, "params.catid"), "at least one category is required");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath(Cow<'static, str>);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(Cow::Borrowed(path))
    }

    /// Path of a field inside the `index`-th `[[task]]` table.
    pub fn task(index: usize, field: &str) -> Self {
        Self(Cow::Owned(format!("task[{index}].{field}")))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_args!("`{}`", self.0).bright_blue())
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
