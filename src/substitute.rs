//! Placeholder variable substitution ("revars").
//!
//! Free-text fields (article intro text, channel description) may contain
//! site-wide placeholders such as `{phone}`. The substitution table comes from
//! the `[revars]` config section and is applied before the text is embedded
//! in a feed.

use crate::config::{RevarVariable, RevarsConfig};
use std::borrow::Cow;

/// Text substitution capability used by the feed formatters.
pub trait TextSubstitution {
    fn substitute<'a>(&self, text: &'a str) -> Cow<'a, str>;
}

/// Pass-through used when substitution is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSubstitution;

impl TextSubstitution for NoSubstitution {
    #[inline]
    fn substitute<'a>(&self, text: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(text)
    }
}

/// Ordered placeholder table with a nesting count.
#[derive(Debug, Clone)]
pub struct Revars {
    /// `(placeholder, replacement)` in application order.
    pairs: Vec<(String, String)>,
    nesting: u32,
}

impl Revars {
    /// Build from configured variables.
    ///
    /// Pairs are applied in reverse configured order, each one replacing
    /// over the output of the previous one.
    pub fn new(variables: &[RevarVariable], nesting: u32) -> Self {
        let pairs = variables
            .iter()
            .rev()
            .filter(|v| !v.variable.is_empty())
            .map(|v| (v.variable.clone(), v.value.clone()))
            .collect();
        Self {
            pairs,
            nesting: nesting.max(1),
        }
    }

    /// One replacement pass over `text`.
    fn replace_pass<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let mut out = Cow::Borrowed(text);
        for (key, value) in &self.pairs {
            if out.contains(key.as_str()) {
                out = Cow::Owned(out.replace(key.as_str(), value));
            }
        }
        out
    }
}

impl TextSubstitution for Revars {
    /// Every nesting pass restarts from the original text, so replacements
    /// introduced by a pass are not expanded again.
    fn substitute<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let mut out = Cow::Borrowed(text);
        for _ in 0..self.nesting {
            out = self.replace_pass(text);
        }
        out
    }
}

/// Substitution provider for the `[revars]` section.
pub fn from_config(config: &RevarsConfig) -> Box<dyn TextSubstitution> {
    if config.enable {
        Box::new(Revars::new(&config.variables, config.nesting))
    } else {
        Box::new(NoSubstitution)
    }
}
