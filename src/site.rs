//! Site context passed into every task run.
//!
//! Base URL, media root, timezone and clock are explicit values rather than
//! process-wide lookups, so a run can be reproduced in tests.

use crate::{config::TurboConfig, utils::date::parse_timezone};
use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Utc};
use std::path::{Path, PathBuf};
use url::Url;

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub struct SiteContext {
    base_url: Url,
    media_root: PathBuf,
    timezone: FixedOffset,
    clock: Box<dyn Clock>,
}

impl SiteContext {
    pub fn new(base_url: &str, media_root: impl Into<PathBuf>, timezone: FixedOffset) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("invalid site URL '{base_url}'"))?;
        Ok(Self {
            base_url,
            media_root: media_root.into(),
            timezone,
            clock: Box::new(SystemClock),
        })
    }

    /// Build from a validated config.
    pub fn from_config(config: &TurboConfig) -> Result<Self> {
        let url = config.site.url.as_deref().context("site.url is not configured")?;
        let timezone = parse_timezone(&config.site.timezone)
            .with_context(|| format!("unsupported timezone '{}'", config.site.timezone))?;
        Self::new(url, config.media_root(), timezone)
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Site URL with a trailing slash, e.g. `https://example.com/`.
    pub fn site_path(&self) -> String {
        let base = self.base_url.as_str();
        if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{base}/")
        }
    }

    /// Absolute URL of a path relative to the site URL.
    pub fn link(&self, path: &str) -> String {
        format!("{}{}", self.site_path(), path.trim_start_matches('/'))
    }

    /// Absolute URL of a root-relative path (`/images/a.jpg`).
    ///
    /// Resolved against the origin, so a site URL with a sub-path does not
    /// prefix it.
    pub fn origin_link(&self, path: &str) -> String {
        self.base_url
            .join(path)
            .map(String::from)
            .unwrap_or_else(|_| self.link(path))
    }

    pub fn media_root(&self) -> &Path {
        &self.media_root
    }

    pub fn timezone(&self) -> FixedOffset {
        self.timezone
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}

/// Context for `https://example.com` in UTC, frozen at 2024-06-01.
#[cfg(test)]
pub fn test_context(media_root: &Path) -> SiteContext {
    use chrono::TimeZone;
    SiteContext::new("https://example.com", media_root, FixedOffset::east_opt(0).unwrap())
        .unwrap()
        .with_clock(FixedClock(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()))
}
