//! Site content model and read-only query interface.
//!
//! | Module     | Purpose                                          |
//! |------------|--------------------------------------------------|
//! | `store`    | `ContentStore` trait, article/category filters   |
//! | `snapshot` | JSON snapshot exported from the CMS              |
//!
//! Articles and categories are never mutated by the exporter.

mod snapshot;
mod store;

pub use snapshot::SnapshotStore;
pub use store::{ArticleFilter, ContentStore, IdFilter, StoreError};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Publication state of a published article or category.
pub const STATE_PUBLISHED: i32 = 1;

/// Timestamp format used by the content database (`2024-01-15 10:30:45`).
const DB_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Content category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    pub title: String,
    pub alias: String,
    #[serde(default)]
    pub description: String,
    /// Parent category id (the root node is `1`, or `0` for none).
    #[serde(default)]
    pub parent_id: u32,
    /// Depth in the category tree (top-level categories are level 1).
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default = "default_state")]
    pub published: i32,
}

const fn default_level() -> u32 {
    1
}

const fn default_state() -> i32 {
    STATE_PUBLISHED
}

/// Image references attached to an article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleImages {
    pub image_intro: String,
    pub image_intro_alt: String,
    pub image_fulltext: String,
    pub image_fulltext_alt: String,
}

impl ArticleImages {
    /// Intro image, falling back to the full-text image.
    pub fn preferred(&self) -> &str {
        if self.image_intro.is_empty() {
            &self.image_fulltext
        } else {
            &self.image_intro
        }
    }

    /// Intro image alt text, falling back to the full-text alt text.
    pub fn preferred_alt(&self) -> &str {
        if self.image_intro_alt.is_empty() {
            &self.image_fulltext_alt
        } else {
            &self.image_intro_alt
        }
    }
}

/// Content article as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: u32,
    pub title: String,
    pub alias: String,
    pub catid: u32,
    /// Route of the article's category (e.g. `news/sport`).
    #[serde(default)]
    pub category_route: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub modified: String,
    #[serde(default)]
    pub introtext: String,
    #[serde(default)]
    pub images: ArticleImages,
    #[serde(default = "default_state")]
    pub state: i32,
    #[serde(default)]
    pub publish_up: Option<String>,
    #[serde(default)]
    pub publish_down: Option<String>,
    /// Position in the default listing order.
    #[serde(default)]
    pub ordering: i64,
}

impl Article {
    /// Timestamp used as the feed publication date.
    ///
    /// `modified`, or `created` when the article was never modified.
    pub fn feed_date(&self) -> Option<DateTime<Utc>> {
        parse_db_date(&self.modified).or_else(|| parse_db_date(&self.created))
    }

    /// Whether the article is published at `now`.
    pub fn is_published_at(&self, now: DateTime<Utc>) -> bool {
        if self.state != STATE_PUBLISHED {
            return false;
        }
        let started = self
            .publish_up
            .as_deref()
            .and_then(parse_db_date)
            .is_none_or(|up| up <= now);
        let not_ended = self
            .publish_down
            .as_deref()
            .and_then(parse_db_date)
            .is_none_or(|down| down >= now);
        started && not_ended
    }
}

/// Parse a database timestamp (UTC).
///
/// Empty strings and the zero date (`0000-00-00 00:00:00`) yield `None`.
pub fn parse_db_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() || s.starts_with("0000-00-00") {
        return None;
    }
    NaiveDateTime::parse_from_str(s, DB_DATE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}
