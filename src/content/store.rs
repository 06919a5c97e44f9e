//! Read-only query interface over site content.

use super::{Article, Category};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use thiserror::Error;

/// Content store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("content snapshot `{0}` is not valid JSON")]
    Json(PathBuf, #[source] serde_json::Error),

    #[error("category {0} not found")]
    CategoryNotFound(u32),
}

/// Narrow read-only view of the CMS content store.
pub trait ContentStore {
    /// Published articles matching `filter`, in default listing order.
    fn articles(&self, filter: &ArticleFilter) -> Result<Vec<Article>, StoreError>;

    /// Look up one category by id (any publication state).
    fn category(&self, id: u32) -> Result<Option<Category>, StoreError>;

    /// All published descendants of `parent_id`, at any depth.
    fn descendants(&self, parent_id: u32) -> Result<Vec<Category>, StoreError>;
}

/// Inclusion or exclusion filter over a set of ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdFilter {
    pub ids: Vec<u32>,
    pub include: bool,
}

impl IdFilter {
    pub fn include(ids: Vec<u32>) -> Self {
        Self { ids, include: true }
    }

    pub fn exclude(ids: Vec<u32>) -> Self {
        Self {
            ids,
            include: false,
        }
    }

    #[inline]
    pub fn matches(&self, id: u32) -> bool {
        self.ids.contains(&id) == self.include
    }
}

/// Article query state.
#[derive(Debug, Clone)]
pub struct ArticleFilter {
    /// Reference time for the publish-up / publish-down window.
    pub published_at: DateTime<Utc>,
    pub start: usize,
    /// Maximum number of articles, `0` for no limit.
    pub limit: usize,
    pub category: Option<IdFilter>,
    pub article: Option<IdFilter>,
}

impl ArticleFilter {
    /// Published articles from offset 0, unlimited, unfiltered.
    pub fn published(now: DateTime<Utc>) -> Self {
        Self {
            published_at: now,
            start: 0,
            limit: 0,
            category: None,
            article: None,
        }
    }

    pub fn matches(&self, article: &Article) -> bool {
        article.is_published_at(self.published_at)
            && self.category.as_ref().is_none_or(|f| f.matches(article.catid))
            && self.article.as_ref().is_none_or(|f| f.matches(article.id))
    }

    /// Filter, order and paginate `articles`.
    ///
    /// Default listing order is `ordering` ascending, then id ascending.
    pub fn select<'a, I>(&self, articles: I) -> Vec<Article>
    where
        I: IntoIterator<Item = &'a Article>,
    {
        let mut selected: Vec<&Article> = articles.into_iter().filter(|a| self.matches(a)).collect();
        selected.sort_by_key(|a| (a.ordering, a.id));

        let limit = if self.limit == 0 { usize::MAX } else { self.limit };
        selected
            .into_iter()
            .skip(self.start)
            .take(limit)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ArticleImages;
    use chrono::TimeZone;

    fn article(id: u32, catid: u32, ordering: i64) -> Article {
        Article {
            id,
            title: format!("Article {id}"),
            alias: format!("article-{id}"),
            catid,
            category_route: String::new(),
            author: String::new(),
            created: String::new(),
            modified: String::new(),
            introtext: String::new(),
            images: ArticleImages::default(),
            state: 1,
            publish_up: None,
            publish_down: None,
            ordering,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_id_filter_polarity() {
        assert!(IdFilter::include(vec![5]).matches(5));
        assert!(!IdFilter::include(vec![5]).matches(6));
        assert!(!IdFilter::exclude(vec![5]).matches(5));
        assert!(IdFilter::exclude(vec![5]).matches(6));
    }

    #[test]
    fn test_select_orders_and_limits() {
        let articles = vec![article(1, 5, 2), article(2, 5, 0), article(3, 5, 1)];
        let mut filter = ArticleFilter::published(now());
        filter.limit = 2;

        let ids: Vec<u32> = filter.select(&articles).iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_select_zero_limit_is_unlimited() {
        let articles: Vec<Article> = (1..=5).map(|id| article(id, 5, 0)).collect();
        let filter = ArticleFilter::published(now());
        assert_eq!(filter.select(&articles).len(), 5);
    }

    #[test]
    fn test_select_category_and_article_filters() {
        let articles = vec![article(1, 5, 0), article(2, 6, 0), article(3, 5, 0)];
        let mut filter = ArticleFilter::published(now());
        filter.category = Some(IdFilter::include(vec![5]));
        filter.article = Some(IdFilter::exclude(vec![3]));

        let ids: Vec<u32> = filter.select(&articles).iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_select_skips_unpublished() {
        let mut hidden = article(2, 5, 0);
        hidden.state = 0;
        let articles = vec![article(1, 5, 0), hidden];
        let filter = ArticleFilter::published(now());
        assert_eq!(filter.select(&articles).len(), 1);
    }
}
