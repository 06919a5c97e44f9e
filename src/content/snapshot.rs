//! Content snapshot store.
//!
//! The CMS export job dumps categories and articles into one JSON file:
//!
//! ```json
//! {
//!   "categories": [{ "id": 5, "title": "News", "alias": "news", "level": 1 }],
//!   "articles": [{ "id": 1, "title": "Hello", "alias": "hello", "catid": 5 }]
//! }
//! ```

use super::{
    Article, Category, STATE_PUBLISHED,
    store::{ArticleFilter, ContentStore, StoreError},
};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::{fs, path::Path};

/// In-memory store loaded from a JSON snapshot.
#[derive(Debug, Default, Deserialize)]
pub struct SnapshotStore {
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    articles: Vec<Article>,
}

impl SnapshotStore {
    pub fn new(categories: Vec<Category>, articles: Vec<Article>) -> Self {
        Self {
            categories,
            articles,
        }
    }

    /// Load a snapshot file.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let content =
            fs::read_to_string(path).map_err(|err| StoreError::Io(path.to_path_buf(), err))?;
        serde_json::from_str(&content).map_err(|err| StoreError::Json(path.to_path_buf(), err))
    }

    pub fn article_count(&self) -> usize {
        self.articles.len()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }
}

impl ContentStore for SnapshotStore {
    fn articles(&self, filter: &ArticleFilter) -> Result<Vec<Article>, StoreError> {
        Ok(filter.select(&self.articles))
    }

    fn category(&self, id: u32) -> Result<Option<Category>, StoreError> {
        Ok(self.categories.iter().find(|c| c.id == id).cloned())
    }

    fn descendants(&self, parent_id: u32) -> Result<Vec<Category>, StoreError> {
        let mut children: FxHashMap<u32, Vec<&Category>> = FxHashMap::default();
        for category in &self.categories {
            if category.published == STATE_PUBLISHED {
                children.entry(category.parent_id).or_default().push(category);
            }
        }

        // Depth-first, preserving snapshot order among siblings
        let mut result = Vec::new();
        let mut stack: Vec<&Category> = children
            .get(&parent_id)
            .map(|c| c.iter().rev().copied().collect())
            .unwrap_or_default();

        while let Some(category) = stack.pop() {
            // Guard against cycles in malformed snapshots
            if category.id == parent_id || result.iter().any(|c: &Category| c.id == category.id) {
                continue;
            }
            result.push(category.clone());
            if let Some(kids) = children.get(&category.id) {
                stack.extend(kids.iter().rev().copied());
            }
        }

        Ok(result)
    }
}
