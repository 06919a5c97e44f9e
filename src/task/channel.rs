//! `yandexturbo.channel`: export one category channel as a Turbo feed.
//!
//! # Flow
//!
//! ```text
//! TaskParams ──► ArticleFilter ──► ContentStore::articles
//!                                        │
//!                  ChannelInfo ◄── first category
//!                                        │
//!                  TurboItem per article ┴──► TurboFeed ──► <media>/<dir>/<alias>.turbo.xml
//! ```

use super::{TaskEnv, TaskStatus};
use crate::{
    config::{ArticleListMode, TaskParams},
    content::{ArticleFilter, ContentStore, IdFilter, StoreError},
    debug,
    generator::turbo::{ChannelInfo, TurboFeed, TurboItem, feed_path, write_feed},
    utils::plural::plural_count,
};
use anyhow::{Context, Result};
use rustc_hash::FxHashSet;

pub fn channel_create(params: &TaskParams, env: &TaskEnv<'_>) -> Result<TaskStatus> {
    let filter = build_filter(params, env)?;
    let articles = env.store.articles(&filter)?;
    debug!("query"; "{} selected", plural_count(articles.len(), "article"));

    let catid = *params.catid.first().context("no category configured")?;
    let category = env
        .store
        .category(catid)?
        .ok_or(StoreError::CategoryNotFound(catid))?;

    let channel = ChannelInfo::resolve(
        params,
        &category,
        env.site,
        env.substitution,
        &env.feed.language,
    );
    let items = articles
        .iter()
        .map(|article| TurboItem::from_article(article, env.site, env.substitution, env.feed))
        .collect();

    let path = feed_path(env.site.media_root(), &env.feed.directory, &category.alias)?;
    write_feed(TurboFeed { channel, items }, &path, env.feed.minify)?;

    Ok(TaskStatus::Ok)
}

/// Translate task parameters into a store query.
pub fn build_filter(params: &TaskParams, env: &TaskEnv<'_>) -> Result<ArticleFilter, StoreError> {
    let mut filter = ArticleFilter::published(env.site.now());
    filter.limit = params.count;

    if !params.catid.is_empty() {
        let ids = if params.show_child_category_articles && params.levels > 0 {
            expand_categories(&params.catid, params.levels, env.store)?
        } else {
            dedup(&params.catid)
        };
        debug!("query"; "category filter ({}): {:?}",
            if params.category_filtering_type { "include" } else { "exclude" }, ids);

        filter.category = Some(if params.category_filtering_type {
            IdFilter::include(ids)
        } else {
            IdFilter::exclude(ids)
        });
    }

    filter.article = match params.ex_or_include_articles {
        ArticleListMode::Include if params.included_articles.is_empty() => {
            debug!("query"; "include mode with no articles listed, article filter skipped");
            None
        }
        ArticleListMode::Include => Some(IdFilter::include(params.included_articles.clone())),
        ArticleListMode::Exclude if params.excluded_articles.is_empty() => None,
        ArticleListMode::Exclude => Some(IdFilter::exclude(params.excluded_articles.clone())),
    };

    Ok(filter)
}

/// Roots in configured order, then each root's descendants at most `levels`
/// below it. Duplicates keep their first position.
fn expand_categories(
    roots: &[u32],
    levels: u32,
    store: &dyn ContentStore,
) -> Result<Vec<u32>, StoreError> {
    let mut seen = FxHashSet::default();
    let mut ids: Vec<u32> = roots.iter().copied().filter(|id| seen.insert(*id)).collect();

    for &root in roots {
        let Some(category) = store.category(root)? else {
            debug!("query"; "category {} not found, children skipped", root);
            continue;
        };

        for child in store.descendants(root)? {
            if child.level.saturating_sub(category.level) <= levels && seen.insert(child.id) {
                ids.push(child.id);
            }
        }
    }

    Ok(ids)
}

fn dedup(ids: &[u32]) -> Vec<u32> {
    let mut seen = FxHashSet::default();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}
