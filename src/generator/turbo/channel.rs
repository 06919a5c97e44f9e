//! Channel metadata.
//!
//! Each field is taken from the task's override when set, otherwise from the
//! category that governs the channel.

use crate::{
    config::TaskParams,
    content::Category,
    site::SiteContext,
    substitute::TextSubstitution,
    utils::html::{escape, replace_nbsp, strip_tags},
};

/// Channel header. Text fields are already escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInfo {
    pub title: String,
    pub link: String,
    pub description: String,
    pub language: String,
}

impl ChannelInfo {
    pub fn resolve(
        params: &TaskParams,
        category: &Category,
        ctx: &SiteContext,
        substitution: &dyn TextSubstitution,
        language: &str,
    ) -> Self {
        let title = or_default(&params.channel_name, &category.title);
        let link = or_default(&params.channel_link, &category.alias);
        let description = if params.channel_description.is_empty() {
            strip_tags(&category.description).into_owned()
        } else {
            params.channel_description.clone()
        };

        let description = substitution.substitute(&description);
        let description = replace_nbsp(&description);

        Self {
            title: escape(title).into_owned(),
            link: escape(&ctx.link(link.trim_matches('/'))).into_owned(),
            description: escape(description.trim()).into_owned(),
            language: escape(language).into_owned(),
        }
    }
}

#[inline]
fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::RevarVariable,
        site::test_context,
        substitute::{NoSubstitution, Revars},
    };
    use std::path::Path;

    fn category() -> Category {
        Category {
            id: 5,
            title: "News & Events".into(),
            alias: "news".into(),
            description: "<p>Latest&nbsp;<b>news</b> from {city}</p>".into(),
            parent_id: 1,
            level: 1,
            published: 1,
        }
    }

    #[test]
    fn test_from_category() {
        let ctx = test_context(Path::new("/tmp"));
        let channel = ChannelInfo::resolve(
            &TaskParams::default(),
            &category(),
            &ctx,
            &NoSubstitution,
            "ru",
        );

        assert_eq!(channel.title, "News &amp; Events");
        assert_eq!(channel.link, "https://example.com/news");
        assert_eq!(channel.description, "Latest news from {city}");
        assert_eq!(channel.language, "ru");
    }

    #[test]
    fn test_overrides() {
        let ctx = test_context(Path::new("/tmp"));
        let params = TaskParams {
            channel_name: "Turbo".into(),
            channel_link: "/turbo/news/".into(),
            channel_description: "All about {city}".into(),
            ..Default::default()
        };
        let revars = Revars::new(
            &[RevarVariable {
                variable: "{city}".into(),
                value: "Moscow".into(),
            }],
            1,
        );

        let channel = ChannelInfo::resolve(&params, &category(), &ctx, &revars, "ru");
        assert_eq!(channel.title, "Turbo");
        assert_eq!(channel.link, "https://example.com/turbo/news");
        assert_eq!(channel.description, "All about Moscow");
    }
}
