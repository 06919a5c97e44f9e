//! Article to feed item formatting.

use super::image::resolve_image;
use crate::{
    config::FeedSectionConfig,
    content::Article,
    site::SiteContext,
    substitute::TextSubstitution,
    utils::{
        date::to_rfc822,
        html::{ImageTag, escape, escape_html, replace_nbsp},
    },
};

/// One `<item>` of a Turbo channel. Text fields are already escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurboItem {
    pub link: String,
    pub topic: String,
    pub pub_date: String,
    pub author: String,
    /// HTML body placed in `<turbo:content>` as CDATA.
    pub content: String,
}

impl TurboItem {
    pub fn from_article(
        article: &Article,
        ctx: &SiteContext,
        substitution: &dyn TextSubstitution,
        feed: &FeedSectionConfig,
    ) -> Self {
        let link = escape(&article_link(article, ctx)).into_owned();
        let title = escape(&article.title).into_owned();

        let date = article.feed_date().unwrap_or_else(|| ctx.now());
        let pub_date = escape(&to_rfc822(date, ctx.timezone())).into_owned();

        let figure = resolve_image(article.images.preferred(), ctx).map(|src| {
            ImageTag {
                src: &src,
                alt: article.images.preferred_alt(),
                width: feed.image.width,
                height: feed.image.height,
                class: &feed.image.class,
            }
            .render()
        });

        let intro = substitution.substitute(&article.introtext);
        let intro = replace_nbsp(&intro);
        let intro = if feed.raw_html {
            intro
        } else {
            escape_html(&intro).into_owned().into()
        };
        let content = render_content(&title, figure.as_deref(), &intro);

        Self {
            link,
            pub_date,
            author: escape(&article.author).into_owned(),
            topic: title,
            content,
        }
    }
}

/// `<site>/<category route>/<alias>`
fn article_link(article: &Article, ctx: &SiteContext) -> String {
    let route = article.category_route.trim_matches('/');
    if route.is_empty() {
        ctx.link(&article.alias)
    } else {
        ctx.link(&format!("{}/{}", route, article.alias))
    }
}

/// Item body: heading, optional image block, intro text.
fn render_content(title: &str, figure: Option<&str>, intro: &str) -> String {
    let mut html = String::with_capacity(64 + title.len() + intro.len());
    html.push_str("<header><h1>");
    html.push_str(title);
    html.push_str("</h1></header>");
    if let Some(figure) = figure {
        html.push_str("<div>");
        html.push_str(figure);
        html.push_str("</div>");
    }
    html.push_str(intro.trim());
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::RevarVariable,
        content::ArticleImages,
        site::test_context,
        substitute::{NoSubstitution, Revars},
    };
    use chrono::FixedOffset;
    use std::path::Path;

    fn article() -> Article {
        Article {
            id: 1,
            title: "Tom & Jerry".into(),
            alias: "tom-and-jerry".into(),
            catid: 5,
            category_route: "news/cartoons".into(),
            author: "Editor".into(),
            created: "2024-01-10 08:00:00".into(),
            modified: "2024-01-15 10:30:45".into(),
            introtext: "<p>Call&nbsp;{phone}</p>".into(),
            images: ArticleImages {
                image_intro: "images/tom.jpg#joomlaImage://local-images/tom.jpg".into(),
                image_intro_alt: "Tom".into(),
                ..Default::default()
            },
            state: 1,
            publish_up: None,
            publish_down: None,
            ordering: 0,
        }
    }

    #[test]
    fn test_from_article() {
        let ctx = test_context(Path::new("/tmp"));
        let item = TurboItem::from_article(&article(), &ctx, &NoSubstitution, &FeedSectionConfig::default());

        assert_eq!(item.link, "https://example.com/news/cartoons/tom-and-jerry");
        assert_eq!(item.topic, "Tom &amp; Jerry");
        assert_eq!(item.pub_date, "Mon, 15 Jan 2024 10:30:45 +0000");
        assert_eq!(item.author, "Editor");
        assert_eq!(
            item.content,
            "<header><h1>Tom &amp; Jerry</h1></header>\
             <div><img src=\"https://example.com/images/tom.jpg\" alt=\"Tom\" width=\"768\" height=\"512\" class=\"item-img\"></div>\
             &lt;p&gt;Call {phone}&lt;/p&gt;"
        );
    }

    #[test]
    fn test_raw_html_intro() {
        let ctx = test_context(Path::new("/tmp"));
        let feed = FeedSectionConfig {
            raw_html: true,
            ..Default::default()
        };
        let item = TurboItem::from_article(&article(), &ctx, &NoSubstitution, &feed);
        assert!(item.content.ends_with("</div><p>Call {phone}</p>"));
    }

    #[test]
    fn test_escaped_intro_keeps_entities() {
        let ctx = test_context(Path::new("/tmp"));
        let mut article = article();
        article.introtext = "&laquo;Tom&raquo; & it's <b>Jerry</b>".into();
        let item = TurboItem::from_article(&article, &ctx, &NoSubstitution, &FeedSectionConfig::default());
        assert!(item.content.ends_with("&laquo;Tom&raquo; &amp; it's &lt;b&gt;Jerry&lt;/b&gt;"));
    }

    #[test]
    fn test_substitutes_intro_text() {
        let ctx = test_context(Path::new("/tmp"));
        let revars = Revars::new(
            &[RevarVariable {
                variable: "{phone}".into(),
                value: "+7 000".into(),
            }],
            1,
        );
        let item = TurboItem::from_article(&article(), &ctx, &revars, &FeedSectionConfig::default());
        assert!(item.content.ends_with("&lt;p&gt;Call +7 000&lt;/p&gt;"));
    }

    #[test]
    fn test_date_uses_site_timezone() {
        let ctx = crate::site::SiteContext::new(
            "https://example.com",
            "/tmp",
            FixedOffset::east_opt(3 * 3600).unwrap(),
        )
        .unwrap();
        let item = TurboItem::from_article(&article(), &ctx, &NoSubstitution, &FeedSectionConfig::default());
        assert_eq!(item.pub_date, "Mon, 15 Jan 2024 13:30:45 +0300");
    }

    #[test]
    fn test_without_image() {
        let ctx = test_context(Path::new("/tmp"));
        let mut article = article();
        article.images = ArticleImages::default();

        let item = TurboItem::from_article(&article, &ctx, &NoSubstitution, &FeedSectionConfig::default());
        assert!(!item.content.contains("<img"));
        assert!(!item.content.contains("<div>"));
    }

    #[test]
    fn test_fulltext_image_fallback() {
        let ctx = test_context(Path::new("/tmp"));
        let mut article = article();
        article.images = ArticleImages {
            image_fulltext: "/images/full.jpg".into(),
            image_fulltext_alt: "Full".into(),
            ..Default::default()
        };

        let item = TurboItem::from_article(&article, &ctx, &NoSubstitution, &FeedSectionConfig::default());
        assert!(item.content.contains(r#"src="https://example.com/images/full.jpg" alt="Full""#));
    }

    #[test]
    fn test_link_without_category_route() {
        let ctx = test_context(Path::new("/tmp"));
        let mut article = article();
        article.category_route = String::new();
        assert_eq!(article_link(&article, &ctx), "https://example.com/tom-and-jerry");
    }
}
