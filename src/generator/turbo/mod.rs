//! Yandex Turbo feed generation.
//!
//! # Feed Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <rss xmlns:yandex="http://news.yandex.ru" xmlns:media="http://search.yahoo.com/mrss/" xmlns:turbo="http://turbo.yandex.ru" version="2.0">
//!   <channel>
//!     <title>News</title>
//!     <link>https://example.com/news</link>
//!     <description>Latest news</description>
//!     <language>ru</language>
//!     <item turbo="true">
//!       <turbo:extendedHtml>true</turbo:extendedHtml>
//!       <link>https://example.com/news/hello</link>
//!       <turbo:source>https://example.com/news/hello</turbo:source>
//!       <turbo:topic>Hello</turbo:topic>
//!       <pubDate>Mon, 15 Jan 2024 13:30:45 +0300</pubDate>
//!       <author>Editor</author>
//!       <turbo:content><![CDATA[<header><h1>Hello</h1></header>...]]></turbo:content>
//!     </item>
//!   </channel>
//! </rss>
//! ```

mod channel;
mod image;
mod item;

pub use channel::ChannelInfo;
pub use item::TurboItem;

use crate::log;
use anyhow::{Context, Result, bail};
use quick_xml::{
    Writer,
    events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use std::{
    fs,
    io::Cursor,
    path::{Path, PathBuf},
};

const NS_YANDEX: &str = "http://news.yandex.ru";
const NS_MEDIA: &str = "http://search.yahoo.com/mrss/";
const NS_TURBO: &str = "http://turbo.yandex.ru";

/// Output file suffix after the category alias.
const FEED_SUFFIX: &str = ".turbo.xml";

type XmlWriter = Writer<Cursor<Vec<u8>>>;

/// One channel with its items, in selection order.
#[derive(Debug, Clone)]
pub struct TurboFeed {
    pub channel: ChannelInfo,
    pub items: Vec<TurboItem>,
}

impl TurboFeed {
    /// Serialize the feed. `minify` drops indentation and line breaks between
    /// elements; text and CDATA content is written unchanged either way.
    pub fn into_xml(self, minify: bool) -> Result<String> {
        let buf = Cursor::new(Vec::with_capacity(4096));
        let mut w = if minify {
            Writer::new(buf)
        } else {
            Writer::new_with_indent(buf, b' ', 2)
        };

        w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        w.write_event(Event::Start(BytesStart::new("rss").with_attributes([
            ("xmlns:yandex", NS_YANDEX),
            ("xmlns:media", NS_MEDIA),
            ("xmlns:turbo", NS_TURBO),
            ("version", "2.0"),
        ])))?;
        w.write_event(Event::Start(BytesStart::new("channel")))?;

        text_element(&mut w, "title", &self.channel.title)?;
        text_element(&mut w, "link", &self.channel.link)?;
        text_element(&mut w, "description", &self.channel.description)?;
        text_element(&mut w, "language", &self.channel.language)?;

        for item in &self.items {
            write_item(&mut w, item)?;
        }

        w.write_event(Event::End(BytesEnd::new("channel")))?;
        w.write_event(Event::End(BytesEnd::new("rss")))?;

        let mut xml = String::from_utf8(w.into_inner().into_inner())
            .context("feed XML is not valid UTF-8")?;
        if !minify {
            xml.push('\n');
        }
        Ok(xml)
    }
}

fn write_item(w: &mut XmlWriter, item: &TurboItem) -> Result<()> {
    w.write_event(Event::Start(
        BytesStart::new("item").with_attributes([("turbo", "true")]),
    ))?;
    text_element(w, "turbo:extendedHtml", "true")?;
    text_element(w, "link", &item.link)?;
    text_element(w, "turbo:source", &item.link)?;
    text_element(w, "turbo:topic", &item.topic)?;
    text_element(w, "pubDate", &item.pub_date)?;
    text_element(w, "author", &item.author)?;

    w.write_event(Event::Start(BytesStart::new("turbo:content")))?;
    for section in cdata_sections(&item.content) {
        w.write_event(Event::CData(BytesCData::new(section)))?;
    }
    w.write_event(Event::End(BytesEnd::new("turbo:content")))?;

    w.write_event(Event::End(BytesEnd::new("item")))?;
    Ok(())
}

/// Write `<name>escaped</name>`; `escaped` must already be XML-escaped.
fn text_element(w: &mut XmlWriter, name: &str, escaped: &str) -> Result<()> {
    w.write_event(Event::Start(BytesStart::new(name)))?;
    w.write_event(Event::Text(BytesText::from_escaped(escaped)))?;
    w.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Split text so no CDATA section contains `]]>`.
fn cdata_sections(s: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut rest = s;
    while let Some(pos) = rest.find("]]>") {
        sections.push(&rest[..pos + 2]);
        rest = &rest[pos + 2..];
    }
    sections.push(rest);
    sections
}

/// `<media root>/<directory>/<alias>.turbo.xml`
pub fn feed_path(media_root: &Path, directory: &Path, alias: &str) -> Result<PathBuf> {
    let alias = alias.trim_matches('/');
    if alias.is_empty() || alias.contains("..") {
        bail!("category alias '{alias}' cannot name a feed file");
    }
    Ok(media_root.join(directory).join(format!("{alias}{FEED_SUFFIX}")))
}

/// Write the feed, replacing any previous file.
pub fn write_feed(feed: TurboFeed, path: &Path, minify: bool) -> Result<()> {
    let xml = feed.into_xml(minify)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create feed directory {}", parent.display()))?;
    }
    fs::write(path, xml)
        .with_context(|| format!("Failed to write feed to {}", path.display()))?;

    log!("turbo"; "{}", path.file_name().unwrap_or_default().to_string_lossy());
    Ok(())
}
