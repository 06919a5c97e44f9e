//! HTML utility functions.
//!
//! Provides the text helpers used when embedding article fields in a feed:
//! - `escape()` - XML text from an HTML-encoded field, named entities decoded
//! - `escape_html()`, `escape_attr()` - HTML escaping that keeps existing entities
//! - `decode_entities()` - HTML5 named and numeric references to characters
//! - `strip_tags()` - plain text from an HTML fragment
//! - `replace_nbsp()` - `&nbsp;` to plain spaces
//! - `ImageTag` - `<img>` tag rendering

use quick_xml::escape::{resolve_html5_entity, unescape_with};
use regex::Regex;
use std::{borrow::Cow, fmt::Write, sync::LazyLock};

// =============================================================================
// HTML Escaping
// =============================================================================

/// Characters that require escaping (single quotes are left as is).
const ESCAPE_CHARS: [char; 4] = ['<', '>', '&', '"'];

/// Get the HTML entity for a special character.
#[inline]
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        _ => None,
    }
}

/// Escape a field for XML text content.
///
/// The field may already carry HTML entities (`&laquo;`, `&amp;`, `&#8212;`).
/// They are decoded first, so the output only contains the entities XML
/// predefines and nothing is encoded twice.
///
/// # Example
/// ```ignore
/// assert_eq!(escape("<b>"), "&lt;b&gt;");
/// assert_eq!(escape("Tom &amp; Jerry"), "Tom &amp; Jerry");
/// assert_eq!(escape("&laquo;News&raquo;"), "«News»");
/// ```
pub fn escape(s: &str) -> Cow<'_, str> {
    match decode_entities(s) {
        Cow::Borrowed(s) => encode(s, false),
        Cow::Owned(decoded) => Cow::Owned(encode(&decoded, false).into_owned()),
    }
}

/// Escape HTML special characters for HTML content.
///
/// Existing entities (`&amp;`, `&laquo;`, `&#x2014;`) are kept as they are.
/// Only valid where an HTML parser reads the result, e.g. inside CDATA.
#[inline]
pub fn escape_html(s: &str) -> Cow<'_, str> {
    encode(s, true)
}

/// Escape HTML attribute values.
///
/// Identical to `escape_html()` but semantically indicates attribute context.
#[inline]
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    escape_html(s)
}

/// Uses `Cow` to avoid allocation when no escaping is needed.
fn encode(s: &str, keep_entities: bool) -> Cow<'_, str> {
    if !s.contains(ESCAPE_CHARS) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 16);
    for (i, c) in s.char_indices() {
        if keep_entities && c == '&' && entity_len(&s[i..]).is_some() {
            result.push('&');
            continue;
        }
        match escape_char(c) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Decode HTML5 named and numeric character references.
///
/// Unknown names and stray ampersands (`R&D`) are left as text.
pub fn decode_entities(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    let mut last = 0;
    let mut changed = false;
    for (i, _) in s.match_indices('&') {
        if i < last {
            continue;
        }
        let Some(len) = entity_len(&s[i..]) else {
            continue;
        };
        if let Ok(decoded) = unescape_with(&s[i..i + len], resolve_html5_entity) {
            result.push_str(&s[last..i]);
            result.push_str(&decoded);
            last = i + len;
            changed = true;
        }
    }

    if !changed {
        return Cow::Borrowed(s);
    }
    result.push_str(&s[last..]);
    Cow::Owned(result)
}

/// Length of a well-formed entity at the start of `s` (which begins with `&`).
fn entity_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let body = &bytes[1..];
    let end = body.iter().take(32).position(|&b| b == b';')?;
    let name = &body[..end];

    let valid = match name {
        [b'#', b'x' | b'X', hex @ ..] => !hex.is_empty() && hex.iter().all(u8::is_ascii_hexdigit),
        [b'#', dec @ ..] => !dec.is_empty() && dec.iter().all(u8::is_ascii_digit),
        [first, rest @ ..] => {
            first.is_ascii_alphabetic() && rest.iter().all(u8::is_ascii_alphanumeric)
        }
        [] => false,
    };
    valid.then_some(end + 2)
}

// =============================================================================
// Text Extraction
// =============================================================================

/// Remove HTML tags, comments included, keeping the text between them.
pub fn strip_tags(s: &str) -> Cow<'_, str> {
    static RE_TAG: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->|</?[A-Za-z!][^>]*>").unwrap());

    RE_TAG.replace_all(s, "")
}

/// Replace `&nbsp;` entities with plain spaces.
#[inline]
pub fn replace_nbsp(s: &str) -> Cow<'_, str> {
    if s.contains("&nbsp;") {
        Cow::Owned(s.replace("&nbsp;", " "))
    } else {
        Cow::Borrowed(s)
    }
}

// =============================================================================
// Image Tag
// =============================================================================

/// `<img>` element with fixed rendering order: src, alt, width, height, class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTag<'a> {
    pub src: &'a str,
    pub alt: &'a str,
    pub width: u32,
    pub height: u32,
    pub class: &'a str,
}

impl ImageTag<'_> {
    pub fn render(&self) -> String {
        let mut html = String::with_capacity(96 + self.src.len() + self.alt.len());
        // Writing to a String cannot fail
        let _ = write!(
            html,
            r#"<img src="{}" alt="{}""#,
            escape_attr(self.src),
            escape_attr(self.alt)
        );
        if self.width > 0 {
            let _ = write!(html, r#" width="{}""#, self.width);
        }
        if self.height > 0 {
            let _ = write!(html, r#" height="{}""#, self.height);
        }
        if !self.class.is_empty() {
            let _ = write!(html, r#" class="{}""#, escape_attr(self.class));
        }
        html.push('>');
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain() {
        assert!(matches!(escape("hello world"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_special_chars() {
        assert_eq!(escape("<script>"), "&lt;script&gt;");
        assert_eq!(escape("a & b"), "a &amp; b");
        assert_eq!(escape(r#"say "hi""#), "say &quot;hi&quot;");
        assert_eq!(escape("it's"), "it's");
    }

    #[test]
    fn test_escape_decodes_html_entities() {
        assert_eq!(escape("Tom &amp; Jerry"), "Tom &amp; Jerry");
        assert_eq!(escape("&laquo;Новости&raquo; сайта"), "«Новости» сайта");
        assert_eq!(escape("R&D &copy; 2024"), "R&amp;D © 2024");
        assert_eq!(escape("a &#8212; b &#x2014; c"), "a — b — c");
        assert_eq!(escape("&lt;b&gt; &quot;x&quot;"), "&lt;b&gt; &quot;x&quot;");
        assert_eq!(escape("&unknown; &#;"), "&amp;unknown; &amp;#;");
    }

    #[test]
    fn test_escape_output_has_only_xml_entities() {
        let out = escape("&mdash; &hellip; &nbsp; AT&T; &amp;amp;");
        for (i, _) in out.match_indices('&') {
            let rest = &out[i..];
            assert!(
                ["&amp;", "&lt;", "&gt;", "&quot;"].iter().any(|e| rest.starts_with(e)),
                "unexpected entity in {out}"
            );
        }
    }

    #[test]
    fn test_escape_html_keeps_existing_entities() {
        assert_eq!(escape_html("Tom &amp; Jerry"), "Tom &amp; Jerry");
        assert_eq!(escape_html("a &#8212; b &#x2014; c"), "a &#8212; b &#x2014; c");
        assert_eq!(escape_html("&laquo;x&raquo; <p>"), "&laquo;x&raquo; &lt;p&gt;");
        assert_eq!(escape_html("AT&T; R&D"), "AT&T; R&amp;D");
        assert_eq!(escape_html("&#;"), "&amp;#;");
    }

    #[test]
    fn test_decode_entities() {
        assert!(matches!(decode_entities("plain"), Cow::Borrowed(_)));
        assert!(matches!(decode_entities("R&D"), Cow::Borrowed(_)));
        assert_eq!(decode_entities("&laquo;a&raquo;&#33;"), "«a»!");
        assert_eq!(decode_entities("&bogus;&amp;"), "&bogus;&");
    }

    #[test]
    fn test_escape_empty() {
        assert_eq!(escape(""), "");
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<p>Latest <b>news</b></p>"), "Latest news");
        assert_eq!(strip_tags("a <!-- note --> b"), "a  b");
        assert_eq!(strip_tags("1 < 2"), "1 < 2");
        assert_eq!(strip_tags("plain"), "plain");
    }

    #[test]
    fn test_replace_nbsp() {
        assert_eq!(replace_nbsp("a&nbsp;b&nbsp;c"), "a b c");
        assert!(matches!(replace_nbsp("abc"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_image_tag_render() {
        let tag = ImageTag {
            src: "https://example.com/images/a.jpg",
            alt: "A \"quoted\" alt",
            width: 768,
            height: 512,
            class: "item-img",
        };
        assert_eq!(
            tag.render(),
            r#"<img src="https://example.com/images/a.jpg" alt="A &quot;quoted&quot; alt" width="768" height="512" class="item-img">"#
        );
    }

    #[test]
    fn test_image_tag_skips_empty_dimensions() {
        let tag = ImageTag {
            src: "a.jpg",
            alt: "",
            width: 0,
            height: 0,
            class: "",
        };
        assert_eq!(tag.render(), r#"<img src="a.jpg" alt="">"#);
    }
}
