//! Image URL normalization.
//!
//! Feed readers fetch images from outside the site, so every image reference
//! must become an absolute URL:
//!
//! | Reference                    | Result                              |
//! |------------------------------|-------------------------------------|
//! | `https://cdn.example/a.jpg`  | unchanged                           |
//! | `/images/a.jpg`              | `https://example.com/images/a.jpg`  |
//! | `images/a.jpg`               | `https://example.com/images/a.jpg`  |

use crate::site::SiteContext;

/// Marker the media manager appends to stored image references.
const MEDIA_SUFFIX: &str = "#joomlaImage://";

/// Strip the media manager suffix (`images/a.jpg#joomlaImage://local-images/a.jpg?width=800`).
pub fn clean_image_url(image: &str) -> &str {
    match image.find(MEDIA_SUFFIX) {
        Some(pos) if pos > 0 => &image[..pos],
        _ => image,
    }
}

/// Resolve an image reference to an absolute URL.
pub fn normalize_image_url(image: &str, ctx: &SiteContext) -> String {
    if image.starts_with("http://") || image.starts_with("https://") {
        image.to_string()
    } else if image.starts_with('/') {
        ctx.origin_link(image)
    } else {
        ctx.link(image)
    }
}

/// Clean and normalize; `None` for an empty reference.
pub fn resolve_image(image: &str, ctx: &SiteContext) -> Option<String> {
    let image = clean_image_url(image.trim());
    (!image.is_empty()).then(|| normalize_image_url(image, ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::test_context;
    use std::path::Path;

    #[test]
    fn test_absolute_urls_unchanged() {
        let ctx = test_context(Path::new("/tmp"));
        assert_eq!(normalize_image_url("http://x", &ctx), "http://x");
        assert_eq!(normalize_image_url("https://x", &ctx), "https://x");
    }

    #[test]
    fn test_root_relative() {
        let ctx = test_context(Path::new("/tmp"));
        assert_eq!(
            normalize_image_url("/a/b.jpg", &ctx),
            "https://example.com/a/b.jpg"
        );
    }

    #[test]
    fn test_site_relative() {
        let ctx = test_context(Path::new("/tmp"));
        assert_eq!(
            normalize_image_url("a/b.jpg", &ctx),
            "https://example.com/a/b.jpg"
        );
    }

    #[test]
    fn test_clean_image_url() {
        assert_eq!(
            clean_image_url("images/a.jpg#joomlaImage://local-images/a.jpg?width=800&height=600"),
            "images/a.jpg"
        );
        assert_eq!(clean_image_url("images/a.jpg"), "images/a.jpg");
        assert_eq!(clean_image_url("#joomlaImage://x"), "#joomlaImage://x");
    }

    #[test]
    fn test_resolve_image() {
        let ctx = test_context(Path::new("/tmp"));
        assert_eq!(
            resolve_image("images/a.jpg#joomlaImage://local-images/a.jpg", &ctx).as_deref(),
            Some("https://example.com/images/a.jpg")
        );
        assert_eq!(resolve_image("", &ctx), None);
        assert_eq!(resolve_image("  ", &ctx), None);
    }
}
