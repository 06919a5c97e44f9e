//! `[site]` configuration.
//!
//! Where the site lives and where its content comes from.

use crate::{
    config::{ConfigDiagnostics, FieldPath},
    utils::date::parse_timezone,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Public site URL (e.g., "https://example.com").
    pub url: Option<String>,

    /// Site timezone for publish dates: "UTC" or "+03:00".
    pub timezone: String,

    /// Media root; feed files are written below it.
    pub media_root: PathBuf,

    /// Content snapshot exported from the CMS.
    pub content: PathBuf,
}

impl Default for SiteSectionConfig {
    fn default() -> Self {
        Self {
            url: None,
            timezone: "UTC".into(),
            media_root: "media".into(),
            content: "content.json".into(),
        }
    }
}

impl SiteSectionConfig {
    pub const URL: FieldPath = FieldPath::new("site.url");
    pub const TIMEZONE: FieldPath = FieldPath::new("site.timezone");

    /// Validate site configuration.
    ///
    /// # Checks
    /// - `url` is set, with an http(s) scheme and a host
    /// - `timezone` is `UTC` or a fixed offset
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        match &self.url {
            None => diag.error_with_hint(
                Self::URL,
                "site URL is not configured",
                format!("set {}, e.g.: \"https://example.com\"", Self::URL),
            ),
            Some(url_str) => match url::Url::parse(url_str) {
                Ok(parsed) => {
                    if !matches!(parsed.scheme(), "http" | "https") {
                        diag.error_with_hint(
                            Self::URL,
                            format!(
                                "scheme '{}' not supported, must be http or https",
                                parsed.scheme()
                            ),
                            "use format like https://example.com",
                        );
                    }
                    if parsed.host_str().is_none() {
                        diag.error_with_hint(
                            Self::URL,
                            "URL must have a valid host",
                            "use format like https://example.com",
                        );
                    }
                }
                Err(e) => diag.error_with_hint(
                    Self::URL,
                    format!("invalid URL: {}", e),
                    "use format like https://example.com",
                ),
            },
        }

        if parse_timezone(&self.timezone).is_none() {
            diag.error_with_hint(
                Self::TIMEZONE,
                format!("unsupported timezone '{}'", self.timezone),
                "use \"UTC\" or a fixed offset such as \"+03:00\"",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(site: &SiteSectionConfig) -> ConfigDiagnostics {
        let mut diag = ConfigDiagnostics::new();
        site.validate(&mut diag);
        diag
    }

    #[test]
    fn test_defaults() {
        let site = SiteSectionConfig::default();
        assert_eq!(site.timezone, "UTC");
        assert_eq!(site.media_root, PathBuf::from("media"));
        assert_eq!(site.content, PathBuf::from("content.json"));
    }

    #[test]
    fn test_missing_url() {
        let diag = validate(&SiteSectionConfig::default());
        assert_eq!(diag.errors().len(), 1);
        assert_eq!(diag.errors()[0].field, SiteSectionConfig::URL);
    }

    #[test]
    fn test_invalid_scheme_and_timezone() {
        let site = SiteSectionConfig {
            url: Some("ftp://example.com".into()),
            timezone: "Europe/Moscow".into(),
            ..Default::default()
        };
        let diag = validate(&site);
        assert_eq!(diag.errors().len(), 2);
    }

    #[test]
    fn test_valid_site() {
        let site = SiteSectionConfig {
            url: Some("https://example.com".into()),
            timezone: "+03:00".into(),
            ..Default::default()
        };
        assert!(!validate(&site).has_errors());
    }
}
