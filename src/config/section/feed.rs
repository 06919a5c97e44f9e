//! `[feed]` output configuration.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::{Component, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedSectionConfig {
    /// Output directory below the media root.
    pub directory: PathBuf,
    /// Channel language tag.
    pub language: String,
    /// Write the XML without indentation.
    pub minify: bool,
    /// Put intro HTML into `<turbo:content>` as markup. By default it is
    /// HTML-escaped like every other field.
    pub raw_html: bool,
    /// Image tag rendered at the top of each item body.
    pub image: ImageConfig,
}

impl Default for FeedSectionConfig {
    fn default() -> Self {
        Self {
            directory: "yandex".into(),
            language: "ru".into(),
            minify: false,
            raw_html: false,
            image: ImageConfig::default(),
        }
    }
}

/// `[feed.image]`: attributes of the item image tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub width: u32,
    pub height: u32,
    pub class: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            width: 768,
            height: 512,
            class: "item-img".into(),
        }
    }
}

impl FeedSectionConfig {
    pub const DIRECTORY: FieldPath = FieldPath::new("feed.directory");
    pub const LANGUAGE: FieldPath = FieldPath::new("feed.language");

    /// The output directory must stay inside the media root.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let escapes = self
            .directory
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes || self.directory.as_os_str().is_empty() {
            diag.error_with_hint(
                Self::DIRECTORY,
                format!(
                    "'{}' must be a relative path inside the media root",
                    self.directory.display()
                ),
                "use a plain directory name, e.g.: \"yandex\"",
            );
        }

        if self.language.trim().is_empty() {
            diag.error(Self::LANGUAGE, "language tag must not be empty");
        }
    }
}
