//! Configuration section definitions.
//!
//! Each module corresponds to a section in `turbofeed.toml`:
//!
//! | Module   | TOML Section | Purpose                                 |
//! |----------|--------------|-----------------------------------------|
//! | `site`   | `[site]`     | Site URL, timezone, media root, content |
//! | `feed`   | `[feed]`     | Output directory, language, image tag   |
//! | `revars` | `[revars]`   | Placeholder substitution                |
//! | `task`   | `[[task]]`   | Scheduled export tasks                  |

mod feed;
mod revars;
mod site;
mod task;

pub use feed::{FeedSectionConfig, ImageConfig};
pub use revars::{RevarVariable, RevarsConfig};
pub use site::SiteSectionConfig;
pub use task::{ArticleListMode, TaskConfig, TaskParams, validate_tasks};
