//! Feed generators.
//!
//! - **Turbo**: Yandex Turbo RSS channels (`<alias>.turbo.xml`)

pub mod turbo;
