//! Configuration for the storyboard generator.
//!
//! Values come from the bundled `storyboard.toml`, optionally overridden by
//! `~/.config/storyboard/storyboard.toml` and then `./storyboard.toml`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;

pub use config::{BoardConfig, ExportConfig, GeminiConfig, StoryboardConfig};
