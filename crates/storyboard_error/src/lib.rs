//! Error types for the storyboard generator.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! Every family converts into [`StoryboardError`] so `?` works across crates.
//!
//! # Examples
//!
//! ```
//! use storyboard_error::{StoryboardResult, StorageError, StorageErrorKind};
//!
//! fn fetch_image() -> StoryboardResult<Vec<u8>> {
//!     Err(StorageError::new(StorageErrorKind::FileRead("hero.png".to_string())))?
//! }
//!
//! assert!(fetch_image().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod board;
mod builder;
mod config;
mod error;
mod export;
mod gemini;
mod json;
mod storage;

pub use board::{BoardError, BoardErrorKind};
pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use error::{StoryboardError, StoryboardErrorKind, StoryboardResult};
pub use export::{ExportError, ExportErrorKind};
pub use gemini::{GeminiError, GeminiErrorKind};
pub use json::JsonError;
pub use storage::{StorageError, StorageErrorKind};
