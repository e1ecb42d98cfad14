//! Archive packaging for finished storyboards.
//!
//! Every scene with an image becomes one `scene_NNN.png` entry, numbered by
//! the scene's 1-based position in the full sequence. Gaps are kept, so a
//! storyboard whose second and fourth scenes rendered exports
//! `scene_002.png` and `scene_004.png`.
//!
//! # Example
//!
//! ```
//! use storyboard_core::{ImageData, Scene};
//! use storyboard_export::package;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut scene = Scene::new("A lighthouse at dusk");
//! scene.set_image(Some(ImageData::png(vec![1, 2, 3])));
//!
//! let archive = package(&[scene], None).await?;
//! assert_eq!(archive.entries(), &["scene_001.png".to_string()]);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod archive;
mod sketch;

pub use archive::{Archive, DEFAULT_ARCHIVE_NAME, entry_name, package};
pub use sketch::SketchConverter;
