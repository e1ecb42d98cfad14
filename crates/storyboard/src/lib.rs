//! Storyboard - turn a story into a consistent, AI-rendered storyboard
//!
//! A story is split into scene prompts, reference images keep characters and
//! settings consistent across scenes, every scene is rendered in order, and
//! the result is exported as a zip of `scene_NNN.png` files.
//!
//! # Features
//!
//! - **Reference conditioning**: `[CHARACTER: label]` / `[BACKGROUND: label]`
//!   tags in scene prompts pick reference images by label
//! - **Reference synthesis**: missing references are drawn from the story
//! - **Sequential rendering**: scenes complete in story order
//! - **Sketch export**: optional line-art conversion of every render
//!
//! # Quick Start
//!
//! ```no_run
//! use storyboard::{GeminiClient, Storyboard, StoryboardConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StoryboardConfig::load()?;
//! let client = GeminiClient::from_config(&config.gemini)?;
//! let mut board = Storyboard::new(client, &config);
//!
//! board.generate_story("A fox finds a lantern in the snow.").await?;
//! board.export(true).await?.write_to("out").await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod input;
mod telemetry;

pub use storyboard_board::{
    ACCEPTED_MIME_TYPES, BoardEvent, BoardState, Conditioning, ReferenceStore, ResolvedPrompt,
    SKETCH_INSTRUCTION, SceneRenderer, Settings, Storyboard, compile_scenes, describe_subject,
    first_tag, parse_string_list, resolve_tags, strip_tags, styled_prompt, synthesize_reference,
};
pub use storyboard_config::{BoardConfig, ExportConfig, GeminiConfig, StoryboardConfig};
pub use storyboard_core::{
    AspectRatio, GenerateRequest, GenerateRequestBuilder, GenerateResponse, ImageData, Output,
    Part, ReferenceImage, ReferenceKind, ResponseFormat, Scene, SceneStatus,
};
pub use storyboard_error::{
    BoardError, BoardErrorKind, BuilderError, BuilderErrorKind, ConfigError, ExportError,
    ExportErrorKind, GeminiError, GeminiErrorKind, JsonError, StorageError,
    StorageErrorKind, StoryboardError, StoryboardErrorKind, StoryboardResult,
};
pub use storyboard_export::{Archive, DEFAULT_ARCHIVE_NAME, SketchConverter, entry_name, package};
pub use storyboard_interface::GenerationDriver;
pub use storyboard_models::GeminiClient;
pub use input::{ReferenceSpec, load_image, mime_for_path, read_story};
pub use telemetry::init_console_telemetry;
