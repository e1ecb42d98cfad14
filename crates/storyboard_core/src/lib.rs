//! Core data types for the storyboard generator.
//!
//! This crate holds the storyboard data model (scenes, reference images,
//! aspect ratios) and the provider-neutral request/response types exchanged
//! with a generation driver.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod aspect;
mod image;
mod output;
mod part;
mod reference;
mod request;
mod scene;

pub use aspect::AspectRatio;
pub use image::ImageData;
pub use output::Output;
pub use part::Part;
pub use reference::{ReferenceImage, ReferenceKind};
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse, ResponseFormat};
pub use scene::{Scene, SceneStatus};
