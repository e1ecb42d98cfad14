//! Shared request construction.

use storyboard_core::{AspectRatio, GenerateRequest, Part, ResponseFormat};
use storyboard_error::{BuilderError, StoryboardResult};

/// Build a single-turn request, lifting builder failures into [`BuilderError`].
pub(crate) fn build_request(
    parts: Vec<Part>,
    response_format: ResponseFormat,
    aspect_ratio: Option<AspectRatio>,
) -> StoryboardResult<GenerateRequest> {
    GenerateRequest::builder()
        .parts(parts)
        .response_format(response_format)
        .aspect_ratio(aspect_ratio)
        .build()
        .map_err(|e| BuilderError::from(format!("Failed to build request: {}", e)).into())
}
