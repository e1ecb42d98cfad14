//! Google Gemini API client implementation.
//!
//! [`GeminiClient`] talks to the REST `generateContent` endpoint and supports:
//! - Text output (subject descriptions)
//! - Schema-constrained JSON output (scene lists)
//! - Image output with inline image inputs (scene renders, sketches)

mod client;
mod conversion;
mod dto;

pub use client::GeminiClient;
pub use dto::{
    Candidate, Content, GeminiRequest, GeminiResponse, GenerationConfig, ImageConfig, InlineData,
    InlineDataPart, Part, TextPart,
};

/// Result type for Gemini operations.
pub type GeminiResult<T> = Result<T, storyboard_error::GeminiError>;
