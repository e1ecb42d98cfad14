//! Wire types for the Gemini `generateContent` REST endpoint.
//!
//! # Request shape
//!
//! ```json
//! {
//!   "contents": [{ "role": "user", "parts": [{ "text": "..." }, { "inlineData": { ... } }] }],
//!   "generationConfig": { "responseModalities": ["IMAGE"], "imageConfig": { "aspectRatio": "16:9" } }
//! }
//! ```
//!
//! # Response shape
//!
//! ```json
//! { "candidates": [{ "content": { "parts": [...] }, "finishReason": "STOP" }] }
//! ```

use serde::{Deserialize, Serialize};

//
// ─── REQUEST ────────────────────────────────────────────────────────────────
//

/// Body of a `generateContent` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    /// Conversation turns (a single user turn for every storyboard call)
    pub contents: Vec<Content>,

    /// Generation parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// Generation configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Response modalities (e.g., ["TEXT"], ["IMAGE"])
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<String>>,

    /// MIME type of a text response, e.g. "application/json"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,

    /// OpenAPI-style schema the JSON response must follow
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,

    /// Image output settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_config: Option<ImageConfig>,
}

/// Image output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    /// Aspect ratio such as "16:9"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
}

/// A single conversation turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    /// Role ("user", "model")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Content parts
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Content part (text, inline data, or anything else the API adds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    /// Text content
    Text(TextPart),
    /// Inline data (images)
    InlineData(InlineDataPart),
    /// Part types this client does not interpret
    Other(serde_json::Value),
}

/// Text content part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPart {
    /// The text
    pub text: String,
}

/// Inline data content part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineDataPart {
    /// The payload
    pub inline_data: InlineData,
}

/// Inline data with MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// MIME type, e.g. "image/png"
    pub mime_type: String,
    /// Base64-encoded bytes
    pub data: String,
}

//
// ─── RESPONSE ───────────────────────────────────────────────────────────────
//

/// Body returned by `generateContent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    /// Generated candidates (usually one)
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One generated candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Generated content, absent when generation was blocked
    #[serde(default)]
    pub content: Option<Content>,

    /// Why generation stopped (e.g., "STOP", "SAFETY")
    #[serde(default)]
    pub finish_reason: Option<String>,
}
