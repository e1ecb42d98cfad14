//! Output types from generation responses.

use crate::ImageData;
use serde::{Deserialize, Serialize};

/// A single piece of generated content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Output {
    /// Plain text output
    Text(String),
    /// Generated image
    Image(ImageData),
}
