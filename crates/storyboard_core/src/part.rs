//! Request content parts.

use crate::ImageData;
use serde::{Deserialize, Serialize};

/// One ordered piece of a multimodal generation request.
///
/// # Examples
///
/// ```
/// use storyboard_core::{ImageData, Part};
///
/// let parts = vec![
///     Part::Text("A knight crossing a bridge".to_string()),
///     Part::Image(ImageData::png(vec![0x89, 0x50])),
/// ];
/// assert_eq!(parts[0].as_text(), Some("A knight crossing a bridge"));
/// assert!(parts[1].as_image().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Part {
    /// Plain text
    Text(String),
    /// Inline image payload
    Image(ImageData),
}

impl Part {
    /// Text content, if this is a text part.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text(text) => Some(text),
            Part::Image(_) => None,
        }
    }

    /// Image payload, if this is an image part.
    pub fn as_image(&self) -> Option<&ImageData> {
        match self {
            Part::Image(image) => Some(image),
            Part::Text(_) => None,
        }
    }
}

impl From<ImageData> for Part {
    fn from(image: ImageData) -> Self {
        Part::Image(image)
    }
}

impl From<String> for Part {
    fn from(text: String) -> Self {
        Part::Text(text)
    }
}

impl From<&str> for Part {
    fn from(text: &str) -> Self {
        Part::Text(text.to_string())
    }
}
