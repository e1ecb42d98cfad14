//! Binary image payloads.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// An image payload together with its MIME type.
///
/// # Examples
///
/// ```
/// use storyboard_core::ImageData;
///
/// let image = ImageData::png(vec![0x89, 0x50, 0x4E, 0x47]);
/// assert_eq!(image.mime(), "image/png");
/// assert_eq!(ImageData::from_base64(&image.to_base64(), "image/png").unwrap(), image);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageData {
    bytes: Vec<u8>,
    mime: String,
}

impl ImageData {
    /// Wrap raw bytes with an explicit MIME type.
    pub fn new(bytes: Vec<u8>, mime: impl Into<String>) -> Self {
        Self {
            bytes,
            mime: mime.into(),
        }
    }

    /// Wrap raw PNG bytes.
    pub fn png(bytes: Vec<u8>) -> Self {
        Self::new(bytes, "image/png")
    }

    /// Decode a base64 payload as returned by inline-data APIs.
    pub fn from_base64(data: &str, mime: impl Into<String>) -> Result<Self, base64::DecodeError> {
        Ok(Self::new(STANDARD.decode(data)?, mime))
    }

    /// Encode the payload as standard base64.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// Raw image bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// MIME type, e.g. `image/png`.
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Size of the payload in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
