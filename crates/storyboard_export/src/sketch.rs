//! Line-art conversion seam used by export.

use async_trait::async_trait;
use storyboard_core::ImageData;

/// Converts a finished render into a line-art sketch.
///
/// Returning `None` means the conversion failed; the exporter then keeps the
/// original image for that entry.
#[async_trait]
pub trait SketchConverter: Send + Sync {
    /// Produce a sketch version of `image`.
    async fn sketch(&self, image: &ImageData) -> Option<ImageData>;
}
