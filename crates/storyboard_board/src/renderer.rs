//! Scene rendering and sketch conversion over a generation driver.

use async_trait::async_trait;
use storyboard_core::{GenerateRequest, ImageData, Part, ResponseFormat};
use storyboard_error::StoryboardResult;
use storyboard_export::SketchConverter;
use storyboard_interface::GenerationDriver;
use tracing::{debug, instrument, warn};

use crate::request::build_request;
use crate::{ReferenceStore, Settings, resolve_tags};

/// Instruction that turns a render into line art.
pub const SKETCH_INSTRUCTION: &str = "Convert this image into a clean, black and white line art \
    sketch. Maintain the original composition and aspect ratio.";

/// Final prompt text: tag-stripped prompt plus the style override clause.
///
/// # Examples
///
/// ```
/// use storyboard_board::styled_prompt;
///
/// assert_eq!(styled_prompt("A fox runs.", "ink wash"), "A fox runs. Official style override: ink wash.");
/// assert_eq!(styled_prompt("A fox runs.", ""), "A fox runs.");
/// ```
pub fn styled_prompt(stripped: &str, style: &str) -> String {
    if style.is_empty() {
        stripped.to_string()
    } else {
        format!("{} Official style override: {}.", stripped, style)
    }
}

/// Renders scene prompts to images through a [`GenerationDriver`].
///
/// Every failure degrades to `None`; callers decide what an absent image
/// means for the scene.
#[derive(Debug, Clone)]
pub struct SceneRenderer<D> {
    driver: D,
}

impl<D: GenerationDriver> SceneRenderer<D> {
    /// Wrap a driver.
    pub fn new(driver: D) -> Self {
        Self { driver }
    }

    /// The underlying driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Request built for a scene prompt.
    ///
    /// Parts are ordered: final text, then character instruction and image,
    /// then background instruction and image.
    ///
    /// # Errors
    ///
    /// Returns a builder error if the request cannot be assembled.
    pub fn render_request(
        &self,
        prompt: &str,
        settings: &Settings,
        references: &ReferenceStore,
    ) -> StoryboardResult<GenerateRequest> {
        let resolved = resolve_tags(prompt, references);
        let mut parts = vec![Part::Text(styled_prompt(resolved.text(), settings.style()))];
        parts.extend(resolved.conditioning().iter().flat_map(|c| c.parts()));

        build_request(parts, ResponseFormat::Image, Some(*settings.aspect_ratio()))
    }

    /// Render one scene prompt.
    #[instrument(
        skip(self, prompt, settings, references),
        fields(prompt_len = prompt.len(), aspect_ratio = %settings.aspect_ratio())
    )]
    pub async fn render(
        &self,
        prompt: &str,
        settings: &Settings,
        references: &ReferenceStore,
    ) -> Option<ImageData> {
        let result = match self.render_request(prompt, settings, references) {
            Ok(request) => self.request_image(&request).await,
            Err(e) => Err(e),
        };
        degrade(result, "Scene render")
    }

    /// Convert a rendered image into a line-art sketch.
    #[instrument(skip(self, image), fields(size = image.len(), mime = %image.mime()))]
    pub async fn sketchify(&self, image: &ImageData) -> Option<ImageData> {
        let result = match build_request(
            vec![
                Part::Image(image.clone()),
                Part::Text(SKETCH_INSTRUCTION.to_string()),
            ],
            ResponseFormat::Image,
            None,
        ) {
            Ok(request) => self.request_image(&request).await,
            Err(e) => Err(e),
        };
        degrade(result, "Sketch conversion")
    }

    async fn request_image(
        &self,
        request: &GenerateRequest,
    ) -> StoryboardResult<Option<ImageData>> {
        Ok(self.driver.generate(request).await?.into_first_image())
    }
}

fn degrade(result: StoryboardResult<Option<ImageData>>, operation: &str) -> Option<ImageData> {
    match result {
        Ok(Some(image)) => {
            debug!(operation, size = image.len(), "Received image");
            Some(image)
        }
        Ok(None) => {
            warn!(operation, "Response contained no image");
            None
        }
        Err(e) => {
            warn!(operation, error = %e, "Image request failed");
            None
        }
    }
}

#[async_trait]
impl<D: GenerationDriver> SketchConverter for SceneRenderer<D> {
    async fn sketch(&self, image: &ImageData) -> Option<ImageData> {
        self.sketchify(image).await
    }
}
