//! Storyboard scenes.

use crate::ImageData;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generation status of a scene.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum SceneStatus {
    /// A render request for this scene is in flight
    #[display("generating")]
    Generating,
    /// No request in flight
    #[default]
    #[display("idle")]
    Idle,
}

/// One storyboard panel: a prompt, its rendered image, and a status.
///
/// # Examples
///
/// ```
/// use storyboard_core::{ImageData, Scene, SceneStatus};
///
/// let mut scene = Scene::new("A lighthouse at dusk");
/// scene.set_image(Some(ImageData::png(vec![1, 2, 3])));
/// assert!(scene.current_image().is_some());
///
/// scene.set_status(SceneStatus::Generating);
/// assert!(scene.current_image().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    id: Uuid,
    prompt: String,
    image: Option<ImageData>,
    status: SceneStatus,
}

impl Scene {
    /// Create an idle scene without an image.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            prompt: prompt.into(),
            image: None,
            status: SceneStatus::Idle,
        }
    }

    /// Create a scene already marked as generating.
    pub fn pending(prompt: impl Into<String>) -> Self {
        Self {
            status: SceneStatus::Generating,
            ..Self::new(prompt)
        }
    }

    /// Unique identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Current prompt text.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Generation status.
    pub fn status(&self) -> SceneStatus {
        self.status
    }

    /// Whether a render for this scene is in flight.
    pub fn is_generating(&self) -> bool {
        self.status == SceneStatus::Generating
    }

    /// The image to present as this scene's result.
    ///
    /// `None` while generating, even if an earlier image is retained.
    pub fn current_image(&self) -> Option<&ImageData> {
        match self.status {
            SceneStatus::Generating => None,
            SceneStatus::Idle => self.image.as_ref(),
        }
    }

    /// Whether the scene has a presentable image.
    pub fn has_image(&self) -> bool {
        self.current_image().is_some()
    }

    /// Replace the prompt.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    /// Replace the image wholesale.
    pub fn set_image(&mut self, image: Option<ImageData>) {
        self.image = image;
    }

    /// Set the generation status.
    pub fn set_status(&mut self, status: SceneStatus) {
        self.status = status;
    }
}
