//! Labeled reference images used to condition generation.

use crate::ImageData;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which reference collection an image belongs to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum ReferenceKind {
    /// A character whose appearance should stay consistent across scenes
    #[display("character")]
    Character,
    /// A setting whose environment should stay consistent across scenes
    #[display("background")]
    Background,
}

impl ReferenceKind {
    /// Tag name used inside scene prompts, e.g. `[CHARACTER: Mira]`.
    pub fn tag_name(&self) -> &'static str {
        match self {
            ReferenceKind::Character => "CHARACTER",
            ReferenceKind::Background => "BACKGROUND",
        }
    }

    /// Label given to the `n`th upload of this kind (1-based).
    ///
    /// # Examples
    ///
    /// ```
    /// use storyboard_core::ReferenceKind;
    ///
    /// assert_eq!(ReferenceKind::Character.default_upload_label(2), "Character 2");
    /// ```
    pub fn default_upload_label(&self, n: usize) -> String {
        match self {
            ReferenceKind::Character => format!("Character {}", n),
            ReferenceKind::Background => format!("Background {}", n),
        }
    }
}

/// A labeled image supplied by the user or synthesized from the story.
///
/// The label is the only way a scene prompt can refer to the image, and it is
/// user-editable, so it is not guaranteed unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ReferenceImage {
    /// Unique identifier
    id: Uuid,
    /// Lookup key for tag resolution
    label: String,
    /// Image payload
    image: ImageData,
}

impl ReferenceImage {
    /// Create a reference with a fresh id.
    pub fn new(label: impl Into<String>, image: ImageData) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
            image,
        }
    }

    /// Replace the label.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }
}
