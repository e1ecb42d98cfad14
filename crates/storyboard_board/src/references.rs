//! Character and background reference collections.

use storyboard_core::{ImageData, ReferenceImage, ReferenceKind};
use storyboard_error::{BoardError, BoardErrorKind, StoryboardResult};
use tracing::debug;
use uuid::Uuid;

/// MIME types accepted for uploaded references.
pub const ACCEPTED_MIME_TYPES: [&str; 2] = ["image/png", "image/jpeg"];

/// The two labeled reference collections a storyboard is conditioned on.
///
/// Labels are user-editable and may collide; lookups return the first match
/// in collection order.
///
/// # Examples
///
/// ```
/// use storyboard_board::ReferenceStore;
/// use storyboard_core::{ImageData, ReferenceKind};
///
/// let mut store = ReferenceStore::default();
/// store.add(ReferenceKind::Character, ImageData::png(vec![1])).unwrap();
/// store.add(ReferenceKind::Character, ImageData::png(vec![2])).unwrap();
///
/// assert_eq!(store.labels(ReferenceKind::Character), vec!["Character 1", "Character 2"]);
/// assert!(store.is_empty(ReferenceKind::Background));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceStore {
    characters: Vec<ReferenceImage>,
    backgrounds: Vec<ReferenceImage>,
}

impl ReferenceStore {
    fn collection(&self, kind: ReferenceKind) -> &Vec<ReferenceImage> {
        match kind {
            ReferenceKind::Character => &self.characters,
            ReferenceKind::Background => &self.backgrounds,
        }
    }

    fn collection_mut(&mut self, kind: ReferenceKind) -> &mut Vec<ReferenceImage> {
        match kind {
            ReferenceKind::Character => &mut self.characters,
            ReferenceKind::Background => &mut self.backgrounds,
        }
    }

    /// Add an uploaded image under its default label (`Character 3`, ...).
    ///
    /// # Errors
    ///
    /// Returns [`BoardErrorKind::UnsupportedMime`] for anything other than
    /// PNG or JPEG.
    pub fn add(
        &mut self,
        kind: ReferenceKind,
        image: ImageData,
    ) -> StoryboardResult<&ReferenceImage> {
        let label = kind.default_upload_label(self.collection(kind).len() + 1);
        self.add_labeled(kind, label, image)
    }

    /// Add an image under an explicit label.
    ///
    /// # Errors
    ///
    /// Returns [`BoardErrorKind::UnsupportedMime`] for anything other than
    /// PNG or JPEG.
    pub fn add_labeled(
        &mut self,
        kind: ReferenceKind,
        label: impl Into<String>,
        image: ImageData,
    ) -> StoryboardResult<&ReferenceImage> {
        if !ACCEPTED_MIME_TYPES.contains(&image.mime()) {
            return Err(
                BoardError::new(BoardErrorKind::UnsupportedMime(image.mime().to_string())).into(),
            );
        }

        let reference = ReferenceImage::new(label, image);
        debug!(%kind, label = %reference.label(), "Adding reference");

        let collection = self.collection_mut(kind);
        collection.push(reference);
        Ok(&collection[collection.len() - 1])
    }

    /// Change the label of one reference.
    ///
    /// # Errors
    ///
    /// Returns [`BoardErrorKind::ReferenceNotFound`] if no reference has `id`.
    pub fn relabel(
        &mut self,
        kind: ReferenceKind,
        id: Uuid,
        label: impl Into<String>,
    ) -> StoryboardResult<()> {
        let reference = self
            .collection_mut(kind)
            .iter_mut()
            .find(|r| *r.id() == id)
            .ok_or_else(|| BoardError::new(BoardErrorKind::ReferenceNotFound(id.to_string())))?;
        reference.set_label(label);
        Ok(())
    }

    /// Remove one reference, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`BoardErrorKind::ReferenceNotFound`] if no reference has `id`.
    pub fn remove(&mut self, kind: ReferenceKind, id: Uuid) -> StoryboardResult<ReferenceImage> {
        let collection = self.collection_mut(kind);
        let index = collection
            .iter()
            .position(|r| *r.id() == id)
            .ok_or_else(|| BoardError::new(BoardErrorKind::ReferenceNotFound(id.to_string())))?;
        Ok(collection.remove(index))
    }

    /// Replace a whole collection.
    pub fn replace(&mut self, kind: ReferenceKind, references: Vec<ReferenceImage>) {
        *self.collection_mut(kind) = references;
    }

    /// All references of one kind, in insertion order.
    pub fn get(&self, kind: ReferenceKind) -> &[ReferenceImage] {
        self.collection(kind)
    }

    /// Labels of one kind, in insertion order.
    pub fn labels(&self, kind: ReferenceKind) -> Vec<String> {
        self.collection(kind).iter().map(|r| r.label().clone()).collect()
    }

    /// First reference whose label equals `label` exactly.
    pub fn find_by_label(&self, kind: ReferenceKind, label: &str) -> Option<&ReferenceImage> {
        self.collection(kind).iter().find(|r| r.label() == label)
    }

    /// Whether a collection has no references.
    pub fn is_empty(&self, kind: ReferenceKind) -> bool {
        self.collection(kind).is_empty()
    }
}
