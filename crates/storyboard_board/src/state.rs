//! Application state owned by a storyboard session.

use derive_getters::Getters;
use storyboard_config::BoardConfig;
use storyboard_core::{AspectRatio, Scene};
use storyboard_error::{BoardError, BoardErrorKind, StoryboardResult};
use uuid::Uuid;

use crate::ReferenceStore;

/// Render settings applied to every scene.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Settings {
    /// Frame shape requested from the image model
    aspect_ratio: AspectRatio,
    /// Style override appended to every prompt; empty disables it
    style: String,
}

impl Settings {
    /// Create settings.
    pub fn new(aspect_ratio: AspectRatio, style: impl Into<String>) -> Self {
        Self {
            aspect_ratio,
            style: style.into(),
        }
    }

    /// Replace the aspect ratio.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: AspectRatio) {
        self.aspect_ratio = aspect_ratio;
    }

    /// Replace the style override.
    pub fn set_style(&mut self, style: impl Into<String>) {
        self.style = style.into();
    }
}

impl From<&BoardConfig> for Settings {
    fn from(config: &BoardConfig) -> Self {
        Self::new(config.aspect_ratio, config.style.clone())
    }
}

/// Scenes, references and settings of one session.
///
/// Scenes are kept in display and export order. Every scene mutation goes
/// through [`BoardState::update_scene`], which rewrites a whole scene record
/// in place.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct BoardState {
    /// Ordered scenes
    scenes: Vec<Scene>,
    /// Reference collections
    references: ReferenceStore,
    /// Render settings
    settings: Settings,
}

impl BoardState {
    /// Empty state with the given settings.
    pub fn new(settings: Settings) -> Self {
        Self {
            scenes: Vec::new(),
            references: ReferenceStore::default(),
            settings,
        }
    }

    /// Mutable access to the reference collections.
    pub fn references_mut(&mut self) -> &mut ReferenceStore {
        &mut self.references
    }

    /// Mutable access to the render settings.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Append a scene, returning its index.
    pub fn append_scene(&mut self, scene: Scene) -> usize {
        self.scenes.push(scene);
        self.scenes.len() - 1
    }

    /// Remove every scene.
    pub fn clear_scenes(&mut self) {
        self.scenes.clear();
    }

    /// Index of the scene with `id`.
    pub fn index_of(&self, id: Uuid) -> Option<usize> {
        self.scenes.iter().position(|scene| scene.id() == id)
    }

    /// Scene with `id`.
    pub fn scene(&self, id: Uuid) -> Option<&Scene> {
        self.scenes.iter().find(|scene| scene.id() == id)
    }

    /// Id of the scene at 1-based `position`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardErrorKind::ScenePosition`] if there is no such scene.
    pub fn id_at(&self, position: usize) -> StoryboardResult<Uuid> {
        position
            .checked_sub(1)
            .and_then(|index| self.scenes.get(index))
            .map(Scene::id)
            .ok_or_else(|| BoardError::new(BoardErrorKind::ScenePosition(position)).into())
    }

    /// Apply `update` to the scene with `id`, returning its index and the
    /// updated record.
    ///
    /// # Errors
    ///
    /// Returns [`BoardErrorKind::SceneNotFound`] if no scene has `id`.
    pub fn update_scene<F>(&mut self, id: Uuid, update: F) -> StoryboardResult<(usize, Scene)>
    where
        F: FnOnce(&mut Scene),
    {
        let index = self
            .index_of(id)
            .ok_or_else(|| BoardError::new(BoardErrorKind::SceneNotFound(id.to_string())))?;
        let mut scene = self.scenes[index].clone();
        update(&mut scene);
        self.scenes[index] = scene.clone();
        Ok((index, scene))
    }

    /// Remove the scene with `id`, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`BoardErrorKind::SceneNotFound`] if no scene has `id`.
    pub fn remove_scene(&mut self, id: Uuid) -> StoryboardResult<Scene> {
        let index = self
            .index_of(id)
            .ok_or_else(|| BoardError::new(BoardErrorKind::SceneNotFound(id.to_string())))?;
        Ok(self.scenes.remove(index))
    }
}
