//! The storyboard session: story in, rendered scenes and archive out.

use storyboard_config::StoryboardConfig;
use storyboard_core::{AspectRatio, ReferenceKind, Scene, SceneStatus};
use storyboard_error::{BoardError, BoardErrorKind, StoryboardResult};
use storyboard_export::{Archive, SketchConverter, package};
use storyboard_interface::GenerationDriver;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    BoardState, ReferenceStore, SceneRenderer, Settings, compile_scenes, synthesize_reference,
};

/// Progress notifications emitted while a session works.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    /// A batch appended this many pending scenes
    ScenesCreated(usize),
    /// A scene's record changed after a render finished
    SceneUpdated {
        /// Index of the scene in the sequence
        index: usize,
        /// The scene as stored
        scene: Scene,
    },
    /// A reference of this kind was synthesized from the story
    ReferenceSynthesized(ReferenceKind),
}

/// Labels given to synthesized references, plus the export file name.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Naming {
    character_label: String,
    background_label: String,
    archive_name: String,
}

impl Naming {
    fn synthesized_label(&self, kind: ReferenceKind) -> &str {
        match kind {
            ReferenceKind::Character => &self.character_label,
            ReferenceKind::Background => &self.background_label,
        }
    }
}

/// A storyboard session over a generation driver.
///
/// All mutation goes through `&mut self`, so at most one batch or
/// regeneration runs at a time and scene updates never interleave.
///
/// # Example
///
/// ```no_run
/// use storyboard_board::Storyboard;
/// use storyboard_config::StoryboardConfig;
/// use storyboard_models::GeminiClient;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = StoryboardConfig::load()?;
/// let client = GeminiClient::from_config(&config.gemini)?;
/// let mut board = Storyboard::new(client, &config);
///
/// board.generate_story("A fox finds a lantern in the snow.").await?;
/// let archive = board.export(false).await?;
/// archive.write_to(".").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Storyboard<D> {
    renderer: SceneRenderer<D>,
    state: BoardState,
    naming: Naming,
    events: Option<UnboundedSender<BoardEvent>>,
}

impl<D: GenerationDriver> Storyboard<D> {
    /// Create a session with settings and labels from configuration.
    pub fn new(driver: D, config: &StoryboardConfig) -> Self {
        Self {
            renderer: SceneRenderer::new(driver),
            state: BoardState::new(Settings::from(&config.board)),
            naming: Naming {
                character_label: config.board.character_label.clone(),
                background_label: config.board.background_label.clone(),
                archive_name: config.export.archive_name.clone(),
            },
            events: None,
        }
    }

    /// Send progress events to `sender`.
    pub fn with_events(mut self, sender: UnboundedSender<BoardEvent>) -> Self {
        self.events = Some(sender);
        self
    }

    /// Current state.
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// Scenes in order.
    pub fn scenes(&self) -> &[Scene] {
        self.state.scenes()
    }

    /// Reference collections.
    pub fn references(&self) -> &ReferenceStore {
        self.state.references()
    }

    /// Mutable reference collections, for uploads, relabels and removals.
    pub fn references_mut(&mut self) -> &mut ReferenceStore {
        self.state.references_mut()
    }

    /// Render settings.
    pub fn settings(&self) -> &Settings {
        self.state.settings()
    }

    /// The renderer, which also serves as the export sketch converter.
    pub fn renderer(&self) -> &SceneRenderer<D> {
        &self.renderer
    }

    fn emit(&self, event: BoardEvent) {
        if let Some(sender) = &self.events {
            if sender.send(event).is_err() {
                debug!("Event receiver dropped");
            }
        }
    }

    /// Replace the scenes with a fresh storyboard for `story`.
    ///
    /// Empty reference collections are filled by synthesis first; a failed
    /// synthesis leaves the collection empty and generation continues.
    /// Returns the number of scenes created.
    ///
    /// # Errors
    ///
    /// Returns [`BoardErrorKind::EmptyStory`] for blank input and
    /// [`BoardErrorKind::DecompositionFailed`] when no scene prompts come back.
    #[instrument(skip(self, story), fields(story_len = story.len()))]
    pub async fn generate_story(&mut self, story: &str) -> StoryboardResult<usize> {
        if story.trim().is_empty() {
            return Err(BoardError::new(BoardErrorKind::EmptyStory).into());
        }

        self.state.clear_scenes();

        for kind in [ReferenceKind::Character, ReferenceKind::Background] {
            if !self.state.references().is_empty(kind) {
                continue;
            }
            let label = self.naming.synthesized_label(kind).to_string();
            let synthesized =
                synthesize_reference(self.renderer.driver(), story, kind, &label).await;
            if let Some(reference) = synthesized {
                self.state.references_mut().replace(kind, vec![reference]);
                self.emit(BoardEvent::ReferenceSynthesized(kind));
            }
        }

        let references = self.state.references();
        let prompts = compile_scenes(
            self.renderer.driver(),
            story,
            &references.labels(ReferenceKind::Character),
            &references.labels(ReferenceKind::Background),
        )
        .await;

        if prompts.is_empty() {
            warn!("No scene prompts returned for story");
            return Err(BoardError::new(BoardErrorKind::DecompositionFailed).into());
        }

        let count = prompts.len();
        self.generate_all(prompts).await;
        Ok(count)
    }

    /// Append one scene per prompt and render them strictly in order.
    ///
    /// Each scene is stored and announced before the next request is sent.
    /// A failed render leaves that scene without an image and the batch
    /// continues. Returns the ids of the new scenes.
    #[instrument(skip(self, prompts), fields(scenes = prompts.len()))]
    pub async fn generate_all(&mut self, prompts: Vec<String>) -> Vec<Uuid> {
        let ids: Vec<Uuid> = prompts
            .into_iter()
            .map(|prompt| {
                let scene = Scene::pending(prompt);
                let id = scene.id();
                self.state.append_scene(scene);
                id
            })
            .collect();
        self.emit(BoardEvent::ScenesCreated(ids.len()));

        for id in &ids {
            let Some(prompt) = self.state.scene(*id).map(|s| s.prompt().to_string()) else {
                continue;
            };

            let image = self
                .renderer
                .render(&prompt, self.state.settings(), self.state.references())
                .await;
            let rendered = image.is_some();

            match self.state.update_scene(*id, |scene| {
                scene.set_image(image);
                scene.set_status(SceneStatus::Idle);
            }) {
                Ok((index, scene)) => {
                    info!(index, rendered, "Scene finished");
                    self.emit(BoardEvent::SceneUpdated { index, scene });
                }
                Err(e) => warn!(error = %e, "Scene vanished during batch"),
            }
        }

        ids
    }

    /// Render one scene again with its current prompt.
    ///
    /// No other scene is touched. On failure the previous image is kept.
    /// Returns whether a new image was produced.
    ///
    /// # Errors
    ///
    /// Returns [`BoardErrorKind::SceneNotFound`] if no scene has `id`.
    #[instrument(skip(self))]
    pub async fn regenerate(&mut self, id: Uuid) -> StoryboardResult<bool> {
        let (_, scene) = self
            .state
            .update_scene(id, |scene| scene.set_status(SceneStatus::Generating))?;

        let image = self
            .renderer
            .render(scene.prompt(), self.state.settings(), self.state.references())
            .await;
        let rendered = image.is_some();

        let (index, scene) = self.state.update_scene(id, |scene| {
            if let Some(image) = image {
                scene.set_image(Some(image));
            }
            scene.set_status(SceneStatus::Idle);
        })?;
        info!(index, rendered, "Scene regenerated");
        self.emit(BoardEvent::SceneUpdated { index, scene });

        Ok(rendered)
    }

    /// Replace a scene's prompt. The image is left as is.
    ///
    /// # Errors
    ///
    /// Returns [`BoardErrorKind::SceneNotFound`] if no scene has `id`.
    pub fn edit_prompt(&mut self, id: Uuid, prompt: impl Into<String>) -> StoryboardResult<()> {
        let prompt = prompt.into();
        self.state.update_scene(id, |scene| scene.set_prompt(prompt))?;
        Ok(())
    }

    /// Remove a scene from the sequence.
    ///
    /// # Errors
    ///
    /// Returns [`BoardErrorKind::SceneNotFound`] if no scene has `id`.
    pub fn delete_scene(&mut self, id: Uuid) -> StoryboardResult<Scene> {
        self.state.remove_scene(id)
    }

    /// Aspect ratio for subsequent renders.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: AspectRatio) {
        self.state.settings_mut().set_aspect_ratio(aspect_ratio);
    }

    /// Style override for subsequent renders; empty disables it.
    pub fn set_style(&mut self, style: impl Into<String>) {
        self.state.settings_mut().set_style(style);
    }

    /// Package every rendered scene, optionally as sketches.
    ///
    /// # Errors
    ///
    /// Returns an export error when nothing has an image or packaging fails.
    #[instrument(skip(self))]
    pub async fn export(&self, as_sketch: bool) -> StoryboardResult<Archive> {
        let converter: Option<&dyn SketchConverter> = if as_sketch {
            Some(&self.renderer)
        } else {
            None
        };

        let archive = package(self.state.scenes(), converter)
            .await?
            .with_file_name(self.naming.archive_name.clone());
        info!(entries = archive.entries().len(), "Storyboard exported");
        Ok(archive)
    }
}
