//! Building a session from command-line inputs.

use storyboard::{
    BoardEvent, GeminiClient, ReferenceKind, ReferenceSpec, Storyboard, StoryboardConfig,
    StoryboardResult, load_image,
};
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};
use tokio::task::JoinHandle;
use tracing::instrument;

use super::commands::BoardArgs;

/// A Gemini-backed session with the requested references and settings.
#[instrument(skip_all, fields(
    characters = args.characters.len(),
    backgrounds = args.backgrounds.len()
))]
pub fn build_board(
    config: &StoryboardConfig,
    args: &BoardArgs,
) -> StoryboardResult<(Storyboard<GeminiClient>, UnboundedReceiver<BoardEvent>)> {
    let client = GeminiClient::from_config(&config.gemini)?;
    let (sender, receiver) = unbounded_channel();
    let mut board = Storyboard::new(client, config).with_events(sender);

    add_references(&mut board, ReferenceKind::Character, &args.characters)?;
    add_references(&mut board, ReferenceKind::Background, &args.backgrounds)?;

    if let Some(ratio) = args.aspect_ratio {
        board.set_aspect_ratio(ratio);
    }
    if let Some(style) = &args.style {
        board.set_style(style.clone());
    }

    Ok((board, receiver))
}

fn add_references(
    board: &mut Storyboard<GeminiClient>,
    kind: ReferenceKind,
    specs: &[ReferenceSpec],
) -> StoryboardResult<()> {
    for spec in specs {
        let image = load_image(spec.path())?;
        let store = board.references_mut();
        match spec.label() {
            Some(label) => store.add_labeled(kind, label, image)?,
            None => store.add(kind, image)?,
        };
    }
    Ok(())
}

/// Print board events to stderr until the session drops its sender.
pub fn spawn_progress(mut events: UnboundedReceiver<BoardEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            eprintln!("{}", describe_event(&event));
        }
    })
}

/// One-line description of a board event.
pub fn describe_event(event: &BoardEvent) -> String {
    match event {
        BoardEvent::ScenesCreated(count) => format!("Rendering {} scenes...", count),
        BoardEvent::SceneUpdated { index, scene } => {
            let outcome = if scene.has_image() { "rendered" } else { "failed" };
            format!("  scene {} {}", index + 1, outcome)
        }
        BoardEvent::ReferenceSynthesized(kind) => {
            format!("Created a {} reference from the story", kind)
        }
    }
}
