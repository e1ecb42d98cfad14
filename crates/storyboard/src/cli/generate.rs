//! One-shot generation: story file in, archive out.

use storyboard::{StoryboardConfig, StoryboardResult, read_story};
use tracing::{info, instrument};

use super::board::{build_board, spawn_progress};
use super::commands::GenerateArgs;

/// Generate every scene for a story and write the export archive.
#[instrument(skip_all, fields(story = %args.story.display(), sketch = args.sketch))]
pub async fn run_generate(config: &StoryboardConfig, args: GenerateArgs) -> StoryboardResult<()> {
    let story = read_story(&args.story)?;
    let (mut board, events) = build_board(config, &args.board)?;
    let progress = spawn_progress(events);

    let count = board.generate_story(&story).await?;
    let rendered = board.scenes().iter().filter(|s| s.has_image()).count();
    info!(count, rendered, "Storyboard generated");

    let archive = board.export(args.sketch).await?;
    let path = archive.write_to(&args.output).await?;

    drop(board);
    progress.await.ok();

    println!(
        "Wrote {} ({} of {} scenes)",
        path.display(),
        archive.entries().len(),
        count
    );
    Ok(())
}
