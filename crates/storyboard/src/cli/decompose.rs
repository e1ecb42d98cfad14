//! Print the scene prompts for a story.

use storyboard::{
    GeminiClient, JsonError, StoryboardConfig, StoryboardResult, compile_scenes, read_story,
};
use tracing::instrument;

use super::commands::DecomposeArgs;

/// Decompose a story and print the prompts as a JSON array.
///
/// An empty result prints a notice on stderr and `[]` on stdout.
#[instrument(skip_all, fields(story = %args.story.display()))]
pub async fn run_decompose(config: &StoryboardConfig, args: DecomposeArgs) -> StoryboardResult<()> {
    let story = read_story(&args.story)?;
    let client = GeminiClient::from_config(&config.gemini)?;

    let prompts = compile_scenes(
        &client,
        &story,
        &args.character_labels,
        &args.background_labels,
    )
    .await;

    if prompts.is_empty() {
        eprintln!("The story could not be split into scenes.");
    }

    let json = serde_json::to_string_pretty(&prompts)
        .map_err(|e| JsonError::new(format!("Failed to serialize prompts: {}", e)))?;
    println!("{}", json);
    Ok(())
}
