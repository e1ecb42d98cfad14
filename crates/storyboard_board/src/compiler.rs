//! Story decomposition into per-scene prompts.

use storyboard_core::{Part, ResponseFormat};
use storyboard_error::{BoardError, BoardErrorKind, StoryboardResult};
use storyboard_interface::GenerationDriver;
use tracing::{debug, instrument, warn};

use crate::parse_string_list;
use crate::request::build_request;

/// Instruction sent to the text model to split a story into scene prompts.
///
/// Labels are listed comma-separated, or as `None` when a collection is empty.
pub fn decomposition_prompt(
    story: &str,
    character_labels: &[String],
    background_labels: &[String],
) -> String {
    format!(
        r#"You are an expert prompt engineer for an image generation model. Your task is to break down the following story into a sequence of scenes.

You have been provided with a list of character labels and background labels. When generating the prompt for EACH scene, you MUST decide which character and background from the lists are relevant and include them using the exact format: [CHARACTER: label_name] and/or [BACKGROUND: label_name]. If no specific reference is needed for a scene, do not include the tags.

Available Character Labels: {}
Available Background Labels: {}

For EACH scene, generate a highly detailed image generation prompt following this structure:
1.  **Reference Tags:** Start with [CHARACTER: label] or [BACKGROUND: label] if applicable.
2.  **Action/Goal:** Clearly state what is happening.
3.  **Subject & Attributes:** Describe the main subject's specific actions, expressions, and interactions in this scene. Rely on the reference image for appearance, but describe the dynamic elements.
4.  **Environment & Lighting:** Describe the scene's lighting, atmosphere, and camera angle.
5.  **Style & Finishing:** Define the artistic style.

Combine these into a single, cohesive paragraph for each scene's prompt.

Here is the story: "{}""#,
        label_list(character_labels),
        label_list(background_labels),
        story
    )
}

fn label_list(labels: &[String]) -> String {
    if labels.is_empty() {
        "None".to_string()
    } else {
        labels.join(", ")
    }
}

/// Split a story into ordered scene prompts.
///
/// Never fails: any service or parse failure is logged and yields an empty
/// list, which callers must read as "decomposition failed" rather than
/// "the story has no scenes".
#[instrument(skip(driver, story), fields(story_len = story.len()))]
pub async fn compile_scenes<D>(
    driver: &D,
    story: &str,
    character_labels: &[String],
    background_labels: &[String],
) -> Vec<String>
where
    D: GenerationDriver + ?Sized,
{
    match try_compile(driver, story, character_labels, background_labels).await {
        Ok(prompts) => {
            debug!(scenes = prompts.len(), "Story decomposed");
            prompts
        }
        Err(e) => {
            warn!(error = %e, "Story decomposition failed");
            Vec::new()
        }
    }
}

async fn try_compile<D>(
    driver: &D,
    story: &str,
    character_labels: &[String],
    background_labels: &[String],
) -> StoryboardResult<Vec<String>>
where
    D: GenerationDriver + ?Sized,
{
    let request = build_request(
        vec![Part::Text(decomposition_prompt(
            story,
            character_labels,
            background_labels,
        ))],
        ResponseFormat::StringList,
        None,
    )?;

    let response = driver.generate(&request).await?;
    let text = response
        .first_text()
        .ok_or_else(|| BoardError::new(BoardErrorKind::DecompositionFailed))?;

    Ok(parse_string_list(text)?
        .into_iter()
        .filter(|prompt| !prompt.trim().is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_lists_labels() {
        let prompt = decomposition_prompt(
            "A fox finds a lantern.",
            &["Fox".to_string(), "Owl".to_string()],
            &[],
        );
        assert!(prompt.contains("Available Character Labels: Fox, Owl"));
        assert!(prompt.contains("Available Background Labels: None"));
        assert!(prompt.ends_with("Here is the story: \"A fox finds a lantern.\""));
    }
}
