//! Creating a character or background reference from the story alone.
//!
//! Synthesis is two requests: a text model describes the subject, then the
//! image model renders that description with fixed composition cues. Either
//! step failing yields no reference, and story generation carries on without
//! one.

use storyboard_core::{ImageData, Part, ReferenceImage, ReferenceKind, ResponseFormat};
use storyboard_error::StoryboardResult;
use storyboard_interface::GenerationDriver;
use tracing::{debug, info, instrument, warn};

use crate::request::build_request;

/// Instruction asking the text model to describe the subject of `kind`.
pub fn description_prompt(story: &str, kind: ReferenceKind) -> String {
    match kind {
        ReferenceKind::Character => format!(
            "Read the following story and create a single, detailed visual description of the main character. \
             This description will be used to generate a reference image. \
             Focus on consistent physical traits, clothing, and overall appearance. \
             The output should be a single, descriptive prompt for an image generator. \
             Describe the character in a neutral pose, full body, plain background.\n\nStory: \"{}\"",
            story
        ),
        ReferenceKind::Background => format!(
            "Read the following story and create a single, detailed visual description of the primary setting or background. \
             This description will be used to generate a reference image. \
             Focus on the environment, mood, and key architectural or natural elements. \
             The output should be a single, descriptive prompt for an image generator. \
             Describe the scene without any characters.\n\nStory: \"{}\"",
            story
        ),
    }
}

/// Composition cues appended to a subject description before rendering.
pub fn composition_suffix(kind: ReferenceKind) -> &'static str {
    match kind {
        ReferenceKind::Character => {
            ", full body character sheet, plain white background, neutral pose, detailed face."
        }
        ReferenceKind::Background => ", empty scene, no people, wide angle view.",
    }
}

/// Ask the text model for a visual description of the story's main
/// character or primary setting.
///
/// Returns `None` on any failure or an empty description.
#[instrument(skip(driver, story), fields(story_len = story.len()))]
pub async fn describe_subject<D>(driver: &D, story: &str, kind: ReferenceKind) -> Option<String>
where
    D: GenerationDriver + ?Sized,
{
    let result = request_description(driver, story, kind).await;

    match result {
        Ok(Some(description)) => {
            debug!(description = %description, "Generated subject description");
            Some(description)
        }
        Ok(None) => {
            warn!("Subject description was empty");
            None
        }
        Err(e) => {
            warn!(error = %e, "Subject description failed");
            None
        }
    }
}

/// Synthesize a reference image for `kind` from the story, labelled `label`.
///
/// Returns `None` if either the description or the render fails.
#[instrument(skip(driver, story, label), fields(story_len = story.len()))]
pub async fn synthesize_reference<D>(
    driver: &D,
    story: &str,
    kind: ReferenceKind,
    label: &str,
) -> Option<ReferenceImage>
where
    D: GenerationDriver + ?Sized,
{
    let description = describe_subject(driver, story, kind).await?;
    let prompt = format!("{}{}", description, composition_suffix(kind));

    let result = request_image(driver, prompt).await;

    match result {
        Ok(Some(image)) => {
            info!(%kind, label, size = image.len(), "Synthesized reference image");
            Some(ReferenceImage::new(label, image))
        }
        Ok(None) => {
            warn!(%kind, "Reference render returned no image");
            None
        }
        Err(e) => {
            warn!(%kind, error = %e, "Reference render failed");
            None
        }
    }
}

async fn request_description<D>(
    driver: &D,
    story: &str,
    kind: ReferenceKind,
) -> StoryboardResult<Option<String>>
where
    D: GenerationDriver + ?Sized,
{
    let request = build_request(
        vec![Part::Text(description_prompt(story, kind))],
        ResponseFormat::Text,
        None,
    )?;
    let response = driver.generate(&request).await?;
    Ok(response
        .first_text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string))
}

async fn request_image<D>(driver: &D, prompt: String) -> StoryboardResult<Option<ImageData>>
where
    D: GenerationDriver + ?Sized,
{
    let request = build_request(vec![Part::Text(prompt)], ResponseFormat::Image, None)?;
    Ok(driver.generate(&request).await?.into_first_image())
}
