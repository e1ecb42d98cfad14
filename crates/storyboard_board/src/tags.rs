//! Reference tags embedded in scene prompts.
//!
//! A scene prompt may name references as `[CHARACTER: label]` and
//! `[BACKGROUND: label]`. Resolution conditions the render on the first tag
//! of each kind whose label exists, and strips every tag of both kinds from
//! the text sent to the image model. A second tag of the same kind is
//! removed without contributing conditioning.

use regex::Regex;
use std::sync::LazyLock;
use storyboard_core::{ImageData, Part, ReferenceKind};
use tracing::debug;

use crate::ReferenceStore;

static CHARACTER_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[CHARACTER: (.*?)\]").expect("Valid character tag regex"));

static BACKGROUND_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[BACKGROUND: (.*?)\]").expect("Valid background tag regex"));

/// Instruction placed before a conditioning image of `kind`.
pub fn conditioning_instruction(kind: ReferenceKind) -> &'static str {
    match kind {
        ReferenceKind::Character => {
            "Use the provided character image as a strong reference for the main character's appearance."
        }
        ReferenceKind::Background => {
            "Use the provided background image as a strong reference for the scene's environment."
        }
    }
}

fn tag_regex(kind: ReferenceKind) -> &'static Regex {
    match kind {
        ReferenceKind::Character => &CHARACTER_TAG,
        ReferenceKind::Background => &BACKGROUND_TAG,
    }
}

/// A reference image chosen to condition one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conditioning {
    /// Which collection the image came from
    pub kind: ReferenceKind,
    /// Label the tag named
    pub label: String,
    /// Image payload
    pub image: ImageData,
}

impl Conditioning {
    /// Instruction text and image, in the order they are sent.
    pub fn parts(&self) -> [Part; 2] {
        [
            Part::Text(conditioning_instruction(self.kind).to_string()),
            Part::Image(self.image.clone()),
        ]
    }
}

/// A scene prompt after tag resolution.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct ResolvedPrompt {
    /// Prompt with every tag removed, trimmed
    text: String,
    /// Character conditioning, then background conditioning
    conditioning: Vec<Conditioning>,
}

impl ResolvedPrompt {
    /// Whether any reference image was resolved.
    pub fn is_conditioned(&self) -> bool {
        !self.conditioning.is_empty()
    }
}

/// First tag label of `kind` in `prompt`, if any.
///
/// # Examples
///
/// ```
/// use storyboard_board::first_tag;
/// use storyboard_core::ReferenceKind;
///
/// let prompt = "[CHARACTER: Mira] climbs. [CHARACTER: Tom] waits.";
/// assert_eq!(first_tag(prompt, ReferenceKind::Character), Some("Mira"));
/// assert_eq!(first_tag(prompt, ReferenceKind::Background), None);
/// ```
pub fn first_tag(prompt: &str, kind: ReferenceKind) -> Option<&str> {
    tag_regex(kind)
        .captures(prompt)
        .and_then(|captures| captures.get(1))
        .map(|label| label.as_str())
}

/// Remove every character and background tag and trim the result.
pub fn strip_tags(prompt: &str) -> String {
    let without_characters = CHARACTER_TAG.replace_all(prompt, "");
    BACKGROUND_TAG
        .replace_all(&without_characters, "")
        .trim()
        .to_string()
}

/// Resolve the tags in `prompt` against `references`.
///
/// Tags naming unknown labels are stripped and otherwise ignored.
pub fn resolve_tags(prompt: &str, references: &ReferenceStore) -> ResolvedPrompt {
    let conditioning: Vec<Conditioning> = [ReferenceKind::Character, ReferenceKind::Background]
        .into_iter()
        .filter_map(|kind| {
            let label = first_tag(prompt, kind)?;
            match references.find_by_label(kind, label) {
                Some(reference) => Some(Conditioning {
                    kind,
                    label: label.to_string(),
                    image: reference.image().clone(),
                }),
                None => {
                    debug!(%kind, label, "Tag names no known reference");
                    None
                }
            }
        })
        .collect();

    ResolvedPrompt {
        text: strip_tags(prompt),
        conditioning,
    }
}
