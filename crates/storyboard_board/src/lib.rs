//! Storyboard generation: from story text to rendered, exportable scenes.
//!
//! # Pipeline
//!
//! 1. **Reference synthesis** fills empty character/background collections
//!    from the story ([`synthesize_reference`]).
//! 2. **Prompt compilation** splits the story into tagged scene prompts
//!    ([`compile_scenes`]).
//! 3. **Tag resolution** turns `[CHARACTER: label]` / `[BACKGROUND: label]`
//!    tags into conditioning images ([`resolve_tags`]).
//! 4. **Rendering** sends each scene to the image model, one at a time
//!    ([`SceneRenderer`], [`Storyboard::generate_all`]).
//! 5. **Export** packages rendered scenes into a zip archive
//!    ([`Storyboard::export`]).
//!
//! Generation failures never abort the pipeline; they surface as absent
//! results and are logged.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod compiler;
mod extraction;
mod orchestrator;
mod references;
mod renderer;
mod request;
mod state;
mod synthesis;
mod tags;

pub use compiler::{compile_scenes, decomposition_prompt};
pub use extraction::{extract_json_array, parse_string_list};
pub use orchestrator::{BoardEvent, Storyboard};
pub use references::{ACCEPTED_MIME_TYPES, ReferenceStore};
pub use renderer::{SKETCH_INSTRUCTION, SceneRenderer, styled_prompt};
pub use state::{BoardState, Settings};
pub use synthesis::{composition_suffix, describe_subject, description_prompt, synthesize_reference};
pub use tags::{
    Conditioning, ResolvedPrompt, conditioning_instruction, first_tag, resolve_tags, strip_tags,
};
