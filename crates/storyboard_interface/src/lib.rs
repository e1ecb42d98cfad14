//! Trait definitions for the storyboard generator.
//!
//! The generation service is an opaque capability: given ordered text and
//! image parts it returns text or an image. Everything above this trait is
//! provider-agnostic.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::GenerationDriver;
