//! Command-line interface module.
//!
//! CLI structure and command handlers for the storyboard binary.

mod board;
mod commands;
mod decompose;
mod generate;
mod guide;
mod session;

pub use commands::{Cli, Commands};
pub use decompose::run_decompose;
pub use generate::run_generate;
pub use session::run_session;
