//! CLI command definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use storyboard::{AspectRatio, ReferenceSpec};

/// Storyboard CLI - turn a story into rendered scenes
#[derive(Parser, Debug)]
#[command(name = "storyboard")]
#[command(about = "Turn a story into a consistent AI-rendered storyboard", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (replaces the home and working directory files)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a storyboard and export it as a zip archive
    Generate(GenerateArgs),

    /// Print the scene prompts a story decomposes into, as JSON
    Decompose(DecomposeArgs),

    /// Work on a storyboard interactively
    Session(SessionArgs),
}

/// Inputs shared by every command that builds a storyboard.
#[derive(Args, Debug, Clone)]
pub struct BoardArgs {
    /// Character reference image, as LABEL=PATH or PATH (repeatable)
    #[arg(long = "character", value_name = "LABEL=PATH")]
    pub characters: Vec<ReferenceSpec>,

    /// Background reference image, as LABEL=PATH or PATH (repeatable)
    #[arg(long = "background", value_name = "LABEL=PATH")]
    pub backgrounds: Vec<ReferenceSpec>,

    /// Aspect ratio: 16:9, 9:16, 1:1 or 4:3
    #[arg(long)]
    pub aspect_ratio: Option<AspectRatio>,

    /// Style override appended to every scene ("" disables it)
    #[arg(long)]
    pub style: Option<String>,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Story file, or - for stdin
    #[arg(short, long)]
    pub story: PathBuf,

    #[command(flatten)]
    pub board: BoardArgs,

    /// Export line-art sketches instead of the renders
    #[arg(long)]
    pub sketch: bool,

    /// Directory the archive is written to
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct DecomposeArgs {
    /// Story file, or - for stdin
    #[arg(short, long)]
    pub story: PathBuf,

    /// Character label the prompts may reference (repeatable)
    #[arg(long = "character-label", value_name = "LABEL")]
    pub character_labels: Vec<String>,

    /// Background label the prompts may reference (repeatable)
    #[arg(long = "background-label", value_name = "LABEL")]
    pub background_labels: Vec<String>,
}

#[derive(Args, Debug)]
pub struct SessionArgs {
    /// Story to generate before the prompt opens
    #[arg(short, long)]
    pub story: Option<PathBuf>,

    #[command(flatten)]
    pub board: BoardArgs,

    /// Directory exports are written to
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,
}
