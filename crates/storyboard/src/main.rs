//! Storyboard CLI binary.
//!
//! - Generate and export a storyboard from a story file
//! - Print the scene prompts a story decomposes into
//! - Work on a storyboard interactively

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, run_decompose, run_generate, run_session};

    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    storyboard::init_console_telemetry(cli.verbose);

    let config = storyboard::StoryboardConfig::load_from(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate(args) => {
            run_generate(&config, args).await?;
        }

        Commands::Decompose(args) => {
            run_decompose(&config, args).await?;
        }

        Commands::Session(args) => {
            run_session(&config, args).await?;
        }
    }

    Ok(())
}
