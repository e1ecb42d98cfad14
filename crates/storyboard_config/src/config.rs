//! Configuration structures.
//!
//! The configuration system supports:
//! - Bundled defaults (include_str! from storyboard.toml)
//! - User overrides (./storyboard.toml or ~/.config/storyboard/storyboard.toml)
//! - Automatic merging with user values taking precedence

use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use storyboard_core::AspectRatio;
use storyboard_error::{ConfigError, StoryboardError, StoryboardResult};
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../storyboard.toml");

/// Connection settings for the Gemini REST API.
///
/// ```toml
/// [gemini]
/// api_base = "https://generativelanguage.googleapis.com/v1beta"
/// text_model = "gemini-2.5-pro"
/// image_model = "gemini-2.5-flash-image"
/// timeout_secs = 180
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeminiConfig {
    /// Base URL, without a trailing slash
    pub api_base: String,
    /// Model used for story decomposition and subject descriptions
    pub text_model: String,
    /// Model used for scene renders, reference synthesis and sketches
    pub image_model: String,
    /// Per-request timeout
    pub timeout_secs: u64,
}

/// Defaults for a new storyboard session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BoardConfig {
    /// Initial aspect ratio
    pub aspect_ratio: AspectRatio,
    /// Initial style override appended to every scene prompt
    pub style: String,
    /// Label given to a synthesized character reference
    pub character_label: String,
    /// Label given to a synthesized background reference
    pub background_label: String,
}

/// Export settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExportConfig {
    /// File name of the exported archive
    pub archive_name: String,
}

/// Top-level storyboard configuration.
///
/// # Example
///
/// ```no_run
/// use storyboard_config::StoryboardConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = StoryboardConfig::load()?;
/// println!("Rendering with {}", config.gemini.image_model);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoryboardConfig {
    /// Gemini API settings
    pub gemini: GeminiConfig,
    /// Session defaults
    pub board: BoardConfig,
    /// Export settings
    pub export: ExportConfig,
}

impl StoryboardConfig {
    /// Bundled defaults only, ignoring any user files.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled file fails to parse.
    #[instrument]
    pub fn bundled() -> StoryboardResult<Self> {
        Self::build(Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml)))
    }

    /// Bundled defaults overridden by a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> StoryboardResult<Self> {
        debug!("Loading configuration from file");

        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::new(format!(
                "Configuration file not found: {}",
                path.display()
            ))
            .into());
        }

        Self::build(
            Config::builder()
                .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
                .add_source(File::from(path)),
        )
    }

    /// Load configuration with precedence: user override > bundled default.
    ///
    /// Configuration sources in order of precedence (later sources override earlier):
    /// 1. Bundled defaults (storyboard.toml shipped with the crate)
    /// 2. User config in home directory (~/.config/storyboard/storyboard.toml)
    /// 3. User config in current directory (./storyboard.toml)
    ///
    /// User config files are optional and silently skipped if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if any present file fails to parse.
    #[instrument]
    pub fn load() -> StoryboardResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/storyboard/storyboard.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("storyboard").required(false));

        Self::build(builder)
    }

    /// Load from an explicit path when given, otherwise with full precedence.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`StoryboardConfig::from_file`] or
    /// [`StoryboardConfig::load`].
    pub fn load_from(path: Option<&Path>) -> StoryboardResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::load(),
        }
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> StoryboardResult<Self> {
        builder
            .build()
            .map_err(|e| {
                StoryboardError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                StoryboardError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }
}
