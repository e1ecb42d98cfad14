//! Tests for layered configuration loading.

use std::io::Write;
use storyboard_config::StoryboardConfig;
use storyboard_core::AspectRatio;
use storyboard_error::StoryboardErrorKind;

#[test]
fn test_bundled_defaults() -> anyhow::Result<()> {
    let config = StoryboardConfig::bundled()?;

    assert_eq!(config.gemini.text_model, "gemini-2.5-pro");
    assert_eq!(config.gemini.image_model, "gemini-2.5-flash-image");
    assert_eq!(config.board.aspect_ratio, AspectRatio::Widescreen16x9);
    assert_eq!(config.board.style, "cinematic lighting, epic, highly detailed");
    assert_eq!(config.export.archive_name, "storyboard.zip");
    Ok(())
}

#[test]
fn test_file_overrides_only_given_keys() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    writeln!(file, "[board]\naspect_ratio = \"9:16\"\nstyle = \"pixel art\"")?;

    let config = StoryboardConfig::from_file(file.path())?;

    assert_eq!(config.board.aspect_ratio, AspectRatio::Portrait9x16);
    assert_eq!(config.board.style, "pixel art");
    // Untouched sections keep bundled values
    assert_eq!(config.board.character_label, "Main Character");
    assert_eq!(config.gemini.timeout_secs, 180);
    Ok(())
}

#[test]
fn test_missing_file_is_config_error() {
    let err = StoryboardConfig::from_file("/definitely/not/here/storyboard.toml").unwrap_err();
    assert!(matches!(err.kind(), StoryboardErrorKind::Config(_)));
}

#[test]
fn test_unknown_aspect_ratio_rejected() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    writeln!(file, "[board]\naspect_ratio = \"21:9\"")?;

    assert!(StoryboardConfig::from_file(file.path()).is_err());
    Ok(())
}
