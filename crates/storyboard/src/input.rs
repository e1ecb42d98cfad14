//! Reading stories and reference images from disk.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use storyboard_core::ImageData;
use storyboard_error::{
    BoardError, BoardErrorKind, StorageError, StorageErrorKind, StoryboardResult,
};
use tracing::debug;

/// A reference image given on the command line as `LABEL=PATH` or `PATH`.
///
/// # Examples
///
/// ```
/// use storyboard::ReferenceSpec;
///
/// let spec: ReferenceSpec = "Mira=refs/mira.png".parse().unwrap();
/// assert_eq!(spec.label(), Some("Mira"));
///
/// let spec: ReferenceSpec = "refs/harbour.jpg".parse().unwrap();
/// assert_eq!(spec.label(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSpec {
    label: Option<String>,
    path: PathBuf,
}

impl ReferenceSpec {
    /// Explicit label, if one was given.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Image file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FromStr for ReferenceSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (label, path) = match s.split_once('=') {
            Some((label, path)) => (Some(label.trim().to_string()), path.trim()),
            None => (None, s.trim()),
        };

        if path.is_empty() {
            return Err(format!("Missing image path in '{}'", s));
        }
        if label.as_deref() == Some("") {
            return Err(format!("Empty label in '{}'", s));
        }

        Ok(Self {
            label,
            path: PathBuf::from(path),
        })
    }
}

/// MIME type implied by a file extension, if it is a supported image type.
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        _ => None,
    }
}

/// Read a PNG or JPEG file.
///
/// # Errors
///
/// Returns [`BoardErrorKind::UnsupportedMime`] for other extensions and a
/// storage error if the file cannot be read.
pub fn load_image(path: &Path) -> StoryboardResult<ImageData> {
    let mime = mime_for_path(path).ok_or_else(|| {
        BoardError::new(BoardErrorKind::UnsupportedMime(path.display().to_string()))
    })?;

    let bytes = std::fs::read(path).map_err(|e| {
        StorageError::new(StorageErrorKind::FileRead(format!("{}: {}", path.display(), e)))
    })?;

    debug!(path = %path.display(), mime, size = bytes.len(), "Loaded reference image");
    Ok(ImageData::new(bytes, mime))
}

/// Read a story from a file, or from stdin when `path` is `-`.
///
/// # Errors
///
/// Returns a storage error if the source cannot be read.
pub fn read_story(path: &Path) -> StoryboardResult<String> {
    if path == Path::new("-") {
        let mut story = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut story).map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!("stdin: {}", e)))
        })?;
        return Ok(story);
    }

    std::fs::read_to_string(path).map_err(|e| {
        StorageError::new(StorageErrorKind::FileRead(format!("{}: {}", path.display(), e))).into()
    })
}
