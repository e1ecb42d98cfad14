//! In-memory zip packaging and atomic archive writes.

use futures::future::join_all;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use storyboard_core::{ImageData, Scene};
use storyboard_error::{
    ExportError, ExportErrorKind, StorageError, StorageErrorKind, StoryboardResult,
};
use tracing::{debug, info, instrument, warn};
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

use crate::SketchConverter;

/// File name used when no other name is configured.
pub const DEFAULT_ARCHIVE_NAME: &str = "storyboard.zip";

/// Entry name for the scene at 1-based `position`.
///
/// # Examples
///
/// ```
/// assert_eq!(storyboard_export::entry_name(7), "scene_007.png");
/// ```
pub fn entry_name(position: usize) -> String {
    format!("scene_{:03}.png", position)
}

/// A packaged storyboard ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    file_name: String,
    entries: Vec<String>,
    bytes: Vec<u8>,
}

impl Archive {
    /// Archive file name, e.g. `storyboard.zip`.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Entry names in archive order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Zip-encoded archive contents.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the archive, returning the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Rename the archive file.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Write the archive into `dir`, returning the final path.
    ///
    /// The bytes go to a temporary file first and are renamed into place, so
    /// a failed write never leaves a partial archive under the final name.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::InvalidPath`] if the directory cannot be
    /// created and [`ExportErrorKind::Write`] if the archive cannot be written
    /// or moved into place.
    #[instrument(skip(self, dir), fields(file_name = %self.file_name, size = self.bytes.len()))]
    pub async fn write_to(&self, dir: impl AsRef<Path>) -> StoryboardResult<PathBuf> {
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir).await.map_err(|e| {
            StorageError::new(StorageErrorKind::InvalidPath(format!(
                "{}: {}",
                dir.display(),
                e
            )))
        })?;

        let path = dir.join(&self.file_name);
        let temp_path = path.with_extension("zip.tmp");

        tokio::fs::write(&temp_path, &self.bytes).await.map_err(|e| {
            ExportError::new(ExportErrorKind::Write(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        if let Err(e) = tokio::fs::rename(&temp_path, &path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(ExportError::new(ExportErrorKind::Write(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
            .into());
        }

        info!(path = %path.display(), "Wrote storyboard archive");
        Ok(path)
    }
}

/// Package every scene that currently has an image.
///
/// With a converter, each image is converted concurrently and any failed
/// conversion falls back to the original image.
///
/// # Errors
///
/// Returns [`ExportErrorKind::NothingToExport`] when no scene has an image,
/// and [`ExportErrorKind::Archive`] if the zip encoder fails.
#[instrument(skip(scenes, sketch), fields(scenes = scenes.len(), sketch = sketch.is_some()))]
pub async fn package(
    scenes: &[Scene],
    sketch: Option<&dyn SketchConverter>,
) -> StoryboardResult<Archive> {
    let rendered: Vec<(usize, &ImageData)> = scenes
        .iter()
        .enumerate()
        .filter_map(|(index, scene)| scene.current_image().map(|image| (index + 1, image)))
        .collect();

    if rendered.is_empty() {
        warn!("Export refused, no scene has an image");
        return Err(ExportError::new(ExportErrorKind::NothingToExport).into());
    }

    let images: Vec<(usize, ImageData)> = match sketch {
        Some(converter) => {
            join_all(rendered.into_iter().map(|(position, image)| async move {
                match converter.sketch(image).await {
                    Some(sketched) => (position, sketched),
                    None => {
                        warn!(position, "Sketch conversion failed, exporting original");
                        (position, image.clone())
                    }
                }
            }))
            .await
        }
        None => rendered
            .into_iter()
            .map(|(position, image)| (position, image.clone()))
            .collect(),
    };

    let (entries, bytes) = encode(&images)?;
    debug!(entries = entries.len(), size = bytes.len(), "Packaged storyboard");

    Ok(Archive {
        file_name: DEFAULT_ARCHIVE_NAME.to_string(),
        entries,
        bytes,
    })
}

fn encode(images: &[(usize, ImageData)]) -> StoryboardResult<(Vec<String>, Vec<u8>)> {
    let archive_err = |e: &dyn std::fmt::Display| {
        ExportError::new(ExportErrorKind::Archive(e.to_string()))
    };

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let mut entries = Vec::with_capacity(images.len());

    for (position, image) in images {
        let name = entry_name(*position);
        writer
            .start_file(name.as_str(), options)
            .map_err(|e| archive_err(&e))?;
        writer.write_all(image.bytes()).map_err(|e| archive_err(&e))?;
        entries.push(name);
    }

    let cursor = writer.finish().map_err(|e| archive_err(&e))?;
    Ok((entries, cursor.into_inner()))
}
