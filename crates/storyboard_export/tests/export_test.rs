//! Tests for storyboard archive packaging.

use async_trait::async_trait;
use std::io::{Cursor, Read};
use std::sync::atomic::{AtomicUsize, Ordering};
use storyboard_core::{ImageData, Scene, SceneStatus};
use storyboard_error::{ExportErrorKind, StorageErrorKind, StoryboardErrorKind};
use storyboard_export::{SketchConverter, package};

/// Converter that inverts every byte, or fails for images starting with 0.
struct InvertingSketcher {
    calls: AtomicUsize,
}

impl InvertingSketcher {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SketchConverter for InvertingSketcher {
    async fn sketch(&self, image: &ImageData) -> Option<ImageData> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if image.bytes().first() == Some(&0) {
            return None;
        }
        Some(ImageData::png(image.bytes().iter().map(|b| !b).collect()))
    }
}

fn scene_with(bytes: Option<Vec<u8>>) -> Scene {
    let mut scene = Scene::new("prompt");
    scene.set_image(bytes.map(ImageData::png));
    scene
}

fn read_entry(bytes: &[u8], name: &str) -> anyhow::Result<Vec<u8>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut file = archive.by_name(name)?;
    let mut contents = Vec::new();
    file.read_to_end(&mut contents)?;
    Ok(contents)
}

fn entry_names(bytes: &[u8]) -> anyhow::Result<Vec<String>> {
    let archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    Ok(archive.file_names().map(str::to_string).collect())
}

#[tokio::test]
async fn test_entries_keep_sequence_positions() -> anyhow::Result<()> {
    let scenes = vec![
        scene_with(None),
        scene_with(Some(vec![2, 2])),
        scene_with(None),
        scene_with(Some(vec![4, 4])),
        scene_with(None),
    ];

    let archive = package(&scenes, None).await?;

    assert_eq!(archive.file_name(), "storyboard.zip");
    assert_eq!(archive.entries(), &["scene_002.png", "scene_004.png"]);

    let mut names = entry_names(archive.bytes())?;
    names.sort();
    assert_eq!(names, vec!["scene_002.png", "scene_004.png"]);
    assert_eq!(read_entry(archive.bytes(), "scene_004.png")?, vec![4, 4]);
    Ok(())
}

#[tokio::test]
async fn test_empty_storyboard_is_refused() {
    let err = package(&[], None).await.unwrap_err();
    assert!(matches!(
        err.kind(),
        StoryboardErrorKind::Export(e) if e.kind == ExportErrorKind::NothingToExport
    ));
}

#[tokio::test]
async fn test_storyboard_without_images_is_refused() {
    let scenes = vec![scene_with(None), scene_with(None)];
    let err = package(&scenes, None).await.unwrap_err();
    assert!(matches!(
        err.kind(),
        StoryboardErrorKind::Export(e) if e.kind == ExportErrorKind::NothingToExport
    ));
}

#[tokio::test]
async fn test_generating_scene_is_not_exported() -> anyhow::Result<()> {
    let mut busy = scene_with(Some(vec![9]));
    busy.set_status(SceneStatus::Generating);
    let scenes = vec![busy, scene_with(Some(vec![1]))];

    let archive = package(&scenes, None).await?;
    assert_eq!(archive.entries(), &["scene_002.png"]);
    Ok(())
}

#[tokio::test]
async fn test_sketch_replaces_image() -> anyhow::Result<()> {
    let sketcher = InvertingSketcher::new();
    let scenes = vec![scene_with(Some(vec![1, 2]))];

    let archive = package(&scenes, Some(&sketcher as &dyn SketchConverter)).await?;

    assert_eq!(sketcher.calls.load(Ordering::SeqCst), 1);
    assert_eq!(read_entry(archive.bytes(), "scene_001.png")?, vec![254, 253]);
    Ok(())
}

#[tokio::test]
async fn test_failed_sketch_falls_back_to_original() -> anyhow::Result<()> {
    let sketcher = InvertingSketcher::new();
    let scenes = vec![scene_with(Some(vec![0, 7])), scene_with(Some(vec![1]))];

    let archive = package(&scenes, Some(&sketcher as &dyn SketchConverter)).await?;

    assert_eq!(sketcher.calls.load(Ordering::SeqCst), 2);
    assert_eq!(read_entry(archive.bytes(), "scene_001.png")?, vec![0, 7]);
    assert_eq!(read_entry(archive.bytes(), "scene_002.png")?, vec![254]);
    Ok(())
}

#[tokio::test]
async fn test_write_to_creates_archive_file() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let target = dir.path().join("out");
    let archive = package(&[scene_with(Some(vec![5]))], None)
        .await?
        .with_file_name("board.zip");

    let path = archive.write_to(&target).await?;

    assert_eq!(path, target.join("board.zip"));
    assert_eq!(std::fs::read(&path)?, archive.bytes());
    assert!(!target.join("board.zip.tmp").exists());
    Ok(())
}

#[tokio::test]
async fn test_write_failure_leaves_no_partial_archive() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    // A directory squatting on the archive name makes the final rename fail.
    std::fs::create_dir(dir.path().join("board.zip"))?;
    let archive = package(&[scene_with(Some(vec![5]))], None)
        .await?
        .with_file_name("board.zip");

    let err = archive.write_to(dir.path()).await.unwrap_err();

    assert!(matches!(
        err.kind(),
        StoryboardErrorKind::Export(e) if matches!(e.kind, ExportErrorKind::Write(_))
    ));
    assert!(dir.path().join("board.zip").is_dir());
    assert!(!dir.path().join("board.zip.tmp").exists());
    Ok(())
}

#[tokio::test]
async fn test_write_into_file_path_is_invalid_path() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let blocker = dir.path().join("not_a_dir");
    std::fs::write(&blocker, b"x")?;
    let archive = package(&[scene_with(Some(vec![5]))], None).await?;

    let err = archive.write_to(blocker.join("out")).await.unwrap_err();

    assert!(matches!(
        err.kind(),
        StoryboardErrorKind::Storage(e) if matches!(e.kind, StorageErrorKind::InvalidPath(_))
    ));
    Ok(())
}
