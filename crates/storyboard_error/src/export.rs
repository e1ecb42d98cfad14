//! Export packaging errors.

/// Specific export error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ExportErrorKind {
    /// The board has no scenes, or none of them has an image
    #[display("No images to export")]
    NothingToExport,
    /// Building the zip archive failed
    #[display("Failed to build archive: {}", _0)]
    Archive(String),
    /// Writing the archive to disk failed
    #[display("Failed to write archive: {}", _0)]
    Write(String),
}

/// Export error with location tracking.
///
/// # Examples
///
/// ```
/// use storyboard_error::{ExportError, ExportErrorKind};
///
/// let err = ExportError::new(ExportErrorKind::NothingToExport);
/// assert!(format!("{}", err).contains("No images"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Export Error: {} at line {} in {}", kind, line, file)]
pub struct ExportError {
    /// The kind of error that occurred
    pub kind: ExportErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ExportError {
    /// Create a new export error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ExportErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
