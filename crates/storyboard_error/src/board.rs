//! Storyboard state and orchestration errors.
//!
//! These are precondition violations: the requested operation is refused
//! before any generation request is issued.

/// Specific conditions that make a board operation impossible.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BoardErrorKind {
    /// Story text is empty or whitespace
    #[display("Story text is empty")]
    EmptyStory,
    /// The generation service returned no scene prompts for the story
    #[display("Story could not be split into scenes")]
    DecompositionFailed,
    /// No scene with the given id exists
    #[display("Scene not found: {}", _0)]
    SceneNotFound(String),
    /// No scene at the given 1-based position
    #[display("No scene at position {}", _0)]
    ScenePosition(usize),
    /// No reference with the given id exists
    #[display("Reference not found: {}", _0)]
    ReferenceNotFound(String),
    /// Reference upload is not a supported image type
    #[display("Unsupported reference image type: {}", _0)]
    UnsupportedMime(String),
}

/// Board error with location tracking.
///
/// # Examples
///
/// ```
/// use storyboard_error::{BoardError, BoardErrorKind};
///
/// let err = BoardError::new(BoardErrorKind::EmptyStory);
/// assert!(format!("{}", err).contains("empty"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Board Error: {} at line {} in {}", kind, line, file)]
pub struct BoardError {
    /// The kind of error that occurred
    pub kind: BoardErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl BoardError {
    /// Create a new board error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: BoardErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
