//! Error taxonomy for scanning and parsing.
//!
//! `SyntaxError` is the only kind a caller is expected to handle (bad input,
//! maybe retried elsewhere by the caller). The remaining kinds flag grammar
//! authoring bugs and are never recoverable.

use crate::Position;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScanError>;

/// Input did not match what the grammar required at the cursor.
///
/// The `Display` output is the complete diagnostic: position header, the
/// line-numbered context window with the current line marked, and the
/// message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "SyntaxError at line {}, column {}\n\n{context}\n\n Message: {message}",
    .position.line,
    .position.column
)]
pub struct SyntaxError {
    message: String,
    position: Position,
    context: String,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, position: Position, context: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            position,
            context: context.into(),
        }
    }

    /// The bare message, without position or context.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn line(&self) -> usize {
        self.position.line
    }

    pub fn column(&self) -> usize {
        self.position.column
    }

    /// The rendered context window.
    pub fn context(&self) -> &str {
        &self.context
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// A primitive was called with an argument it cannot work with.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Checkpoint or position replay used without the state it needs.
    #[error("illegal state: {0}")]
    IllegalState(String),

    /// Nested node parsing went deeper than the configured limit.
    #[error("{diagnostic}")]
    DepthExceeded {
        depth: usize,
        max_depth: usize,
        diagnostic: SyntaxError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    InvalidArgument,
    IllegalState,
    DepthExceeded,
}

impl ScanError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        ScanError::InvalidArgument(message.into())
    }

    pub fn illegal_state(message: impl Into<String>) -> Self {
        ScanError::IllegalState(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ScanError::Syntax(_) => ErrorKind::Syntax,
            ScanError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            ScanError::IllegalState(_) => ErrorKind::IllegalState,
            ScanError::DepthExceeded { .. } => ErrorKind::DepthExceeded,
        }
    }

    /// Returns the positioned diagnostic, if this error carries one.
    pub fn diagnostic(&self) -> Option<&SyntaxError> {
        match self {
            ScanError::Syntax(err) => Some(err),
            ScanError::DepthExceeded { diagnostic, .. } => Some(diagnostic),
            _ => None,
        }
    }

    pub fn is_syntax(&self) -> bool {
        self.kind() == ErrorKind::Syntax
    }
}
