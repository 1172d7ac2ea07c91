use serde::{Deserialize, Serialize};

/// A resolved location in the source text.
///
/// Produced on demand by the scanner's diagnostics from a byte offset; the
/// cursor itself only tracks the offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Byte offset from the start of the input
    pub offset: usize,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column as reported in diagnostics; see `scanner_framework::diagnostics`
    pub column: usize,
}

impl Position {
    /// Creates a position at the start of the input.
    pub fn new() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 0,
        }
    }

    /// Creates a position with the given values.
    pub fn at(line: usize, column: usize, offset: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
