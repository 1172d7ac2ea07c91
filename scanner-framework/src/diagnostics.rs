//! Positions and rendered context for syntax errors.
//!
//! `\n`, `\r` and `\r\n` all count as a single line break.
//!
//! Columns follow a fixed convention that diagnostics and their consumers
//! rely on: on the first line the column is the number of characters before
//! the cursor, on every later line the line break that opened the line
//! counts as column 0, so the first character of the line is column 1. A
//! cursor resting on a line-break character reports column 0.

use crate::cursor::Cursor;
use common_framework::{Position, Result, ScanError, SyntaxError};
use tracing::debug;

/// A window of source lines around the cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NearLines {
    pub lines: Vec<String>,
    /// Index of the cursor's line inside `lines`.
    pub current: usize,
}

impl NearLines {
    /// Renders the window with right-aligned line numbers and the current
    /// line marked with `>`. `line` is the 1-based number of the current
    /// line.
    pub fn render(&self, line: usize) -> String {
        if self.lines.is_empty() {
            return String::new();
        }
        let first = line.saturating_sub(self.current).max(1);
        let last = first + self.lines.len() - 1;
        let width = last.to_string().len();

        self.lines
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let marker = if i == self.current { '>' } else { ' ' };
                format!("{} {:>width$} |{}", marker, first + i, text, width = width)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Splits on every line break, keeping a trailing empty line when the text
/// ends with a break.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, ch)) = chars.next() {
        match ch {
            '\n' => {
                lines.push(&text[start..i]);
                start = i + 1;
            }
            '\r' => {
                lines.push(&text[start..i]);
                start = i + 1;
                if let Some((_, '\n')) = chars.peek() {
                    chars.next();
                    start += 1;
                }
            }
            _ => {}
        }
    }
    lines.push(&text[start..]);
    lines
}

/// Number of line breaks in `text`, and the offset just past the last one.
fn breaks_before(text: &str) -> (usize, usize) {
    let bytes = text.as_bytes();
    let mut count = 0;
    let mut line_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\r' => {
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                count += 1;
                line_start = i + 1;
            }
            b'\n' => {
                count += 1;
                line_start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    (count, line_start)
}

impl Cursor {
    /// Resolves the current offset to a line and column.
    pub fn position(&self) -> Position {
        let offset = self.offset();
        let before = &self.text()[..offset];
        let (breaks, line_start) = breaks_before(before);

        let column = match self.peek() {
            Some('\n' | '\r') => 0,
            _ => {
                let chars = before[line_start..].chars().count();
                if breaks == 0 {
                    chars
                } else {
                    chars + 1
                }
            }
        };

        Position::at(breaks + 1, column, offset)
    }

    /// Returns `count` lines around the current one. Near the start or end
    /// of the text the window shifts instead of shrinking; it only shrinks
    /// when the whole text has fewer lines.
    pub fn near_lines(&self, count: usize) -> Result<NearLines> {
        if count % 2 == 0 {
            return Err(ScanError::invalid_argument("lines count should be odd"));
        }

        let lines = split_lines(self.text());
        let current = (self.position().line - 1).min(lines.len() - 1);
        let size = count.min(lines.len());
        let start = current.saturating_sub(count / 2).min(lines.len() - size);

        Ok(NearLines {
            lines: lines[start..start + size]
                .iter()
                .map(|line| line.to_string())
                .collect(),
            current: current - start,
        })
    }

    /// Builds a `SyntaxError` for the current position.
    pub fn error(&self, message: impl Into<String>) -> ScanError {
        self.diagnostic(message).into()
    }

    /// Fails at the current position. Use as `return cursor.throw_error(..)`.
    pub fn throw_error<T>(&self, message: impl Into<String>) -> Result<T> {
        Err(self.error(message))
    }

    /// The positioned diagnostic without wrapping it in a `ScanError`.
    pub fn diagnostic(&self, message: impl Into<String>) -> SyntaxError {
        let message = message.into();
        let position = self.position();
        let context = self
            .near_lines(self.config().context_lines)
            .map(|near| near.render(position.line))
            .unwrap_or_default();

        debug!(
            line = position.line,
            column = position.column,
            message = %message,
            "syntax error"
        );
        SyntaxError::new(message, position, context)
    }
}
