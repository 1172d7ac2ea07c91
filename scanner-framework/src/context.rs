use crate::cursor::Cursor;
use crate::diagnostics::NearLines;
use crate::pattern::Pattern;
use common_framework::{Position, Result, ScanError};

/// Access to a cursor for grammar code.
///
/// Anything that owns a [`Cursor`] implements the two accessors and gets
/// every scanning primitive as a method, so node implementations can write
/// `driver.expect_word(Some("let"))` instead of reaching for the cursor.
pub trait ScanContext {
    /// Returns a reference to the cursor.
    fn cursor(&self) -> &Cursor;

    /// Returns a mutable reference to the cursor.
    fn cursor_mut(&mut self) -> &mut Cursor;

    fn offset(&self) -> usize {
        self.cursor().offset()
    }

    fn remaining(&self) -> &str {
        self.cursor().remaining()
    }

    fn peek(&self) -> Option<char> {
        self.cursor().peek()
    }

    fn advance(&mut self) -> Option<char> {
        self.cursor_mut().advance()
    }

    fn is_end(&self) -> bool {
        self.cursor().is_end()
    }

    fn skip_space(&mut self) {
        self.cursor_mut().skip_space();
    }

    fn checkpoint(&mut self) {
        self.cursor_mut().checkpoint();
    }

    fn rollback(&mut self) -> Result<()> {
        self.cursor_mut().rollback()
    }

    fn is_match<'p>(&self, pattern: impl Into<Pattern<'p>>) -> Result<bool> {
        self.cursor().is_match(pattern)
    }

    fn is_word(&self, expected: Option<&str>) -> bool {
        self.cursor().is_word(expected)
    }

    fn read_word(&mut self) -> String {
        self.cursor_mut().read_word()
    }

    fn read<'p>(&mut self, pattern: impl Into<Pattern<'p>>) -> Result<Option<String>> {
        self.cursor_mut().read(pattern)
    }

    fn expect<'p>(&mut self, pattern: impl Into<Pattern<'p>>, message: Option<&str>) -> Result<String> {
        self.cursor_mut().expect(pattern, message)
    }

    fn expect_word(&mut self, expected: Option<&str>) -> Result<String> {
        self.cursor_mut().expect_word(expected)
    }

    fn parse_unicode(&self, hex: &str) -> Result<char> {
        self.cursor().parse_unicode(hex)
    }

    fn position(&self) -> Position {
        self.cursor().position()
    }

    fn near_lines(&self, count: usize) -> Result<NearLines> {
        self.cursor().near_lines(count)
    }

    /// Builds a `SyntaxError` at the current position.
    fn error(&self, message: impl Into<String>) -> ScanError {
        self.cursor().error(message)
    }

    /// Aborts the current parse with a positioned `SyntaxError`.
    fn fail<T>(&self, message: impl Into<String>) -> Result<T> {
        self.cursor().throw_error(message)
    }
}

impl ScanContext for Cursor {
    fn cursor(&self) -> &Cursor {
        self
    }

    fn cursor_mut(&mut self) -> &mut Cursor {
        self
    }
}
