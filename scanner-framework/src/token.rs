//! Primitives that consume input, or fail with a positioned diagnostic.

use crate::cursor::Cursor;
use crate::pattern::Pattern;
use common_framework::Result;
use tracing::trace;

impl Cursor {
    /// Reads the next word: skips space, collects word characters, skips
    /// the space after them. Returns the word lower-cased, or an empty
    /// string when there are no word characters at the cursor (any space is
    /// still skipped in that case).
    pub fn read_word(&mut self) -> String {
        let scan = self.scan_word();
        trace!(start = scan.start, end = scan.end, word = %scan.word, "read word");
        self.move_to(scan.end);
        scan.word
    }

    /// Consumes `pattern` if it matches at the cursor. Returns `None`
    /// without moving otherwise.
    pub fn read<'p>(&mut self, pattern: impl Into<Pattern<'p>>) -> Result<Option<String>> {
        let pattern = pattern.into();
        let Some(len) = pattern.match_len(self.remaining())? else {
            return Ok(None);
        };
        let matched = self.remaining()[..len].to_string();
        self.move_to(self.offset() + len);
        Ok(Some(matched))
    }

    /// Consumes `pattern` or fails with a `SyntaxError`. The default
    /// message is `expected: <pattern>`.
    pub fn expect<'p>(
        &mut self,
        pattern: impl Into<Pattern<'p>>,
        message: Option<&str>,
    ) -> Result<String> {
        let pattern = pattern.into();
        match self.read(pattern)? {
            Some(matched) => Ok(matched),
            None => match message {
                Some(message) => self.throw_error(message),
                None => self.throw_error(format!("expected: {}", pattern)),
            },
        }
    }

    /// Reads a word and checks it. With `expected`, the word must match
    /// case-insensitively; without it, any non-empty word is accepted. On
    /// failure the cursor is left where it was.
    pub fn expect_word(&mut self, expected: Option<&str>) -> Result<String> {
        let start = self.offset();
        let word = self.read_word();

        let message = match expected {
            None if word.is_empty() => "expected any word".to_string(),
            Some(expected) if word != expected.to_lowercase() => {
                format!("expected word: {}", expected)
            }
            _ => return Ok(word),
        };

        self.move_to(start);
        self.throw_error(message)
    }

    /// Decodes a hexadecimal code point, as found in `\u{...}` escapes.
    ///
    /// Accepts only hex digits; values outside the scalar value range
    /// (surrogates, above U+10FFFF) are rejected.
    pub fn parse_unicode(&self, hex: &str) -> Result<char> {
        let decoded = if !hex.is_empty() && hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
            u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
        } else {
            None
        };

        match decoded {
            Some(ch) => Ok(ch),
            None => self.throw_error(format!("invalid unicode sequence: {}", hex)),
        }
    }
}
