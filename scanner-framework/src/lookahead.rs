//! Side-effect-free tests against the input at the cursor.

use crate::cursor::{skip_space_from, Cursor, WordScan};
use crate::pattern::Pattern;
use common_framework::Result;

/// Word characters: ASCII letters, digits and underscore.
pub fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

impl Cursor {
    /// Tests whether the remaining input starts with `pattern`.
    ///
    /// Never moves the cursor. Node patterns are rejected with
    /// `InvalidArgument`; resolve them through a driver instead.
    pub fn is_match<'p>(&self, pattern: impl Into<Pattern<'p>>) -> Result<bool> {
        Ok(pattern.into().match_len(self.remaining())?.is_some())
    }

    /// Without `expected`, tests whether the next character is a word
    /// character. With it, scans the next word (skipping leading space) and
    /// compares case-insensitively. The cursor does not move either way.
    pub fn is_word(&self, expected: Option<&str>) -> bool {
        match expected {
            None => self.peek().is_some_and(is_word_char),
            Some(expected) => self.scan_word().word == expected.to_lowercase(),
        }
    }

    /// Scans the word at the cursor without moving it.
    ///
    /// The result is remembered keyed by the starting offset, so a
    /// lookahead followed by a read of the same word scans the text once.
    pub(crate) fn scan_word(&self) -> WordScan {
        let start = self.offset();
        if let Some(cached) = self.last_word.borrow().as_ref() {
            if cached.start == start {
                return cached.clone();
            }
        }

        let text = self.text();
        let word_start = skip_space_from(text, start);
        let word_end = text[word_start..]
            .char_indices()
            .find(|(_, ch)| !is_word_char(*ch))
            .map(|(i, _)| word_start + i)
            .unwrap_or(text.len());
        let scan = WordScan {
            start,
            end: skip_space_from(text, word_end),
            word: text[word_start..word_end].to_ascii_lowercase(),
        };

        *self.last_word.borrow_mut() = Some(scan.clone());
        scan
    }
}
