use crate::config::ScanConfig;
use common_framework::{Checkpoint, Result, ScanError};
use std::cell::RefCell;
use std::sync::Arc;
use tracing::trace;

/// Result of scanning one word, remembered by the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WordScan {
    /// Offset the scan started at (before leading space).
    pub(crate) start: usize,
    /// Offset after the word and its trailing space.
    pub(crate) end: usize,
    /// The word, lower-cased. Empty when no word characters were found.
    pub(crate) word: String,
}

/// Owns the source text and the scanning offset.
///
/// Offsets are byte offsets into the text and always sit on a char
/// boundary. The text never changes after construction; only the offset,
/// the single checkpoint slot and the word cache move.
#[derive(Debug, Clone)]
pub struct Cursor {
    buffer: Arc<str>,
    current: usize,
    checkpoint: Option<Checkpoint>,
    pub(crate) last_word: RefCell<Option<WordScan>>,
    config: ScanConfig,
}

impl Cursor {
    /// Creates a new cursor from the input string.
    pub fn new<S: Into<String>>(input: S) -> Self {
        let owned = input.into();
        Self::with_arc(Arc::<str>::from(owned))
    }

    /// Creates a cursor from an existing shared buffer.
    pub fn with_arc(buffer: Arc<str>) -> Self {
        Self {
            buffer,
            current: 0,
            checkpoint: None,
            last_word: RefCell::new(None),
            config: ScanConfig::default(),
        }
    }

    /// Creates a cursor with explicit configuration.
    pub fn with_config<S: Into<String>>(input: S, config: ScanConfig) -> Result<Self> {
        config.validate()?;
        let mut cursor = Self::new(input);
        cursor.config = config;
        Ok(cursor)
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// The full source text.
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Returns the shared source buffer.
    pub fn buffer(&self) -> Arc<str> {
        Arc::clone(&self.buffer)
    }

    /// Length of the source text in bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns the current offset in bytes.
    pub fn offset(&self) -> usize {
        self.current
    }

    /// Returns the remaining input from the current position.
    pub fn remaining(&self) -> &str {
        &self.buffer[self.current..]
    }

    /// Returns the next character without advancing the cursor.
    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Returns true if the cursor is at the end of the input.
    pub fn is_end(&self) -> bool {
        self.current >= self.buffer.len()
    }

    /// Moves the cursor to an absolute byte offset.
    pub fn set_offset(&mut self, offset: usize) -> Result<()> {
        if offset > self.buffer.len() || !self.buffer.is_char_boundary(offset) {
            return Err(ScanError::invalid_argument(format!(
                "offset {} is not a char boundary of the {}-byte input",
                offset,
                self.buffer.len()
            )));
        }
        self.current = offset;
        Ok(())
    }

    /// Advances the cursor by one character.
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.current += ch.len_utf8();
        Some(ch)
    }

    /// Advances the cursor by up to `n` characters, returning how many were
    /// actually consumed.
    pub fn advance_by(&mut self, n: usize) -> usize {
        let mut count = 0;
        for _ in 0..n {
            if self.advance().is_none() {
                break;
            }
            count += 1;
        }
        count
    }

    /// Consumes characters while the predicate returns true.
    pub fn consume_while<F>(&mut self, mut predicate: F) -> &str
    where
        F: FnMut(char) -> bool,
    {
        let start = self.current;
        while let Some(ch) = self.peek() {
            if !predicate(ch) {
                break;
            }
            self.current += ch.len_utf8();
        }
        &self.buffer[start..self.current]
    }

    /// Skips consecutive whitespace.
    pub fn skip_space(&mut self) {
        self.current = skip_space_from(&self.buffer, self.current);
    }

    /// Stores the current offset, replacing any earlier checkpoint.
    pub fn checkpoint(&mut self) {
        trace!(offset = self.current, "checkpoint");
        self.checkpoint = Some(Checkpoint::new(self.current));
    }

    /// Returns to the stored checkpoint. The checkpoint stays stored, so
    /// repeated rollbacks return to the same offset.
    pub fn rollback(&mut self) -> Result<()> {
        let checkpoint = self
            .checkpoint
            .ok_or_else(|| ScanError::illegal_state("checkpoint does not exist"))?;
        trace!(from = self.current, to = checkpoint.offset(), "rollback");
        self.current = checkpoint.offset();
        Ok(())
    }

    pub fn has_checkpoint(&self) -> bool {
        self.checkpoint.is_some()
    }

    pub(crate) fn move_to(&mut self, offset: usize) {
        debug_assert!(self.buffer.is_char_boundary(offset));
        self.current = offset;
    }
}

/// First offset at or after `from` that is not whitespace.
pub(crate) fn skip_space_from(text: &str, from: usize) -> usize {
    text[from..]
        .char_indices()
        .find(|(_, ch)| !ch.is_whitespace())
        .map(|(i, _)| from + i)
        .unwrap_or(text.len())
}
