//! Scanner Framework
//!
//! The character-level half of the engine: a [`Cursor`] over the source
//! text, lookahead against literals and anchored regular expressions, token
//! primitives that consume input or fail with a positioned diagnostic, and
//! the rendering of those diagnostics.

pub mod config;
pub mod context;
pub mod cursor;
pub mod diagnostics;
pub mod lookahead;
pub mod pattern;
pub mod token;

pub use common_framework::{Checkpoint, ErrorKind, Position, Result, ScanError, SyntaxError};
pub use config::ScanConfig;
pub use context::ScanContext;
pub use cursor::Cursor;
pub use diagnostics::{split_lines, NearLines};
pub use lookahead::is_word_char;
pub use pattern::{Pattern, RegexPattern};
