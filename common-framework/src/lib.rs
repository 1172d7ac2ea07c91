//! Common Framework
//!
//! Types shared by `scanner-framework` and `parser-framework`: source
//! positions, the single-slot cursor checkpoint and the error taxonomy every
//! scanning primitive and grammar node reports through.

pub mod checkpoint;
pub mod error;
pub mod position;

pub use checkpoint::Checkpoint;
pub use error::{ErrorKind, Result, ScanError, SyntaxError};
pub use position::Position;
