//! A small scripting grammar built on `parser-framework`.
//!
//! ```text
//! let greeting = concat("hi", "\u{21}");
//! let answer = 42;
//! ```
//!
//! A script is a sequence of `let` statements. Expressions are strings with
//! escapes, numbers, identifiers and calls with comma-separated arguments.

pub mod expression;
pub mod literal;
pub mod statement;

use once_cell::sync::Lazy;
use parser_framework::{Driver, Grammar, NodeId, RegexPattern, Registry, Result};
use std::sync::Arc;

pub use expression::{Call, Expression, Identifier};
pub use literal::{Number, Text};
pub use statement::{Let, Script};

/// The grammar every driver of this crate is created for.
pub struct ScriptGrammar;

static REGISTRY: Lazy<Result<Arc<Registry>>> = Lazy::new(|| {
    Registry::builder()
        .register::<Identifier>()
        .register::<Number>()
        .register::<Text>()
        .register::<Call>()
        .register::<Expression>()
        .register::<Let>()
        .register::<Script>()
        .build()
});

impl Grammar for ScriptGrammar {
    fn registry() -> Result<Arc<Registry>> {
        REGISTRY.clone()
    }
}

/// Parses a whole script, returning the driver that owns the tree.
pub fn parse_script(text: &str) -> Result<(Driver, NodeId)> {
    let mut driver = Driver::new::<ScriptGrammar>(text)?;
    let id = driver.parse::<Script>(None)?;
    Ok((driver, id))
}

pub(crate) type LazyPattern = Lazy<Result<RegexPattern>>;

/// Resolves a lazily compiled pattern, surfacing a bad expression as an
/// `InvalidArgument` on every use.
pub(crate) fn pattern(cell: &'static LazyPattern) -> Result<&'static RegexPattern> {
    cell.as_ref().map_err(Clone::clone)
}
