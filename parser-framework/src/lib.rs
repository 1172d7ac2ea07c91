//! Parser Framework
//!
//! Recursive-descent parsing on top of `scanner-framework`. Grammars are sets
//! of [`Syntax`] node types registered in a [`Registry`]; a [`Driver`]
//! dispatches to them by name, records each parsed node in a [`Tree`], and
//! offers the chain and comma-list combinators.

pub mod driver;
pub mod registry;
pub mod testing;
pub mod traits;
pub mod tree;

pub use common_framework::{ErrorKind, Position, Result, ScanError, SyntaxError};
pub use driver::Driver;
pub use registry::{Grammar, Registry, RegistryBuilder};
pub use scanner_framework::{Pattern, RegexPattern, ScanConfig, ScanContext};
pub use testing::{Fixture, HarnessFailure};
pub use traits::{NodeType, Syntax};
pub use tree::{FieldValue, Fields, Node, NodeId, NodeRef, Tree};
