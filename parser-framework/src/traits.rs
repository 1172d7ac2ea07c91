use crate::driver::Driver;
use crate::tree::{Fields, NodeRef};
use common_framework::Result;
use scanner_framework::ScanContext;
use serde_json::Value;
use std::fmt;

/// A grammar production: knows how to recognize itself at the cursor, how
/// to consume itself into fields, and how to render those fields back to
/// source text.
///
/// Implementations are usually unit structs; the parsed values live in the
/// driver's [`Tree`](crate::Tree), not in the implementing type.
///
/// `render` must be a left inverse of `consume`: consuming the rendered text
/// again yields the same fields (up to whatever canonicalisation the grammar
/// applies, such as case folding).
pub trait Syntax: 'static {
    /// Name the node type is registered and referenced under.
    const NAME: &'static str;

    /// Tests whether this production starts at the cursor. `rest` is the
    /// remaining input. Receives the driver immutably, so it cannot move the
    /// cursor.
    fn recognize(driver: &Driver, rest: &str, options: Option<&Value>) -> Result<bool>;

    /// Parses the production, writing the recognized values into `fields`.
    /// Nested productions are parsed with `driver.parse::<Other>(..)` and
    /// stored as node fields.
    fn consume(driver: &mut Driver, fields: &mut Fields, options: Option<&Value>) -> Result<()>;

    /// Serializes a parsed node back into source text.
    fn render(node: NodeRef<'_>, options: Option<&Value>) -> String;
}

pub type RecognizeFn = fn(&Driver, &str, Option<&Value>) -> Result<bool>;
pub type ConsumeFn = fn(&mut Driver, &mut Fields, Option<&Value>) -> Result<()>;
pub type RenderFn = fn(NodeRef<'_>, Option<&Value>) -> String;

/// The registered form of a node type: its name and the three operations,
/// resolved once at registration.
#[derive(Clone, Copy)]
pub struct NodeType {
    name: &'static str,
    recognize: RecognizeFn,
    consume: ConsumeFn,
    render: RenderFn,
}

impl NodeType {
    /// Descriptor for a [`Syntax`] implementation.
    pub fn of<T: Syntax>() -> Self {
        Self::new(T::NAME, T::recognize, T::consume, T::render)
    }

    /// Descriptor assembled from plain functions.
    pub fn new(
        name: &'static str,
        recognize: RecognizeFn,
        consume: ConsumeFn,
        render: RenderFn,
    ) -> Self {
        Self {
            name,
            recognize,
            consume,
            render,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn recognize(&self, driver: &Driver, options: Option<&Value>) -> Result<bool> {
        (self.recognize)(driver, driver.remaining(), options)
    }

    pub fn consume(
        &self,
        driver: &mut Driver,
        fields: &mut Fields,
        options: Option<&Value>,
    ) -> Result<()> {
        (self.consume)(driver, fields, options)
    }

    pub fn render(&self, node: NodeRef<'_>, options: Option<&Value>) -> String {
        (self.render)(node, options)
    }
}

impl fmt::Debug for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeType").field("name", &self.name).finish()
    }
}
