use crate::registry::{Grammar, Registry};
use crate::traits::{NodeType, Syntax};
use crate::tree::{Fields, NodeId, NodeRef, Tree};
use common_framework::{Result, ScanError};
use scanner_framework::{Cursor, Pattern, ScanConfig, ScanContext};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Drives recursive-descent parsing over one source text.
///
/// Owns the [`Cursor`] and the [`Tree`] of nodes parsed so far, and resolves
/// node types by name through the grammar's [`Registry`]. Every scanning
/// primitive is available through [`ScanContext`].
///
/// A driver that returned an error is not meant to be reused; create a new
/// one per parse.
#[derive(Debug)]
pub struct Driver {
    cursor: Cursor,
    tree: Tree,
    depth: usize,
}

impl Driver {
    /// Creates a driver over `text` for grammar `G`.
    pub fn new<G: Grammar>(text: impl Into<String>) -> Result<Self> {
        Ok(Self::with_registry(text, G::registry()?))
    }

    pub fn with_registry(text: impl Into<String>, registry: Arc<Registry>) -> Self {
        Self {
            cursor: Cursor::new(text),
            tree: Tree::new(registry),
            depth: 0,
        }
    }

    /// Fails with `InvalidArgument` if the configuration is invalid.
    pub fn with_config(
        text: impl Into<String>,
        registry: Arc<Registry>,
        config: ScanConfig,
    ) -> Result<Self> {
        Ok(Self {
            cursor: Cursor::with_config(text, config)?,
            tree: Tree::new(registry),
            depth: 0,
        })
    }

    pub fn registry(&self) -> &Arc<Registry> {
        self.tree.registry()
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    pub fn into_tree(self) -> Tree {
        self.tree
    }

    /// # Panics
    ///
    /// Panics if `id` was not produced by this driver.
    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        self.tree.node(id)
    }

    /// Number of `parse` calls currently in progress.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Tests whether `pattern` matches at the cursor without consuming
    /// anything. Node patterns are answered by that node type's recognizer.
    pub fn is<'p>(&self, pattern: impl Into<Pattern<'p>>, options: Option<&Value>) -> Result<bool> {
        match pattern.into() {
            Pattern::Node(name) => self.registry().get(name)?.recognize(self, options),
            other => self.cursor.is_match(other),
        }
    }

    pub fn is_node<T: Syntax>(&self, options: Option<&Value>) -> Result<bool> {
        self.is(Pattern::Node(T::NAME), options)
    }

    /// Parses one `T` at the cursor and adds it to the tree.
    pub fn parse<T: Syntax>(&mut self, options: Option<&Value>) -> Result<NodeId> {
        self.parse_kind(T::NAME, options)
    }

    /// Parses one node of the named type at the cursor.
    ///
    /// The node records the offset the cursor was at when parsing began.
    /// Nested nodes stored in its fields become its children.
    pub fn parse_kind(&mut self, name: &str, options: Option<&Value>) -> Result<NodeId> {
        let node_type = *self.registry().get(name)?;
        self.parse_type(node_type, options)
    }

    fn parse_type(&mut self, node_type: NodeType, options: Option<&Value>) -> Result<NodeId> {
        self.enter()?;
        let start = self.cursor.offset();
        trace!(node = node_type.name(), start, depth = self.depth, "parse node");

        let mut fields = Fields::new();
        let consumed = node_type.consume(self, &mut fields, options);
        self.depth -= 1;
        consumed?;

        let id = self.tree.adopt(node_type.name(), Some(start), fields)?;
        trace!(
            node = node_type.name(),
            start,
            end = self.cursor.offset(),
            "parsed node"
        );
        Ok(id)
    }

    fn enter(&mut self) -> Result<()> {
        let max_depth = self.cursor.config().max_depth;
        if self.depth >= max_depth {
            warn!(max_depth, offset = self.cursor.offset(), "nesting too deep");
            return Err(ScanError::DepthExceeded {
                depth: self.depth,
                max_depth,
                diagnostic: self
                    .cursor
                    .diagnostic(format!("maximum nesting depth of {} exceeded", max_depth)),
            });
        }
        self.depth += 1;
        Ok(())
    }

    /// Parses zero or more whitespace-separated `T` nodes.
    ///
    /// Stops at the first position where `T` is not recognized, leaving the
    /// whitespace before that position unconsumed.
    pub fn parse_chain<T: Syntax>(&mut self, options: Option<&Value>) -> Result<Vec<NodeId>> {
        self.parse_chain_kind(T::NAME, options)
    }

    pub fn parse_chain_kind(&mut self, name: &str, options: Option<&Value>) -> Result<Vec<NodeId>> {
        let node_type = *self.registry().get(name)?;
        let mut elements = Vec::new();

        loop {
            let before = self.cursor.offset();
            self.cursor.skip_space();
            if !node_type.recognize(self, options)? {
                self.cursor.set_offset(before)?;
                break;
            }

            let element_start = self.cursor.offset();
            elements.push(self.parse_type(node_type, options)?);
            if self.cursor.offset() == element_start {
                return Err(ScanError::illegal_state(format!(
                    "{} matched without consuming input inside a chain",
                    node_type.name()
                )));
            }
        }

        debug!(node = node_type.name(), count = elements.len(), "parsed chain");
        Ok(elements)
    }

    /// Parses one or more comma-separated `T` nodes. Whitespace may surround
    /// each comma.
    ///
    /// Fails with `expected: <NAME>` when an element is missing, including
    /// after a trailing comma. Whitespace after the last element is consumed.
    pub fn parse_comma<T: Syntax>(&mut self, options: Option<&Value>) -> Result<Vec<NodeId>> {
        self.parse_comma_kind(T::NAME, options)
    }

    pub fn parse_comma_kind(&mut self, name: &str, options: Option<&Value>) -> Result<Vec<NodeId>> {
        let node_type = *self.registry().get(name)?;
        let mut elements = Vec::new();

        loop {
            self.cursor.skip_space();
            if !node_type.recognize(self, options)? {
                return self
                    .cursor
                    .throw_error(format!("expected: {}", node_type.name()));
            }
            elements.push(self.parse_type(node_type, options)?);

            self.cursor.skip_space();
            if self.cursor.read(",")?.is_none() {
                break;
            }
        }

        debug!(node = node_type.name(), count = elements.len(), "parsed comma list");
        Ok(elements)
    }

    /// Moves the cursor back to where `id` was parsed from, so the text can
    /// be parsed again.
    ///
    /// Fails with `IllegalState` for synthesized nodes, which have no
    /// recorded position.
    pub fn set_position_before(&mut self, id: NodeId) -> Result<()> {
        let node = self
            .tree
            .get(id)
            .ok_or_else(|| ScanError::invalid_argument(format!("unknown node #{}", id.index())))?;
        let start = node.start().ok_or_else(|| {
            ScanError::illegal_state(format!("cannot detect position of {} node", node.kind()))
        })?;
        trace!(node = node.kind(), start, "replay node");
        self.cursor.set_offset(start)
    }
}

impl ScanContext for Driver {
    fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }
}
