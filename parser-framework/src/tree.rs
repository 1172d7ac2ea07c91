use crate::registry::Registry;
use common_framework::{Result, ScanError};
use serde_json::{Map, Value};
use std::ops::Index;
use std::sync::Arc;

/// Handle to a node inside a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A field of a parsed node: a plain value, a nested node, or a sequence of
/// nested nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Scalar(Value),
    Node(NodeId),
    List(Vec<NodeId>),
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        FieldValue::Scalar(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Scalar(Value::String(value))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Scalar(Value::String(value.to_string()))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Scalar(Value::Bool(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Scalar(Value::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Scalar(Value::from(value))
    }
}

impl From<NodeId> for FieldValue {
    fn from(id: NodeId) -> Self {
        FieldValue::Node(id)
    }
}

impl From<Vec<NodeId>> for FieldValue {
    fn from(ids: Vec<NodeId>) -> Self {
        FieldValue::List(ids)
    }
}

/// Named fields of a node, kept in the order they were first set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields {
    entries: Vec<(String, FieldValue)>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, replacing any previous value under the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        let index = self.entries.iter().position(|(key, _)| key == name)?;
        Some(self.entries.remove(index).1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn scalar(&self, name: &str) -> Option<&Value> {
        match self.get(name)? {
            FieldValue::Scalar(value) => Some(value),
            _ => None,
        }
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.scalar(name)?.as_str()
    }

    pub fn node(&self, name: &str) -> Option<NodeId> {
        match self.get(name)? {
            FieldValue::Node(id) => Some(*id),
            _ => None,
        }
    }

    /// Node ids of a list field; empty when the field is absent.
    pub fn list(&self, name: &str) -> &[NodeId] {
        match self.get(name) {
            Some(FieldValue::List(ids)) => ids.as_slice(),
            _ => &[],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Every node referenced by a node or list field, in field order.
    pub fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries
            .iter()
            .flat_map(|(_, value)| match value {
                FieldValue::Node(id) => std::slice::from_ref(id),
                FieldValue::List(ids) => ids.as_slice(),
                FieldValue::Scalar(_) => &[],
            })
            .copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    kind: &'static str,
    start: Option<usize>,
    fields: Fields,
    parent: Option<NodeId>,
}

impl Node {
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Byte offset the node was parsed from. `None` for synthesized nodes.
    pub fn start(&self) -> Option<usize> {
        self.start
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// Arena holding every node produced by one driver.
///
/// A node is owned by at most one parent: inserting a node adopts each child
/// it references, and a child that already has a parent is refused.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
    registry: Arc<Registry>,
}

impl Tree {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            nodes: Vec::new(),
            registry,
        }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Adds a synthesized node, one built by hand rather than parsed.
    pub fn insert(&mut self, kind: &str, fields: Fields) -> Result<NodeId> {
        let kind = self.registry.get(kind)?.name();
        self.adopt(kind, None, fields)
    }

    pub(crate) fn adopt(
        &mut self,
        kind: &'static str,
        start: Option<usize>,
        fields: Fields,
    ) -> Result<NodeId> {
        let mut seen = Vec::new();
        for child in fields.children() {
            match self.nodes.get(child.0) {
                None => {
                    return Err(ScanError::invalid_argument(format!(
                        "node #{} does not belong to this tree",
                        child.0
                    )))
                }
                Some(node) if node.parent.is_some() || seen.contains(&child) => {
                    return Err(ScanError::illegal_state(format!(
                        "{} node #{} already has a parent",
                        node.kind, child.0
                    )))
                }
                Some(_) => seen.push(child),
            }
        }
        Ok(self.push(kind, start, fields))
    }

    fn push(&mut self, kind: &'static str, start: Option<usize>, fields: Fields) -> NodeId {
        let id = NodeId(self.nodes.len());
        for child in fields.children() {
            self.nodes[child.0].parent = Some(id);
        }
        self.nodes.push(Node {
            kind,
            start,
            fields,
            parent: None,
        });
        id
    }

    /// Deep-copies a subtree. Nested nodes are copied too and point at the
    /// new parents; the copy itself is detached.
    ///
    /// Fails with `InvalidArgument` if `id` was not issued by this tree.
    pub fn duplicate(&mut self, id: NodeId) -> Result<NodeId> {
        if id.0 >= self.nodes.len() {
            return Err(ScanError::invalid_argument(format!(
                "node #{} does not belong to this tree",
                id.0
            )));
        }
        Ok(self.copy_subtree(id))
    }

    // children of a node in this tree are always in this tree
    fn copy_subtree(&mut self, id: NodeId) -> NodeId {
        let node = self.nodes[id.0].clone();
        let mut fields = Fields::new();
        for (name, value) in node.fields.entries {
            let value = match value {
                FieldValue::Node(child) => FieldValue::Node(self.copy_subtree(child)),
                FieldValue::List(children) => FieldValue::List(
                    children.into_iter().map(|child| self.copy_subtree(child)).collect(),
                ),
                scalar => scalar,
            };
            fields.entries.push((name, value));
        }
        self.push(node.kind, node.start, fields)
    }

    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.nodes.get(id.0).map(|_| NodeRef { tree: self, id })
    }

    /// # Panics
    ///
    /// Panics if `id` was not issued by this tree.
    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        assert!(id.0 < self.nodes.len(), "node #{} is not in this tree", id.0);
        NodeRef { tree: self, id }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Index<NodeId> for Tree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

/// A node viewed through its tree, so nested fields and the parent can be
/// followed.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'t> {
    tree: &'t Tree,
    id: NodeId,
}

impl<'t> NodeRef<'t> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'t Tree {
        self.tree
    }

    fn data(&self) -> &'t Node {
        &self.tree.nodes[self.id.0]
    }

    pub fn kind(&self) -> &'static str {
        self.data().kind
    }

    pub fn start(&self) -> Option<usize> {
        self.data().start
    }

    pub fn fields(&self) -> &'t Fields {
        &self.data().fields
    }

    pub fn get(&self, name: &str) -> Option<&'t FieldValue> {
        self.fields().get(name)
    }

    pub fn scalar(&self, name: &str) -> Option<&'t Value> {
        self.fields().scalar(name)
    }

    pub fn str(&self, name: &str) -> Option<&'t str> {
        self.fields().str(name)
    }

    pub fn child(&self, name: &str) -> Option<NodeRef<'t>> {
        let id = self.fields().node(name)?;
        Some(self.tree.node(id))
    }

    /// Nodes of a list field; empty when the field is absent.
    pub fn children(&self, name: &str) -> Vec<NodeRef<'t>> {
        self.fields()
            .list(name)
            .iter()
            .map(|id| self.tree.node(*id))
            .collect()
    }

    pub fn parent(&self) -> Option<NodeRef<'t>> {
        self.data().parent.map(|id| self.tree.node(id))
    }

    /// Nearest enclosing node of the given kind, excluding this one.
    pub fn ancestor(&self, kind: &str) -> Option<NodeRef<'t>> {
        let mut current = self.parent();
        while let Some(node) = current {
            if node.kind() == kind {
                return Some(node);
            }
            current = node.parent();
        }
        None
    }

    /// The node's fields as a JSON object, nested nodes expanded. Parent
    /// links and positions are left out.
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        for (name, value) in self.fields().iter() {
            let json = match value {
                FieldValue::Scalar(value) => value.clone(),
                FieldValue::Node(id) => self.tree.node(*id).to_json(),
                FieldValue::List(ids) => Value::Array(
                    ids.iter().map(|id| self.tree.node(*id).to_json()).collect(),
                ),
            };
            object.insert(name.to_string(), json);
        }
        Value::Object(object)
    }

    /// Renders the node back to source text with its node type's renderer.
    pub fn render(&self, options: Option<&Value>) -> String {
        match self.tree.registry.get(self.kind()) {
            Ok(node_type) => node_type.render(*self, options),
            Err(_) => String::new(),
        }
    }
}
