use crate::traits::{NodeType, Syntax};
use common_framework::{Result, ScanError};
use std::collections::HashMap;
use std::sync::Arc;

/// The node types a driver can resolve by name.
///
/// Built once through [`RegistryBuilder`] and shared immutably by every
/// driver, tree and node of a grammar.
#[derive(Debug, Default)]
pub struct Registry {
    types: HashMap<&'static str, NodeType>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Looks up a node type. Unknown names are a grammar bug and fail with
    /// `InvalidArgument`.
    pub fn get(&self, name: &str) -> Result<&NodeType> {
        self.types
            .get(name)
            .ok_or_else(|| ScanError::invalid_argument(format!("unknown node type: {}", name)))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.types.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Collects node types, then freezes them into a [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    types: Vec<NodeType>,
}

impl RegistryBuilder {
    pub fn register<T: Syntax>(self) -> Self {
        self.register_type(NodeType::of::<T>())
    }

    pub fn register_type(mut self, node_type: NodeType) -> Self {
        self.types.push(node_type);
        self
    }

    /// Fails with `InvalidArgument` if two node types share a name.
    pub fn build(self) -> Result<Arc<Registry>> {
        let mut types = HashMap::with_capacity(self.types.len());
        for node_type in self.types {
            if types.insert(node_type.name(), node_type).is_some() {
                return Err(ScanError::invalid_argument(format!(
                    "node type {} registered twice",
                    node_type.name()
                )));
            }
        }
        Ok(Arc::new(Registry { types }))
    }
}

/// A family of drivers sharing one set of node types.
///
/// Implementations build their registry on first use and hand out the same
/// `Arc` afterwards, typically from a `once_cell::sync::Lazy` static:
///
/// ```ignore
/// static REGISTRY: Lazy<Result<Arc<Registry>>> =
///     Lazy::new(|| Registry::builder().register::<Word>().build());
///
/// impl Grammar for WordLang {
///     fn registry() -> Result<Arc<Registry>> {
///         REGISTRY.clone()
///     }
/// }
/// ```
pub trait Grammar {
    fn registry() -> Result<Arc<Registry>>;
}
