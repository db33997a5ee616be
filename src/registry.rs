//! Schema Registry
//!
//! Builds the flat `id -> node` map for a forest, rejecting duplicate ids
//! anywhere in the forest before resolution begins.

use indexmap::IndexMap;
use std::collections::HashSet;
use tracing::debug;

use crate::error::{Result, SchemaError};
use crate::schema::{NodeId, SchemaForest};

/// Flat map from schema id to arena node, built once per forest
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    entries: IndexMap<String, NodeId>,
}

impl SchemaRegistry {
    /// Look up a registered schema by id
    pub fn lookup(&self, id: &str) -> Option<NodeId> {
        self.entries.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Registered entries in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.entries.iter().map(|(id, node)| (id.as_str(), *node))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn register(&mut self, id: &str, node: NodeId) -> Result<()> {
        if self.entries.insert(id.to_string(), node).is_some() {
            return Err(SchemaError::DuplicateIdentifier { id: id.to_string() });
        }
        Ok(())
    }
}

/// Register every identified schema node in the forest
///
/// Walks each root and recursively every structurally owned child slot.
/// Traversal does not follow references (placeholders own no children) and
/// visits each arena node at most once, so it terminates even on a forest
/// whose slots already alias shared or cyclic structure.
///
/// Fails with [`SchemaError::DuplicateIdentifier`] if the same id appears
/// twice anywhere, regardless of root or depth. Root order affects only
/// which duplicate is reported first.
pub fn register_forest(forest: &SchemaForest) -> Result<SchemaRegistry> {
    let mut registry = SchemaRegistry::default();
    let mut seen: HashSet<NodeId> = HashSet::new();

    for &root in forest.roots() {
        register_node(forest, root, &mut registry, &mut seen)?;
    }

    debug!(
        roots = forest.roots().len(),
        registered = registry.len(),
        "registered identified schemas"
    );
    Ok(registry)
}

fn register_node(
    forest: &SchemaForest,
    node: NodeId,
    registry: &mut SchemaRegistry,
    seen: &mut HashSet<NodeId>,
) -> Result<()> {
    if !seen.insert(node) {
        return Ok(());
    }

    let schema = forest.node(node);
    if let Some(id) = &schema.id {
        registry.register(id, node)?;
    }

    for child in schema.child_ids() {
        register_node(forest, child, registry, seen)?;
    }
    Ok(())
}
