//! Reference Resolver
//!
//! Rewrites every reference placeholder reachable from a root into the
//! concrete node it denotes, in place. Replacement reuses existing arena
//! nodes rather than copies, so a reference chain may close into a genuine
//! cycle; a visited set keyed by node identity guarantees each node is
//! processed at most once per root and bounds recursion on cyclic input.

use std::collections::HashSet;
use tracing::{debug, trace};

use crate::error::{Result, SchemaError};
use crate::registry::SchemaRegistry;
use crate::schema::{NodeId, SchemaForest, SELF_REFERENCE};

/// Resolve a single candidate slot
///
/// A candidate without a reference is returned unchanged. The self sentinel
/// resolves to `self_node` regardless of registry contents. Any other
/// reference is looked up in the registry and fails with
/// [`SchemaError::UnresolvedReference`] when absent.
pub fn resolve_one(
    registry: &SchemaRegistry,
    forest: &SchemaForest,
    candidate: NodeId,
    self_node: NodeId,
) -> Result<NodeId> {
    match forest.node(candidate).reference.as_deref() {
        None => Ok(candidate),
        Some(SELF_REFERENCE) => Ok(self_node),
        Some(target) => registry
            .lookup(target)
            .ok_or_else(|| SchemaError::UnresolvedReference {
                reference: target.to_string(),
            }),
    }
}

/// Resolve every reference reachable from `root`, in place
///
/// `self_node` is fixed to `root` for the entire call: a self reference
/// nested at any depth resolves to the outermost root, never to an
/// intermediate node, even if that intermediate node has its own id.
pub fn resolve_all(
    registry: &SchemaRegistry,
    forest: &mut SchemaForest,
    root: NodeId,
) -> Result<()> {
    let mut visited: HashSet<NodeId> = HashSet::new();
    resolve_node(registry, forest, root, root, &mut visited)?;
    debug!(%root, processed = visited.len(), "resolved references under root");
    Ok(())
}

/// Resolve every reference in the forest, once per root
pub fn resolve_all_in_forest(registry: &SchemaRegistry, forest: &mut SchemaForest) -> Result<()> {
    let roots: Vec<NodeId> = forest.roots().to_vec();
    for root in roots {
        resolve_all(registry, forest, root)?;
    }
    Ok(())
}

fn resolve_node(
    registry: &SchemaRegistry,
    forest: &mut SchemaForest,
    node: NodeId,
    self_node: NodeId,
    visited: &mut HashSet<NodeId>,
) -> Result<()> {
    // Re-entering a node means the current path closed into shared or cyclic
    // structure; the node is reused as-is and its own slots are handled by
    // whichever call reached it first.
    if !visited.insert(node) {
        return Ok(());
    }

    let property_names: Vec<String> = forest.node(node).properties.keys().cloned().collect();
    for name in property_names {
        let slot = forest.node(node).properties[&name];
        let resolved = resolve_one(registry, forest, slot, self_node)?;
        if resolved != slot {
            trace!(%node, property = %name, from = %slot, to = %resolved, "replaced reference");
            // IndexMap keeps the original position for an existing key.
            forest.node_mut(node).properties.insert(name, resolved);
        }
        resolve_node(registry, forest, resolved, self_node, visited)?;
    }

    let additional_names: Vec<String> = forest
        .node(node)
        .additional_properties
        .keys()
        .cloned()
        .collect();
    for name in additional_names {
        let slot = forest.node(node).additional_properties[&name];
        let resolved = resolve_one(registry, forest, slot, self_node)?;
        if resolved != slot {
            trace!(%node, additional_property = %name, from = %slot, to = %resolved, "replaced reference");
            forest
                .node_mut(node)
                .additional_properties
                .insert(name, resolved);
        }
        resolve_node(registry, forest, resolved, self_node, visited)?;
    }

    if let Some(slot) = forest.node(node).items {
        let resolved = resolve_one(registry, forest, slot, self_node)?;
        if resolved != slot {
            trace!(%node, slot = "items", from = %slot, to = %resolved, "replaced reference");
            forest.node_mut(node).items = Some(resolved);
        }
        resolve_node(registry, forest, resolved, self_node, visited)?;
    }

    if let Some(slot) = forest.node(node).additional_items {
        let resolved = resolve_one(registry, forest, slot, self_node)?;
        if resolved != slot {
            trace!(%node, slot = "additional_items", from = %slot, to = %resolved, "replaced reference");
            forest.node_mut(node).additional_items = Some(resolved);
        }
        resolve_node(registry, forest, resolved, self_node, visited)?;
    }

    Ok(())
}
