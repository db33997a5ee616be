//! Generator Driver
//!
//! Orchestrates registration and resolution over an input forest, and runs
//! the bulk type-mapping pass the emission backend consumes.

use tracing::debug;

use crate::error::Result;
use crate::registry::{register_forest, SchemaRegistry};
use crate::resolver::resolve_all_in_forest;
use crate::schema::SchemaForest;
use crate::types::{create_or_get_type, Namespace, TypeHandle};

/// Register every identified schema, then resolve every reference in place
///
/// On success the forest is reference-free and the registry is returned for
/// id-based lookup. On failure the forest may be partially mutated and must
/// be discarded.
pub fn prepare_forest(forest: &mut SchemaForest) -> Result<SchemaRegistry> {
    let registry = register_forest(forest)?;
    resolve_all_in_forest(&registry, forest)?;
    debug!(registered = registry.len(), "forest prepared for emission");
    Ok(registry)
}

/// Create one target type per registered schema, in registration order
///
/// The forest must already be resolved. Returns `(id, handle)` pairs; shared
/// nodes reuse their memoized handle rather than minting duplicates.
pub fn create_all_types(
    namespace: &mut Namespace,
    forest: &SchemaForest,
    registry: &SchemaRegistry,
) -> Result<Vec<(String, TypeHandle)>> {
    let mut created = Vec::with_capacity(registry.len());
    for (id, node) in registry.iter() {
        let handle = create_or_get_type(namespace, forest, node)?;
        created.push((id.to_string(), handle));
    }
    Ok(created)
}
