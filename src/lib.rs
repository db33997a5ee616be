//! Schema Model Generation Core
//!
//! Transforms a schema description forest into a flat registry of uniquely
//! identified nodes, a fully reference-free graph, and a target type per
//! node for a downstream code emitter.
//!
//! ## Pipeline
//!
//! ```text
//! JSON documents                (loader, optional adapter)
//!       |
//!       v
//! SchemaForest  --register-->  SchemaRegistry        (id -> node)
//!       |                          |
//!       +-------resolve-----------+                  (in-place, cycle-safe)
//!       |
//!       v
//! reference-free graph  --map-->  TypeHandle per node (memoized per Namespace)
//! ```
//!
//! Nodes live in an arena addressed by stable [`NodeId`]s, so resolution can
//! alias one node from many parents and genuine cycles (A reachable from B
//! and vice versa) are representable without copying. Everything is
//! single-threaded and synchronous; independent runs must use their own
//! forest, registry, and namespace.

pub mod driver;
pub mod error;
pub mod loader;
pub mod registry;
pub mod resolver;
pub mod schema;
pub mod types;

pub use driver::{create_all_types, prepare_forest};
pub use error::{Result, SchemaError};
pub use loader::{parse_forest, parse_node};
pub use registry::{register_forest, SchemaRegistry};
pub use resolver::{resolve_all, resolve_all_in_forest, resolve_one};
pub use schema::{NodeId, SchemaForest, SchemaKind, SchemaNode, SELF_REFERENCE};
pub use types::{create_or_get_type, Namespace, ScalarType, TypeHandle};
