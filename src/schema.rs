//! Schema node types and the arena forest
//!
//! Schema documents can reference each other by id, including forward and
//! self references, so the resolved structure is a graph rather than a tree.
//! Nodes live in an arena (`SchemaForest`) addressed by a stable `NodeId`;
//! child slots store ids, which lets resolution alias one node from many
//! parents and represent genuine cycles without copying.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved `$ref` value denoting the root of the current resolution pass
pub const SELF_REFERENCE: &str = "#";

/// The declared category of a schema node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaKind {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    /// Universal top type; also the default when a document declares no type
    #[default]
    Any,
    Null,
    /// Declared by the schema dialect but not mappable to a concrete type
    Interface,
    /// Declared by the schema dialect but not mappable to a concrete type
    TupleArrayMap,
}

impl SchemaKind {
    /// The wire name used in schema documents
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaKind::String => "string",
            SchemaKind::Number => "number",
            SchemaKind::Integer => "integer",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Array => "array",
            SchemaKind::Object => "object",
            SchemaKind::Any => "any",
            SchemaKind::Null => "null",
            SchemaKind::Interface => "interface",
            SchemaKind::TupleArrayMap => "tuple_array_map",
        }
    }

    /// Parse the wire name used in schema documents
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "string" => SchemaKind::String,
            "number" => SchemaKind::Number,
            "integer" => SchemaKind::Integer,
            "boolean" => SchemaKind::Boolean,
            "array" => SchemaKind::Array,
            "object" => SchemaKind::Object,
            "any" => SchemaKind::Any,
            "null" => SchemaKind::Null,
            "interface" => SchemaKind::Interface,
            "tuple_array_map" => SchemaKind::TupleArrayMap,
            _ => return None,
        })
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable arena index identifying one schema node
///
/// Node identity, not structural equality, is the basis for reuse, cycle
/// guarding, and type memoization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// A single schema node
///
/// A node with a non-null `reference` is a placeholder: it owns no children
/// and denotes another node by id, or the resolution root via
/// [`SELF_REFERENCE`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaNode {
    /// Unique id across the whole forest, if the node is addressable
    pub id: Option<String>,
    /// Display name, used to name generated object types
    pub name: Option<String>,
    /// Documentation passed through to the emission backend
    pub description: Option<String>,
    /// Declared category
    pub kind: SchemaKind,
    /// Named sub-schemas, in declaration order
    pub properties: IndexMap<String, NodeId>,
    /// Named sub-schemas for keys not covered by `properties`
    pub additional_properties: IndexMap<String, NodeId>,
    /// Element schema for array kinds
    pub items: Option<NodeId>,
    /// Element schema for entries beyond `items`; does not affect the
    /// computed element type
    pub additional_items: Option<NodeId>,
    /// Whether array elements must be unique (Set vs List shape)
    pub unique_items: bool,
    /// Reference placeholder target: another node's id or [`SELF_REFERENCE`]
    pub reference: Option<String>,
}

impl SchemaNode {
    /// Create a node of the given kind
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Create an addressable node with the given id
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Create a reference placeholder pointing at another node's id
    pub fn reference(target: impl Into<String>) -> Self {
        Self {
            reference: Some(target.into()),
            ..Self::default()
        }
    }

    /// Create a reference placeholder pointing at the resolution root
    pub fn self_reference() -> Self {
        Self::reference(SELF_REFERENCE)
    }

    /// Whether this node is a reference placeholder
    pub fn is_reference(&self) -> bool {
        self.reference.is_some()
    }

    /// All owned child slots in declaration order: properties, additional
    /// properties, items, additional items
    pub fn child_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.properties
            .values()
            .copied()
            .chain(self.additional_properties.values().copied())
            .chain(self.items)
            .chain(self.additional_items)
    }
}

/// Arena of schema nodes plus the ordered list of roots
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaForest {
    nodes: Vec<SchemaNode>,
    roots: Vec<NodeId>,
}

impl SchemaForest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node into the arena without marking it as a root
    pub fn insert(&mut self, node: SchemaNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Insert a node and mark it as a root
    pub fn add_root(&mut self, node: SchemaNode) -> NodeId {
        let id = self.insert(node);
        self.roots.push(id);
        id
    }

    /// Mark an existing node as a root
    pub fn mark_root(&mut self, id: NodeId) {
        self.roots.push(id);
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> &SchemaNode {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut SchemaNode {
        &mut self.nodes[id.index()]
    }

    /// Number of nodes in the arena, including unreachable placeholders
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
