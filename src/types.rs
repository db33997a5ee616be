//! Type Mapper
//!
//! Maps each schema kind to a concrete target type representation for the
//! code emitter. The mapping is a statically enumerated table over the closed
//! kind set (no runtime type discovery): scalar kinds map to the target's
//! primitive or boxed form, arrays to List/Set container shapes, and object
//! kinds mint a nominal handle inside a [`Namespace`]. Mapping is memoized
//! per namespace keyed by node identity, so two slots aliasing the same
//! resolved node yield the same generated type.
//!
//! Member synthesis for object types is the emission backend's job; this
//! module only decides what each node IS.

use indexmap::IndexMap;
use std::collections::HashMap;
use tracing::trace;

use crate::error::{Result, SchemaError};
use crate::schema::{NodeId, SchemaForest, SchemaKind};

/// Scalar target types with distinct primitive and boxed spellings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Double,
    Long,
    Boolean,
}

impl ScalarType {
    fn primitive_name(&self) -> &'static str {
        match self {
            ScalarType::Double => "double",
            ScalarType::Long => "long",
            ScalarType::Boolean => "boolean",
        }
    }

    fn boxed_name(&self) -> &'static str {
        match self {
            ScalarType::Double => "java.lang.Double",
            ScalarType::Long => "java.lang.Long",
            ScalarType::Boolean => "java.lang.Boolean",
        }
    }
}

/// Opaque handle for a target type
///
/// Beyond [`TypeHandle::full_name`] the emission backend treats handles as
/// opaque; the variants exist so container shapes and boxing compose without
/// string parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeHandle {
    /// Unboxed scalar, usable as a standalone field type
    Primitive(ScalarType),
    /// Boxed scalar, required inside container elements
    Boxed(ScalarType),
    /// Target string type
    String,
    /// Universal top type, used for ANY and NULL kinds
    Object,
    /// Ordered container permitting duplicates
    List(Box<TypeHandle>),
    /// Unordered container of unique elements
    Set(Box<TypeHandle>),
    /// Nominal generated type registered in a namespace
    Named { namespace: String, name: String },
}

impl TypeHandle {
    /// Fully qualified name in the target language
    pub fn full_name(&self) -> String {
        match self {
            TypeHandle::Primitive(scalar) => scalar.primitive_name().to_string(),
            TypeHandle::Boxed(scalar) => scalar.boxed_name().to_string(),
            TypeHandle::String => "java.lang.String".to_string(),
            TypeHandle::Object => "java.lang.Object".to_string(),
            TypeHandle::List(element) => format!("java.util.List<{}>", element.full_name()),
            TypeHandle::Set(element) => format!("java.util.Set<{}>", element.full_name()),
            TypeHandle::Named { namespace, name } => format!("{}.{}", namespace, name),
        }
    }

    /// The container-element form of this handle
    ///
    /// Scalars box; every other handle is already usable as an element.
    fn boxed(self) -> TypeHandle {
        match self {
            TypeHandle::Primitive(scalar) => TypeHandle::Boxed(scalar),
            other => other,
        }
    }
}

/// Output package for minted nominal types, with the per-namespace memo
///
/// One namespace per independent type-mapping run; memo and minted-type
/// state must not leak between unrelated forests.
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    name: String,
    types: IndexMap<String, TypeHandle>,
    memo: HashMap<NodeId, TypeHandle>,
}

impl Namespace {
    /// Create a namespace with a dotted package name, e.g. `org.sample`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a minted nominal type by simple name
    pub fn get_type(&self, name: &str) -> Option<&TypeHandle> {
        self.types.get(name)
    }

    /// Minted nominal types in creation order
    pub fn types(&self) -> impl Iterator<Item = (&str, &TypeHandle)> {
        self.types.iter().map(|(name, handle)| (name.as_str(), handle))
    }
}

/// Compute (or fetch from the memo) the target type for a schema node
///
/// Deterministic and side-effect free apart from namespace bookkeeping.
/// The node should come from a resolved forest; reference placeholders are
/// not mappable.
pub fn create_or_get_type(
    namespace: &mut Namespace,
    forest: &SchemaForest,
    node: NodeId,
) -> Result<TypeHandle> {
    if let Some(handle) = namespace.memo.get(&node) {
        return Ok(handle.clone());
    }

    let schema = forest.node(node);
    let handle = match schema.kind {
        SchemaKind::String => TypeHandle::String,
        SchemaKind::Number => TypeHandle::Primitive(ScalarType::Double),
        SchemaKind::Integer => TypeHandle::Primitive(ScalarType::Long),
        SchemaKind::Boolean => TypeHandle::Primitive(ScalarType::Boolean),
        // No dedicated null type in the target; both collapse to the top type.
        SchemaKind::Any | SchemaKind::Null => TypeHandle::Object,
        SchemaKind::Array => {
            let items = schema.items.ok_or(SchemaError::MissingArrayItemType)?;
            let element = create_or_get_type(namespace, forest, items)?.boxed();
            if schema.unique_items {
                TypeHandle::Set(Box::new(element))
            } else {
                TypeHandle::List(Box::new(element))
            }
        }
        SchemaKind::Object => {
            let name = schema
                .name
                .as_deref()
                .or(schema.id.as_deref())
                .ok_or(SchemaError::MissingTypeName)?;
            let handle = TypeHandle::Named {
                namespace: namespace.name.clone(),
                name: name.to_string(),
            };
            namespace.types.insert(name.to_string(), handle.clone());
            handle
        }
        kind @ (SchemaKind::Interface | SchemaKind::TupleArrayMap) => {
            return Err(SchemaError::UnsupportedSchemaKind { kind });
        }
    };

    trace!(%node, kind = %schema.kind, type_name = %handle.full_name(), "mapped schema to type");
    namespace.memo.insert(node, handle.clone());
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaNode;

    fn single(kind: SchemaKind) -> (SchemaForest, NodeId) {
        let mut forest = SchemaForest::new();
        let node = forest.add_root(SchemaNode::new(kind));
        (forest, node)
    }

    fn array_of(kind: SchemaKind, unique: bool) -> (SchemaForest, NodeId) {
        let mut forest = SchemaForest::new();
        let element = forest.insert(SchemaNode::new(kind));
        let mut array = SchemaNode::new(SchemaKind::Array);
        array.items = Some(element);
        array.unique_items = unique;
        let node = forest.add_root(array);
        (forest, node)
    }

    #[test]
    fn test_scalar_and_top_types() {
        let cases = [
            (SchemaKind::Number, "double"),
            (SchemaKind::Integer, "long"),
            (SchemaKind::Boolean, "boolean"),
            (SchemaKind::String, "java.lang.String"),
            (SchemaKind::Any, "java.lang.Object"),
            (SchemaKind::Null, "java.lang.Object"),
        ];
        for (kind, expected) in cases {
            let (forest, node) = single(kind);
            let mut namespace = Namespace::new("org.sample");
            let handle = create_or_get_type(&mut namespace, &forest, node).unwrap();
            assert_eq!(handle.full_name(), expected, "kind {kind}");
        }
    }

    #[test]
    fn test_array_missing_items_fails() {
        let (forest, node) = single(SchemaKind::Array);
        let mut namespace = Namespace::new("org.sample");
        let err = create_or_get_type(&mut namespace, &forest, node).unwrap_err();
        assert!(matches!(err, SchemaError::MissingArrayItemType));
    }

    #[test]
    fn test_array_shapes_and_boxed_elements() {
        let cases = [
            (SchemaKind::String, false, "java.util.List<java.lang.String>"),
            (SchemaKind::String, true, "java.util.Set<java.lang.String>"),
            (SchemaKind::Integer, false, "java.util.List<java.lang.Long>"),
            (SchemaKind::Integer, true, "java.util.Set<java.lang.Long>"),
            (SchemaKind::Boolean, false, "java.util.List<java.lang.Boolean>"),
            (SchemaKind::Boolean, true, "java.util.Set<java.lang.Boolean>"),
            (SchemaKind::Number, false, "java.util.List<java.lang.Double>"),
            (SchemaKind::Number, true, "java.util.Set<java.lang.Double>"),
            (SchemaKind::Any, false, "java.util.List<java.lang.Object>"),
            (SchemaKind::Any, true, "java.util.Set<java.lang.Object>"),
            (SchemaKind::Null, false, "java.util.List<java.lang.Object>"),
            (SchemaKind::Null, true, "java.util.Set<java.lang.Object>"),
        ];
        for (kind, unique, expected) in cases {
            let (forest, node) = array_of(kind, unique);
            let mut namespace = Namespace::new("org.sample");
            let handle = create_or_get_type(&mut namespace, &forest, node).unwrap();
            assert_eq!(handle.full_name(), expected, "kind {kind} unique {unique}");
        }
    }

    #[test]
    fn test_object_mints_named_type_from_name() {
        let mut forest = SchemaForest::new();
        let mut object = SchemaNode::with_id("product");
        object.name = Some("Product".to_string());
        object.kind = SchemaKind::Object;
        let node = forest.add_root(object);

        let mut namespace = Namespace::new("org.sample");
        let handle = create_or_get_type(&mut namespace, &forest, node).unwrap();
        assert_eq!(handle.full_name(), "org.sample.Product");
        assert_eq!(namespace.get_type("Product"), Some(&handle));
    }

    #[test]
    fn test_object_falls_back_to_id() {
        let mut forest = SchemaForest::new();
        let mut object = SchemaNode::with_id("product");
        object.kind = SchemaKind::Object;
        let node = forest.add_root(object);

        let mut namespace = Namespace::new("org.sample");
        let handle = create_or_get_type(&mut namespace, &forest, node).unwrap();
        assert_eq!(handle.full_name(), "org.sample.product");
    }

    #[test]
    fn test_anonymous_object_fails() {
        let (forest, node) = single(SchemaKind::Object);
        let mut namespace = Namespace::new("org.sample");
        let err = create_or_get_type(&mut namespace, &forest, node).unwrap_err();
        assert!(matches!(err, SchemaError::MissingTypeName));
    }

    #[test]
    fn test_unsupported_kinds_fail() {
        for kind in [SchemaKind::Interface, SchemaKind::TupleArrayMap] {
            let (forest, node) = single(kind);
            let mut namespace = Namespace::new("org.sample");
            let err = create_or_get_type(&mut namespace, &forest, node).unwrap_err();
            assert!(matches!(err, SchemaError::UnsupportedSchemaKind { kind: k } if k == kind));
        }
    }

    #[test]
    fn test_memoized_per_node_identity() {
        let mut forest = SchemaForest::new();
        let mut object = SchemaNode::with_id("thing");
        object.name = Some("Thing".to_string());
        object.kind = SchemaKind::Object;
        let node = forest.add_root(object);

        let mut namespace = Namespace::new("org.sample");
        let first = create_or_get_type(&mut namespace, &forest, node).unwrap();
        let second = create_or_get_type(&mut namespace, &forest, node).unwrap();
        assert_eq!(first, second);
        assert_eq!(namespace.types().count(), 1);
    }

    #[test]
    fn test_independent_namespaces_do_not_share_memo() {
        let (forest, node) = single(SchemaKind::String);
        let mut first = Namespace::new("org.first");
        let mut second = Namespace::new("org.second");
        create_or_get_type(&mut first, &forest, node).unwrap();
        assert!(second.memo.is_empty());
        create_or_get_type(&mut second, &forest, node).unwrap();
        assert_eq!(second.memo.len(), 1);
    }
}
