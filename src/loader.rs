//! JSON adapter
//!
//! Builds a [`SchemaForest`] from JSON schema documents using the original
//! wire field names (`id`, `name`, `description`, `type`, `properties`,
//! `additionalProperties`, `items`, `additionalItems`, `uniqueItems`,
//! `$ref`). Children are inserted into the arena bottom-up; the returned
//! ids slot straight into parent nodes.

use serde_json::Value;
use tracing::debug;

use crate::error::{Result, SchemaError};
use crate::schema::{NodeId, SchemaForest, SchemaKind, SchemaNode};

/// Build a forest with one root per input document
pub fn parse_forest(documents: &[Value]) -> Result<SchemaForest> {
    let mut forest = SchemaForest::new();
    for document in documents {
        let node = parse_node(&mut forest, document)?;
        forest.mark_root(node);
    }
    debug!(roots = documents.len(), nodes = forest.len(), "parsed schema forest");
    Ok(forest)
}

/// Parse one document into the arena, returning its node id
///
/// The caller decides whether the node becomes a root or a child slot.
pub fn parse_node(forest: &mut SchemaForest, document: &Value) -> Result<NodeId> {
    let object = document
        .as_object()
        .ok_or_else(|| SchemaError::InvalidFormat(format!("schema must be an object, got {document}")))?;

    if let Some(reference) = object.get("$ref") {
        let target = reference
            .as_str()
            .ok_or_else(|| SchemaError::InvalidFormat("$ref must be a string".to_string()))?;
        // A placeholder denotes another node and owns nothing of its own.
        if object.len() > 1 {
            return Err(SchemaError::InvalidFormat(format!(
                "$ref to {target:?} must not carry other fields"
            )));
        }
        return Ok(forest.insert(SchemaNode::reference(target)));
    }

    let mut node = SchemaNode::default();
    node.id = string_field(object, "id")?;
    node.name = string_field(object, "name")?;
    node.description = string_field(object, "description")?;

    if let Some(kind) = string_field(object, "type")? {
        node.kind = SchemaKind::parse(&kind)
            .ok_or_else(|| SchemaError::InvalidFormat(format!("unknown schema type {kind:?}")))?;
    }

    if let Some(unique) = object.get("uniqueItems") {
        node.unique_items = unique
            .as_bool()
            .ok_or_else(|| SchemaError::InvalidFormat("uniqueItems must be a boolean".to_string()))?;
    }

    if let Some(properties) = map_field(object, "properties")? {
        for (name, child) in properties {
            let child_node = parse_node(forest, child)?;
            node.properties.insert(name.clone(), child_node);
        }
    }
    if let Some(additional) = map_field(object, "additionalProperties")? {
        for (name, child) in additional {
            let child_node = parse_node(forest, child)?;
            node.additional_properties.insert(name.clone(), child_node);
        }
    }
    if let Some(items) = object.get("items") {
        node.items = Some(parse_node(forest, items)?);
    }
    if let Some(additional_items) = object.get("additionalItems") {
        node.additional_items = Some(parse_node(forest, additional_items)?);
    }

    Ok(forest.insert(node))
}

fn string_field(
    object: &serde_json::Map<String, Value>,
    field: &str,
) -> Result<Option<String>> {
    match object.get(field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(SchemaError::InvalidFormat(format!(
            "{field} must be a string, got {other}"
        ))),
    }
}

fn map_field<'a>(
    object: &'a serde_json::Map<String, Value>,
    field: &str,
) -> Result<Option<&'a serde_json::Map<String, Value>>> {
    match object.get(field) {
        None => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(other) => Err(SchemaError::InvalidFormat(format!(
            "{field} must be an object, got {other}"
        ))),
    }
}
