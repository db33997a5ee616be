//! Error types for schema registration, resolution, and type mapping

use thiserror::Error;

use crate::schema::SchemaKind;

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Schema processing errors
///
/// All variants are precondition violations: on failure the forest and
/// registry are left partially mutated and must be discarded, not reused.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Duplicate schema id: {id}")]
    DuplicateIdentifier { id: String },

    #[error("Unresolved schema reference: {reference}")]
    UnresolvedReference { reference: String },

    #[error("Array schema has no item type")]
    MissingArrayItemType,

    #[error("Cannot map schema kind to a type: {kind}")]
    UnsupportedSchemaKind { kind: SchemaKind },

    #[error("Object schema has neither a name nor an id")]
    MissingTypeName,

    #[error("Invalid schema format: {0}")]
    InvalidFormat(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
