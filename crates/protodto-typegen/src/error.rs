//! Error types.

use crate::input::{FieldType, ParseError};

/// A fatal condition. Any of these aborts the whole run.
#[derive(Debug, thiserror::Error)]
pub enum TypegenError {
    #[error("type {0} is declared more than once")]
    DuplicateType(String),

    #[error("field {field} references unknown type {type_ref}")]
    UnresolvedType { field: String, type_ref: String },

    #[error("field {field} has unsupported type {kind:?}")]
    UnsupportedType { field: String, kind: FieldType },

    #[error("field {field} of kind {kind:?} has no type name")]
    MissingTypeName { field: String, kind: FieldType },

    #[error("unit {0} requested for generation but not provided")]
    UnknownUnit(String),

    #[error("map entry {0} does not declare a key and a value field")]
    MalformedMapEntry(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("emitter {emitter} failed: {message}")]
    Emit { emitter: String, message: String },
}

pub type Result<T, E = TypegenError> = std::result::Result<T, E>;
