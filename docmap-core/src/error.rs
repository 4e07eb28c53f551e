//! Error types and result types for schema definition and mapping operations.
//!
//! Definition errors surface while schemas are built or registered and are meant to abort
//! start-up. Load and dump never fail on document shape; the remaining variants cover lookups
//! and the typed model conversions. Use [`MappingResult<T>`] as the return type for fallible
//! operations.

use bson::error::Error as BsonError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents all possible errors raised by the mapping engine.
#[derive(Error, Debug)]
pub enum MappingError {
    /// Two fields of the same schema share a name.
    /// The first argument is the field name, the second is the schema name.
    #[error("Duplicate field {0} in schema {1}")]
    DuplicateField(String, String),
    /// A schema with this name is already registered.
    #[error("Schema already registered: {0}")]
    DuplicateSchema(String),
    /// Two registered schemas are backed by the same collection.
    /// The first argument is the collection name, the second is the schema that already claims it.
    #[error("Collection {0} is already backed by schema {1}")]
    DuplicateCollection(String, String),
    /// No schema with this name is registered.
    #[error("Schema not found: {0}")]
    UnknownSchema(String),
    /// The schema has no field with this name.
    /// The first argument is the field name, the second is the schema name.
    #[error("Field {0} not found in schema {1}")]
    UnknownField(String, String),
    /// Serialization/deserialization error when converting between document formats (BSON, JSON).
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// The value cannot be represented as a document.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

/// A specialized `Result` type for mapping operations.
pub type MappingResult<T> = Result<T, MappingError>;

impl From<BsonError> for MappingError {
    fn from(err: BsonError) -> Self {
        MappingError::Serialization(err.to_string())
    }
}

impl From<SerdeJsonError> for MappingError {
    fn from(err: SerdeJsonError) -> Self {
        MappingError::Serialization(err.to_string())
    }
}
