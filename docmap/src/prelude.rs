//! Convenient re-exports of commonly used types from docmap.
//!
//! Import this prelude module to quickly access the most frequently used types
//! and traits without needing to import from multiple sub-modules:
//!
//! ```ignore
//! use docmap::prelude::*;
//! ```
//!
//! This provides access to:
//! - Values, documents and key modes
//! - Schemas, fields, defaults and relations
//! - Records and the schema registry
//! - Identifier providers and typed models
//! - Error types

pub use docmap_core::{
    document::{Document, Key, KeyMode, Symbol},
    error::{MappingError, MappingResult},
    field::{DefaultValue, Field, FieldKind, TypeTag},
    identifier::{IdentifierProvider, ObjectIdProvider, UuidProvider},
    model::Model,
    normalize::Normalizer,
    record::Record,
    registry::{SchemaRegistry, SchemaRegistryBuilder},
    relation::{Capabilities, EmbedTarget, Mapper, PlainType},
    schema::{IdentifierPolicy, Schema, SchemaBuilder},
    value::Value,
};
