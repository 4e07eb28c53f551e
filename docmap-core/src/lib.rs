//! A schema-driven mapper between loosely-typed documents and typed records.
//!
//! This crate is the core of the docmap project and provides:
//!
//! - **Values and documents** ([`value`], [`document`]) - The generic representation exchanged with document stores
//! - **Schemas** ([`schema`], [`field`], [`relation`]) - Immutable descriptions of record types, their defaults, embedded relations and hooks
//! - **Records** ([`record`]) - Schema-typed instances with a fixed slot per field
//! - **Mapping operations** - Construction with defaults ([`Schema::new_record`](schema::Schema::new_record)), loading ([`Schema::load`](schema::Schema::load)) and dumping ([`Schema::dump`](schema::Schema::dump))
//! - **Normalization** ([`normalize`]) - Conversion of value graphs into document-safe shape
//! - **Identifier providers** ([`identifier`]) - Generators behind the default identifier policy
//! - **Schema registry** ([`registry`]) - Start-up registration and lookup of schemas
//! - **Typed models** ([`model`]) - Serde types mapped through registered schemas
//! - **Error handling** ([`error`]) - Error types and result types
//!
//! No operation performs I/O: documents are handed to and received from a document-store driver
//! by the caller.
//!
//! # Example
//!
//! ```ignore
//! use docmap_core::{
//!     field::{DefaultValue, TypeTag},
//!     schema::{IdentifierPolicy, Schema},
//! };
//!
//! let label = Schema::builder("Label")
//!     .identifier(IdentifierPolicy::None)
//!     .field_with_default("name", TypeTag::String, DefaultValue::literal("warning"))
//!     .field_with_default("color", TypeTag::String, DefaultValue::literal("red"))
//!     .build()?;
//!
//! let card = Schema::builder("Card")
//!     .identifier(IdentifierPolicy::None)
//!     .field("title", TypeTag::String)
//!     .embeds_one_with_default("label", &label, DefaultValue::instance_of(&label))
//!     .build()?;
//!
//! // { "label": { "name": "warning", "color": "red" } }
//! let doc = card.dump(card.new_record());
//! ```

pub mod document;
pub mod error;
pub mod field;
pub mod identifier;
pub mod model;
pub mod normalize;
pub mod record;
pub mod registry;
pub mod relation;
pub mod schema;
pub mod value;

mod dump;
mod instance;
mod load;
