//! Main docmap crate providing schema-driven mapping between documents and typed records.
//!
//! This crate is the primary entry point for users of docmap. It re-exports the core types and
//! functionality from `docmap-core`.
//!
//! # Features
//!
//! - **Declarative schemas** - Attributes, embedded records, identifier policies and hooks, built once at start-up
//! - **Construction with defaults** - Literal defaults and generators (identifiers, timestamps) run per record
//! - **Loading and dumping** - Recursive mapping of embedded records, with nulls stripped from every dumped level
//! - **Typed models** - Serde structs mapped through registered schemas
//!
//! # Quick Start
//!
//! ```ignore
//! use docmap::prelude::*;
//!
//! let label = Schema::builder("Label")
//!     .identifier(IdentifierPolicy::None)
//!     .field_with_default("name", TypeTag::String, DefaultValue::literal("warning"))
//!     .field_with_default("color", TypeTag::String, DefaultValue::literal("red"))
//!     .build()?;
//!
//! let registry = SchemaRegistry::builder()
//!     .register_schema(label.clone())?
//!     .register(
//!         Schema::builder("Card")
//!             .collection("cards")
//!             .field("title", TypeTag::String)
//!             .embeds_one_with_default("label", &label, DefaultValue::instance_of(&label)),
//!     )?
//!     .build();
//!
//! let cards = registry.schema("Card")?;
//!
//! // A fresh card: { label: { name: "warning", color: "red" }, _id: ObjectId(..) }
//! let card = cards.new_record().with("title", "Ship it")?;
//!
//! // Hand the document to a driver.
//! let stored: bson::Document = cards.dump(card).to_bson();
//!
//! // Read it back.
//! let loaded = cards.load(&Document::from_bson(stored));
//! assert_eq!(loaded.value("title").as_str(), Some("Ship it"));
//! ```
//!
//! # Hooks
//!
//! Post-load hooks compute derived fields, pre-dump hooks keep them out of storage:
//!
//! ```ignore
//! use docmap::prelude::*;
//!
//! let person = Schema::builder("Person")
//!     .field("first", TypeTag::String)
//!     .field("last", TypeTag::String)
//!     .field("full_name", TypeTag::String)
//!     .post_load(|mut record| {
//!         let full = format!(
//!             "{} {}",
//!             record.value("first").as_str().unwrap_or_default(),
//!             record.value("last").as_str().unwrap_or_default(),
//!         );
//!         record.set("full_name", full).ok();
//!         record
//!     })
//!     .pre_dump(|mut record| {
//!         record.take("full_name");
//!         record
//!     })
//!     .build()?;
//! ```

pub mod prelude;

pub use docmap_core::{document, error, field, identifier, model, normalize, record, registry, relation, schema, value};

// Re-export BSON types for convenience
pub use bson;
