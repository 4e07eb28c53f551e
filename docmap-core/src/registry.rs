//! The schema registry.
//!
//! Schemas are registered once, at start-up, through [`SchemaRegistryBuilder`]. The built
//! [`SchemaRegistry`] is read-only and can be shared across threads without locking.
//!
//! Registration order matters for embedded relations that name their target: a name resolves
//! only against schemas registered before it.
//!
//! # Example
//!
//! ```ignore
//! use docmap::prelude::*;
//!
//! let registry = SchemaRegistry::builder()
//!     .with_identifier_provider(UuidProvider)
//!     .register(
//!         Schema::builder("Label")
//!             .identifier(IdentifierPolicy::None)
//!             .field("name", TypeTag::String),
//!     )?
//!     .register(
//!         Schema::builder("Card")
//!             .collection("cards")
//!             .field("title", TypeTag::String)
//!             .embeds_many("labels", "Label"),
//!     )?
//!     .build();
//!
//! let card = registry.new_record("Card")?;
//! ```

use std::{collections::HashMap, sync::Arc};

use indexmap::IndexMap;
use tracing::debug;

use crate::{
    document::{Document, KeyMode},
    error::{MappingError, MappingResult},
    identifier::{IdentifierProvider, IdentifierProviderRef, ObjectIdProvider},
    record::Record,
    schema::{Schema, SchemaBuilder},
};

/// A read-only set of schemas, retrievable by name or by backing collection.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    schemas: IndexMap<String, Schema>,
    collections: HashMap<String, String>,
    provider: IdentifierProviderRef,
}

impl SchemaRegistry {
    /// Creates a builder using the [`ObjectIdProvider`] for default identifiers.
    pub fn builder() -> SchemaRegistryBuilder {
        SchemaRegistryBuilder::default()
    }

    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    /// Looks up a schema by name.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::UnknownSchema`] if no schema has this name.
    pub fn schema(&self, name: &str) -> MappingResult<&Schema> {
        self.get(name)
            .ok_or_else(|| MappingError::UnknownSchema(name.to_string()))
    }

    /// Looks up the schema backed by a collection.
    pub fn by_collection(&self, collection: &str) -> Option<&Schema> {
        self.collections
            .get(collection)
            .and_then(|name| self.schemas.get(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Iterates over the schemas in registration order.
    pub fn schemas(&self) -> impl Iterator<Item = &Schema> {
        self.schemas.values()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// The provider behind the default identifier policy.
    pub fn identifier_provider(&self) -> &IdentifierProviderRef {
        &self.provider
    }

    /// Builds a new record of the named schema.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::UnknownSchema`] if no schema has this name.
    pub fn new_record(&self, name: &str) -> MappingResult<Record> {
        Ok(self.schema(name)?.new_record())
    }

    /// Loads a document into a record of the named schema.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::UnknownSchema`] if no schema has this name.
    pub fn load(&self, name: &str, document: &Document, mode: KeyMode) -> MappingResult<Record> {
        Ok(self.schema(name)?.load_with(document, mode))
    }
}

/// Builder for [`SchemaRegistry`].
#[derive(Debug)]
pub struct SchemaRegistryBuilder {
    schemas: IndexMap<String, Schema>,
    collections: HashMap<String, String>,
    provider: IdentifierProviderRef,
}

impl Default for SchemaRegistryBuilder {
    fn default() -> Self {
        Self {
            schemas: IndexMap::new(),
            collections: HashMap::new(),
            provider: Arc::new(ObjectIdProvider),
        }
    }
}

impl SchemaRegistryBuilder {
    /// Sets the provider used by schemas with the default identifier policy.
    ///
    /// Applies to schemas registered after this call.
    pub fn with_identifier_provider(mut self, provider: impl IdentifierProvider + 'static) -> Self {
        self.provider = Arc::new(provider);
        self
    }

    /// Builds and registers a schema.
    ///
    /// Embedded targets given by name resolve against the schemas registered so far.
    ///
    /// # Errors
    ///
    /// Returns a definition error if the schema has duplicate fields, its name is taken, or its
    /// collection is already backed by another schema.
    pub fn register(self, builder: SchemaBuilder) -> MappingResult<Self> {
        let schema = builder.build_with(self.provider.clone(), |name| self.schemas.get(name).cloned())?;
        self.register_schema(schema)
    }

    /// Registers an already built schema.
    ///
    /// # Errors
    ///
    /// Returns a definition error if the name is taken or the collection is already backed by
    /// another schema.
    pub fn register_schema(mut self, schema: Schema) -> MappingResult<Self> {
        let name = schema.name().to_string();
        if self.schemas.contains_key(&name) {
            return Err(MappingError::DuplicateSchema(name));
        }

        if let Some(collection) = schema.collection() {
            if let Some(owner) = self.collections.get(collection) {
                return Err(MappingError::DuplicateCollection(collection.to_string(), owner.clone()));
            }
            self.collections.insert(collection.to_string(), name.clone());
        }

        debug!(schema = %name, collection = ?schema.collection(), "registered schema");

        self.schemas.insert(name, schema);
        Ok(self)
    }

    pub fn build(self) -> SchemaRegistry {
        SchemaRegistry {
            schemas: self.schemas,
            collections: self.collections,
            provider: self.provider,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        field::{Field, TypeTag},
        identifier::UuidProvider,
        schema::IdentifierPolicy,
        value::Value,
    };

    fn registry() -> SchemaRegistry {
        SchemaRegistry::builder()
            .register(
                Schema::builder("Label")
                    .identifier(IdentifierPolicy::None)
                    .field("name", TypeTag::String),
            )
            .unwrap()
            .register(
                Schema::builder("Card")
                    .collection("cards")
                    .field("title", TypeTag::String)
                    .embeds_many("labels", "Label"),
            )
            .unwrap()
            .build()
    }

    #[test]
    fn lookup_by_name_and_collection() {
        let registry = registry();

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("Label"));
        assert_eq!(registry.by_collection("cards").map(Schema::name), Some("Card"));
        assert!(registry.by_collection("labels").is_none());

        let names: Vec<_> = registry.schemas().map(Schema::name).collect();
        assert_eq!(names, ["Label", "Card"]);
    }

    #[test]
    fn unknown_schema_is_an_error() {
        let err = registry().new_record("Nope").unwrap_err();
        assert!(matches!(err, MappingError::UnknownSchema(name) if name == "Nope"));
    }

    #[test]
    fn named_targets_resolve_against_earlier_registrations() {
        let registry = registry();
        let card = registry.schema("Card").unwrap();
        let relation = card.field("labels").and_then(Field::relation).unwrap();

        assert!(relation.can_load() && relation.can_dump());

        let doc: Document = [("labels", Value::Array(vec![Value::Map([("name", "x")].into_iter().collect())]))]
            .into_iter()
            .collect();
        let record = registry.load("Card", &doc, KeyMode::Textual).unwrap();
        let labels = record.value("labels").as_array().unwrap();
        assert_eq!(labels[0].as_record().map(Record::schema_name), Some("Label"));
    }

    #[test]
    fn duplicate_schema_names_are_rejected() {
        let err = SchemaRegistry::builder()
            .register(Schema::builder("Card"))
            .unwrap()
            .register(Schema::builder("Card"))
            .unwrap_err();

        assert!(matches!(err, MappingError::DuplicateSchema(name) if name == "Card"));
    }

    #[test]
    fn duplicate_collections_are_rejected() {
        let err = SchemaRegistry::builder()
            .register(Schema::builder("Card").collection("items"))
            .unwrap()
            .register(Schema::builder("Task").collection("items"))
            .unwrap_err();

        assert!(matches!(err, MappingError::DuplicateCollection(coll, owner) if coll == "items" && owner == "Card"));
    }

    #[test]
    fn duplicate_fields_fail_registration() {
        let err = SchemaRegistry::builder()
            .register(
                Schema::builder("Card")
                    .field("title", TypeTag::String)
                    .field("title", TypeTag::String),
            )
            .unwrap_err();

        assert!(matches!(err, MappingError::DuplicateField(..)));
    }

    #[test]
    fn configured_provider_backs_default_identifiers() {
        let registry = SchemaRegistry::builder()
            .with_identifier_provider(UuidProvider)
            .register(Schema::builder("Thing"))
            .unwrap()
            .build();

        let record = registry.new_record("Thing").unwrap();
        assert!(matches!(record.id(), Some(Value::Uuid(_))));
    }

    #[test]
    fn registry_is_shareable_across_threads() {
        let registry = Arc::new(registry());

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let registry = registry.clone();
                std::thread::spawn(move || {
                    let card = registry.schema("Card").unwrap();
                    let record = card.new_record().with("title", format!("card {i}")).unwrap();
                    card.dump(record)
                })
            })
            .collect();

        for handle in handles {
            let doc = handle.join().unwrap();
            assert!(doc.get_str("title").is_some());
        }
    }
}
