//! Document to record loading.

use tracing::trace;

use crate::{
    document::{Document, KeyMode},
    field::{Field, FieldKind},
    record::Record,
    schema::Schema,
    value::Value,
};

impl Schema {
    /// Loads a document with textual keys into a record of this schema.
    pub fn load(&self, document: &Document) -> Record {
        self.load_with(document, KeyMode::default())
    }

    /// Loads a document into a record of this schema.
    ///
    /// Attributes are copied verbatim (missing keys become null), embedded relations are loaded
    /// through their targets with the same key mode, and the post-load hook runs once on the
    /// populated record. Construction defaults are never applied: a key missing from the
    /// document loads as null. Relations whose target cannot load keep their literal default.
    pub fn load_with(&self, document: &Document, mode: KeyMode) -> Record {
        let slots = self
            .fields()
            .iter()
            .map(|field| self.load_field(field, document, mode))
            .collect();

        self.apply_post_load(Record::from_slots(self.clone(), slots))
    }

    /// Loads a list of documents with textual keys, keeping their order.
    pub fn load_many(&self, documents: &[Document]) -> Vec<Record> {
        documents.iter().map(|document| self.load(document)).collect()
    }

    /// Loads any value found where a document of this schema is expected.
    ///
    /// - null loads as null
    /// - a sequence loads element-wise
    /// - a document loads as a record
    /// - anything else is returned as-is
    pub fn load_value(&self, value: &Value, mode: KeyMode) -> Value {
        match value {
            Value::Null => Value::Null,
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.load_value(item, mode))
                    .collect(),
            ),
            Value::Map(document) => Value::Record(self.load_with(document, mode)),
            other => other.clone(),
        }
    }

    fn load_field(&self, field: &Field, document: &Document, mode: KeyMode) -> Value {
        let found = document.get(&mode.key(field.name()));

        match field.kind() {
            FieldKind::Attribute(tag) | FieldKind::Identifier(tag) => {
                let value = found.cloned().unwrap_or_default();
                if !tag.admits(&value) {
                    trace!(
                        schema = %self.name(),
                        field = %field.name(),
                        expected = %tag,
                        found = value.kind(),
                        "loading value that does not match the declared type"
                    );
                }
                value
            }
            FieldKind::EmbedsOne(relation) | FieldKind::EmbedsMany(relation) => {
                if relation.can_load() {
                    relation.load(found.unwrap_or(&Value::Null), mode)
                } else {
                    field.structural_default()
                }
            }
        }
    }
}
