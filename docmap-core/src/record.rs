//! Schema-typed records.

use std::fmt;

use crate::{
    document::{Document, Key},
    error::{MappingError, MappingResult},
    schema::Schema,
    value::Value,
};

static NULL: Value = Value::Null;

/// An instance of a [`Schema`]: one slot per schema field, in the schema's slot order.
///
/// Records are produced by [`Schema::new_record`] and [`Schema::load`] and consumed by
/// [`Schema::dump`]. Application code copy-updates them through [`Record::with`],
/// [`Record::set`] and [`Record::take`].
#[derive(Clone)]
pub struct Record {
    schema: Schema,
    slots: Vec<Value>,
}

impl Record {
    pub(crate) fn from_slots(schema: Schema, slots: Vec<Value>) -> Self {
        debug_assert_eq!(schema.fields().len(), slots.len());
        Self { schema, slots }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn schema_name(&self) -> &str {
        self.schema.name()
    }

    /// Returns the value of a field, or `None` if the schema has no such field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.schema.position(field).map(|pos| &self.slots[pos])
    }

    /// Returns the value of a field, treating unknown fields as null.
    pub fn value(&self, field: &str) -> &Value {
        self.get(field).unwrap_or(&NULL)
    }

    /// The identifier value, if the schema has an identifier field.
    pub fn id(&self) -> Option<&Value> {
        self.schema
            .identifier_field()
            .and_then(|field| self.get(field.name()))
    }

    /// Replaces the value of a field, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::UnknownField`] if the schema has no such field.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> MappingResult<Value> {
        let pos = self
            .schema
            .position(field)
            .ok_or_else(|| MappingError::UnknownField(field.to_string(), self.schema.name().to_string()))?;

        Ok(std::mem::replace(&mut self.slots[pos], value.into()))
    }

    /// Copy-update: returns the record with one field replaced.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::UnknownField`] if the schema has no such field.
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> MappingResult<Self> {
        self.set(field, value)?;
        Ok(self)
    }

    /// Clears a field, returning its previous value, or `None` if the schema has no such field.
    pub fn take(&mut self, field: &str) -> Option<Value> {
        let pos = self.schema.position(field)?;
        Some(std::mem::take(&mut self.slots[pos]))
    }

    /// Rewrites a field in place. Returns `false` if the schema has no such field.
    pub(crate) fn update<F>(&mut self, field: &str, f: F) -> bool
    where
        F: FnOnce(Value) -> Value,
    {
        match self.schema.position(field) {
            Some(pos) => {
                let value = std::mem::take(&mut self.slots[pos]);
                self.slots[pos] = f(value);
                true
            }
            None => false,
        }
    }

    /// Iterates over `(field name, value)` pairs in slot order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.schema
            .fields()
            .iter()
            .map(|field| field.name())
            .zip(self.slots.iter())
    }

    /// Converts the record into a document with textual keys, keeping null slots.
    ///
    /// No hooks run and embedded records stay records; use [`Schema::dump`] to produce a
    /// storable document.
    pub fn into_document(self) -> Document {
        let Record { schema, slots } = self;
        schema
            .fields()
            .iter()
            .map(|field| Key::Text(field.name().to_string()))
            .zip(slots)
            .collect()
    }

    /// Dumps the record through its own schema.
    pub fn dump(self) -> Document {
        let schema = self.schema.clone();
        schema.dump(self)
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.schema.name() == other.schema.name() && self.slots == other.slots
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct(self.schema.name());
        for (name, value) in self.fields() {
            out.field(name, value);
        }
        out.finish()
    }
}
