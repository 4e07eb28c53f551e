//! Structural normalization of value graphs into document-safe shape.
//!
//! This is the last step of every dump. Records are flattened into documents, sequences and
//! documents are walked recursively, and null entries are dropped from every mapping on the way.

use crate::{document::Document, record::Record, value::Value};

/// Converts arbitrary nested values into the shape a document store accepts.
///
/// The normalizer processes:
/// - Opaque scalars (dates, times, identifiers, raw BSON): returned as-is
/// - Records: converted field by field into documents with textual keys
/// - Arrays: normalized element-wise
/// - Documents: values normalized, then null entries removed
/// - Other scalars: returned as-is
pub struct Normalizer;

impl Normalizer {
    /// Recursively normalizes a value.
    pub fn normalize_value(value: Value) -> Value {
        match value {
            Value::Record(record) => Value::Map(Self::normalize_record(record)),
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(Self::normalize_value)
                    .collect(),
            ),
            Value::Map(doc) => Value::Map(Self::normalize_document(doc)),
            other => other,
        }
    }

    /// Flattens a record into a normalized document.
    pub fn normalize_record(record: Record) -> Document {
        Self::normalize_document(record.into_document())
    }

    /// Normalizes every value of a document and drops the entries left null.
    ///
    /// Filtering is shallow: a null inside a sequence is kept, a document nested anywhere below
    /// is filtered when it is normalized in turn.
    pub fn normalize_document(doc: Document) -> Document {
        doc.into_iter()
            .map(|(key, value)| (key, Self::normalize_value(value)))
            .filter(|(_, value)| !value.is_null())
            .collect()
    }
}
