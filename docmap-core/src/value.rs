//! The value model shared by documents and records.
//!
//! A [`Value`] is whatever a document field or a record slot can hold: the absence-marker
//! ([`Value::Null`]), plain scalars, opaque scalars (dates, times, identifiers and any other BSON
//! scalar), sequences, nested documents, and nested records.
//!
//! Conversions to and from [`Bson`] mark the boundary with the document-store driver.

use bson::{Binary, Bson, oid::ObjectId, spec::BinarySubtype, Uuid};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::{document::Document, record::Record};

/// A loosely-typed value held by a document field or a record slot.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// The absence-marker.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A 32-bit signed integer, kept apart so stored widths survive a round trip.
    Int32(i32),
    /// A 64-bit signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A UTF-8 string.
    String(String),
    /// A calendar date (opaque).
    Date(NaiveDate),
    /// A UTC date-time (opaque).
    DateTime(DateTime<Utc>),
    /// A time of day (opaque).
    Time(NaiveTime),
    /// A BSON object id (opaque).
    ObjectId(ObjectId),
    /// A UUID (opaque).
    Uuid(Uuid),
    /// Any other BSON scalar, carried through untouched (opaque).
    Bson(Bson),
    /// An ordered sequence.
    Array(Vec<Value>),
    /// A nested document.
    Map(Document),
    /// A nested schema-typed record.
    Record(Record),
}

impl Value {
    /// Returns `true` for the absence-marker.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` for the scalar kinds the normalizer never descends into.
    pub fn is_opaque(&self) -> bool {
        matches!(
            self,
            Value::Date(_)
                | Value::DateTime(_)
                | Value::Time(_)
                | Value::ObjectId(_)
                | Value::Uuid(_)
                | Value::Bson(_)
        )
    }

    /// A short name for the kind of value, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int32(_) => "int32",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Date(_) => "date",
            Value::DateTime(_) => "datetime",
            Value::Time(_) => "time",
            Value::ObjectId(_) => "objectid",
            Value::Uuid(_) => "uuid",
            Value::Bson(_) => "bson",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
            Value::Record(_) => "record",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Either integer width, widened to `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int32(value) => Some((*value).into()),
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(value) => Some(*value),
            Value::Int32(value) => Some((*value).into()),
            Value::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Value::Map(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Consumes the value, returning the record it holds, if any.
    pub fn into_record(self) -> Option<Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Consumes the value, returning the document it holds, if any.
    pub fn into_document(self) -> Option<Document> {
        match self {
            Value::Map(doc) => Some(doc),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int32(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Date(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::DateTime(value)
    }
}

impl From<NaiveTime> for Value {
    fn from(value: NaiveTime) -> Self {
        Value::Time(value)
    }
}

impl From<ObjectId> for Value {
    fn from(value: ObjectId) -> Self {
        Value::ObjectId(value)
    }
}

impl From<Uuid> for Value {
    fn from(value: Uuid) -> Self {
        Value::Uuid(value)
    }
}

impl From<Document> for Value {
    fn from(value: Document) -> Self {
        Value::Map(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Value::Record(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::Array(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

impl From<Bson> for Value {
    fn from(bson: Bson) -> Self {
        match bson {
            Bson::Null => Value::Null,
            Bson::Boolean(value) => Value::Bool(value),
            Bson::Int32(value) => Value::Int32(value),
            Bson::Int64(value) => Value::Int(value),
            Bson::Double(value) => Value::Float(value),
            Bson::String(value) => Value::String(value),
            Bson::DateTime(value) => Value::DateTime(value.to_chrono()),
            Bson::ObjectId(value) => Value::ObjectId(value),
            Bson::Binary(binary) if binary.subtype == BinarySubtype::Uuid => {
                match <[u8; 16]>::try_from(binary.bytes.as_slice()) {
                    Ok(bytes) => Value::Uuid(Uuid::from_bytes(bytes)),
                    Err(_) => Value::Bson(Bson::Binary(binary)),
                }
            }
            Bson::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Bson::Document(doc) => Value::Map(Document::from_bson(doc)),
            other => Value::Bson(other),
        }
    }
}

impl From<Value> for Bson {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Bson::Null,
            Value::Bool(value) => Bson::Boolean(value),
            Value::Int32(value) => Bson::Int32(value),
            Value::Int(value) => Bson::Int64(value),
            Value::Float(value) => Bson::Double(value),
            Value::String(value) => Bson::String(value),
            Value::Date(value) => Bson::String(value.to_string()),
            Value::DateTime(value) => Bson::DateTime(bson::DateTime::from_chrono(value)),
            Value::Time(value) => Bson::String(value.to_string()),
            Value::ObjectId(value) => Bson::ObjectId(value),
            Value::Uuid(value) => Bson::Binary(Binary {
                subtype: BinarySubtype::Uuid,
                bytes: value.bytes().to_vec(),
            }),
            Value::Bson(value) => value,
            Value::Array(items) => Bson::Array(items.into_iter().map(Bson::from).collect()),
            Value::Map(doc) => Bson::Document(doc.to_bson()),
            Value::Record(record) => Bson::Document(record.into_document().to_bson()),
        }
    }
}
