//! Serde-typed models on top of records.
//!
//! A [`Model`] is an application struct bound to a registered schema by name. Conversions go
//! through BSON: a record is normalized and deserialized into the model, and a model is
//! serialized and loaded as a document. Both directions therefore run the schema's hooks like
//! any other load or dump.
//!
//! # Example
//!
//! ```ignore
//! use docmap::prelude::*;
//! use bson::oid::ObjectId;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct Card {
//!     #[serde(rename = "_id")]
//!     pub id: ObjectId,
//!     pub title: Option<String>,
//! }
//!
//! impl Model for Card {
//!     fn schema_name() -> &'static str {
//!         "Card"
//!     }
//! }
//!
//! let card: Card = registry.new_model()?;
//! let doc = registry.dump_model(&card)?;
//! ```

use bson::{Bson, de::deserialize_from_bson, ser::serialize_to_bson};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    document::Document,
    error::{MappingError, MappingResult},
    normalize::Normalizer,
    record::Record,
    registry::SchemaRegistry,
    schema::Schema,
};

/// An application type mapped through a registered schema.
pub trait Model: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Returns the name of the schema this type maps through.
    fn schema_name() -> &'static str;
}

impl Record {
    /// Deserializes this record into a typed value.
    ///
    /// Null fields are dropped first, so they read as missing (`None` for `Option` fields).
    ///
    /// # Errors
    ///
    /// Returns an error if the record does not fit `T`.
    pub fn to_model<T: DeserializeOwned>(&self) -> MappingResult<T> {
        let doc = Normalizer::normalize_record(self.clone());
        Ok(deserialize_from_bson(Bson::Document(doc.to_bson()))?)
    }
}

impl Schema {
    /// Loads a record of this schema from a serializable value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the value does not serialize to a document.
    pub fn record_from_model<T: Serialize>(&self, model: &T) -> MappingResult<Record> {
        match serialize_to_bson(model)? {
            Bson::Document(doc) => Ok(self.load(&Document::from_bson(doc))),
            other => Err(MappingError::InvalidDocument(format!(
                "{} model serialized to {:?}, expected a document",
                self.name(),
                other.element_type()
            ))),
        }
    }
}

impl SchemaRegistry {
    /// Builds a model from a new record of its schema, defaults included.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema is not registered or the record does not fit `T`.
    pub fn new_model<T: Model>(&self) -> MappingResult<T> {
        self.schema(T::schema_name())?.new_record().to_model()
    }

    /// Loads a document into a model.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema is not registered or the record does not fit `T`.
    pub fn load_model<T: Model>(&self, document: &Document) -> MappingResult<T> {
        self.schema(T::schema_name())?.load(document).to_model()
    }

    /// Dumps a model into a storable document.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema is not registered or the model cannot be serialized.
    pub fn dump_model<T: Model>(&self, model: &T) -> MappingResult<Document> {
        let schema = self.schema(T::schema_name())?;
        let record = schema.record_from_model(model)?;
        Ok(schema.dump(record))
    }
}
