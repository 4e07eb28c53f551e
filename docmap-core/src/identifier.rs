//! Identifier providers for the default identifier policy.
//!
//! A schema without an explicit identifier override gets an `_id` field whose default is a
//! fresh value from the registry's [`IdentifierProvider`]. Thread-safety of generation is the
//! provider's own contract; both stock providers are lock-free.

use std::{fmt::Debug, sync::Arc};

use bson::{Uuid, oid::ObjectId};

use crate::{field::TypeTag, value::Value};

/// Field name installed by the default identifier policy.
pub const DEFAULT_ID_FIELD: &str = "_id";

/// Source of fresh opaque identifiers.
pub trait IdentifierProvider: Debug + Send + Sync {
    /// The type tag of the values this provider generates.
    fn type_tag(&self) -> TypeTag;

    /// Generates a fresh identifier.
    fn generate(&self) -> Value;
}

/// Shared handle to an identifier provider.
pub type IdentifierProviderRef = Arc<dyn IdentifierProvider>;

/// Generates BSON object ids. This is the default provider.
#[derive(Debug, Default, Clone, Copy)]
pub struct ObjectIdProvider;

impl IdentifierProvider for ObjectIdProvider {
    fn type_tag(&self) -> TypeTag {
        TypeTag::ObjectId
    }

    fn generate(&self) -> Value {
        Value::ObjectId(ObjectId::new())
    }
}

/// Generates random (v4) UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidProvider;

impl IdentifierProvider for UuidProvider {
    fn type_tag(&self) -> TypeTag {
        TypeTag::Uuid
    }

    fn generate(&self) -> Value {
        Value::Uuid(Uuid::new())
    }
}
