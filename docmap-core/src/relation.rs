//! Embedded relations and the capability seam they recurse through.
//!
//! An embedded field points at a target [`Mapper`]. Every [`Schema`] is a mapper that can both
//! load and dump; other targets (plain types, or names that never resolved to a registered
//! schema) may support only one direction or none. A [`Relation`] records its target's
//! [`Capabilities`] once, when the owning schema is built, and load/dump only consult that
//! record: a relation that cannot load or dump is skipped without error.

use std::{fmt::Debug, sync::Arc};

use crate::{document::KeyMode, schema::Schema, value::Value};

/// Which directions a relation target can map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub load: bool,
    pub dump: bool,
}

impl Capabilities {
    pub const NONE: Capabilities = Capabilities { load: false, dump: false };
    pub const FULL: Capabilities = Capabilities { load: true, dump: true };
}

/// A target that embedded values can be delegated to.
///
/// `load_value` and `dump_value` are only called when [`Mapper::capabilities`] reports the
/// corresponding direction.
pub trait Mapper: Debug + Send + Sync {
    /// Name of the mapped type, for diagnostics and type tags.
    fn type_name(&self) -> &str;

    fn capabilities(&self) -> Capabilities;

    /// Loads a sub-document (or a sequence of them, or null) into a value.
    fn load_value(&self, value: &Value, _mode: KeyMode) -> Value {
        value.clone()
    }

    /// Dumps a value produced by [`Mapper::load_value`] back into document form.
    fn dump_value(&self, value: Value) -> Value {
        value
    }
}

/// A target type without load or dump support.
#[derive(Debug, Clone)]
pub struct PlainType {
    name: String,
}

impl PlainType {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Mapper for PlainType {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::NONE
    }
}

/// How a schema definition names the target of an embedded field.
#[derive(Debug, Clone)]
pub enum EmbedTarget {
    /// An already built schema.
    Schema(Schema),
    /// A schema looked up by name in the registry at registration time.
    /// Names that do not resolve become a [`PlainType`]; the owning schema's own name embeds it
    /// recursively.
    Named(String),
    /// Any other mapper.
    Mapper(Arc<dyn Mapper>),
}

impl From<Schema> for EmbedTarget {
    fn from(schema: Schema) -> Self {
        EmbedTarget::Schema(schema)
    }
}

impl From<&Schema> for EmbedTarget {
    fn from(schema: &Schema) -> Self {
        EmbedTarget::Schema(schema.clone())
    }
}

impl From<&str> for EmbedTarget {
    fn from(name: &str) -> Self {
        EmbedTarget::Named(name.to_string())
    }
}

impl From<String> for EmbedTarget {
    fn from(name: String) -> Self {
        EmbedTarget::Named(name)
    }
}

impl From<Arc<dyn Mapper>> for EmbedTarget {
    fn from(mapper: Arc<dyn Mapper>) -> Self {
        EmbedTarget::Mapper(mapper)
    }
}

/// A resolved embedded relation.
#[derive(Debug, Clone)]
pub struct Relation {
    target: Arc<dyn Mapper>,
    capabilities: Capabilities,
}

impl Relation {
    pub(crate) fn new(target: Arc<dyn Mapper>) -> Self {
        let capabilities = target.capabilities();
        Self { target, capabilities }
    }

    pub fn target(&self) -> &dyn Mapper {
        self.target.as_ref()
    }

    pub fn target_name(&self) -> &str {
        self.target.type_name()
    }

    /// Capabilities recorded when the relation was built.
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn can_load(&self) -> bool {
        self.capabilities.load
    }

    pub fn can_dump(&self) -> bool {
        self.capabilities.dump
    }

    pub(crate) fn load(&self, value: &Value, mode: KeyMode) -> Value {
        self.target.load_value(value, mode)
    }

    pub(crate) fn dump(&self, value: Value) -> Value {
        self.target.dump_value(value)
    }
}
