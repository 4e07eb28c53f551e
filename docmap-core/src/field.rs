//! Field declarations: type tags, default providers, and the per-schema field table entries.

use std::{fmt, sync::Arc};

use crate::{relation::Relation, schema::Schema, value::Value};

/// Declared type of a field.
///
/// Tags describe a field; they never reject values. The loader stores whatever the document
/// holds and only traces values the tag does not admit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeTag {
    Any,
    Bool,
    Int,
    Float,
    String,
    Date,
    DateTime,
    Time,
    ObjectId,
    Uuid,
    Map,
    Array(Box<TypeTag>),
    /// A nested record of the named schema.
    Embedded(String),
}

impl TypeTag {
    /// Shorthand for `TypeTag::Array(Box::new(inner))`.
    pub fn array_of(inner: TypeTag) -> Self {
        TypeTag::Array(Box::new(inner))
    }

    /// Returns `true` when the value fits this tag. The absence-marker fits every tag.
    pub fn admits(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) | (TypeTag::Any, _) => true,
            (TypeTag::Bool, Value::Bool(_))
            | (TypeTag::Int, Value::Int32(_) | Value::Int(_))
            | (TypeTag::Float, Value::Float(_) | Value::Int32(_) | Value::Int(_))
            | (TypeTag::String, Value::String(_))
            | (TypeTag::Date, Value::Date(_))
            | (TypeTag::DateTime, Value::DateTime(_))
            | (TypeTag::Time, Value::Time(_))
            | (TypeTag::ObjectId, Value::ObjectId(_))
            | (TypeTag::Uuid, Value::Uuid(_))
            | (TypeTag::Map, Value::Map(_))
            | (TypeTag::Embedded(_), Value::Map(_)) => true,
            (TypeTag::Embedded(name), Value::Record(record)) => record.schema_name() == name,
            (TypeTag::Array(inner), Value::Array(items)) => items.iter().all(|item| inner.admits(item)),
            _ => false,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Any => f.write_str("any"),
            TypeTag::Bool => f.write_str("bool"),
            TypeTag::Int => f.write_str("int"),
            TypeTag::Float => f.write_str("float"),
            TypeTag::String => f.write_str("string"),
            TypeTag::Date => f.write_str("date"),
            TypeTag::DateTime => f.write_str("datetime"),
            TypeTag::Time => f.write_str("time"),
            TypeTag::ObjectId => f.write_str("objectid"),
            TypeTag::Uuid => f.write_str("uuid"),
            TypeTag::Map => f.write_str("map"),
            TypeTag::Array(inner) => write!(f, "[{inner}]"),
            TypeTag::Embedded(name) => f.write_str(name),
        }
    }
}

/// A zero-argument value generator, invoked once per construction.
pub type Generator = Arc<dyn Fn() -> Value + Send + Sync>;

/// Default provider of a field.
#[derive(Clone)]
pub enum DefaultValue {
    /// Cloned verbatim into every new record.
    Literal(Value),
    /// Invoked on every construction; results are never cached.
    Generator(Generator),
}

impl DefaultValue {
    pub fn literal(value: impl Into<Value>) -> Self {
        DefaultValue::Literal(value.into())
    }

    pub fn generator<F, V>(generate: F) -> Self
    where
        F: Fn() -> V + Send + Sync + 'static,
        V: Into<Value>,
    {
        DefaultValue::Generator(Arc::new(move || generate().into()))
    }

    /// Defaults to a fresh record of `schema`, built with its own defaults.
    pub fn instance_of(schema: &Schema) -> Self {
        let schema = schema.clone();
        DefaultValue::Generator(Arc::new(move || Value::Record(schema.new_record())))
    }

    /// Produces the default: a clone of the literal or one generator invocation.
    pub fn produce(&self) -> Value {
        match self {
            DefaultValue::Literal(value) => value.clone(),
            DefaultValue::Generator(generate) => generate(),
        }
    }

    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            DefaultValue::Literal(value) => Some(value),
            DefaultValue::Generator(_) => None,
        }
    }
}

impl From<Value> for DefaultValue {
    fn from(value: Value) -> Self {
        DefaultValue::Literal(value)
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            DefaultValue::Generator(_) => f.write_str("Generator(..)"),
        }
    }
}

/// What a field holds.
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// A plain attribute, stored verbatim.
    Attribute(TypeTag),
    /// Zero or one nested record.
    EmbedsOne(Relation),
    /// An ordered sequence of nested records.
    EmbedsMany(Relation),
    /// The synthetic field contributed by the identifier policy.
    Identifier(TypeTag),
}

/// One entry of a schema's field table.
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    kind: FieldKind,
    default: Option<DefaultValue>,
}

impl Field {
    pub(crate) fn new(name: impl Into<String>, kind: FieldKind, default: Option<DefaultValue>) -> Self {
        Self {
            name: name.into(),
            kind,
            default,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn default(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }

    /// The relation of an embedded field.
    pub fn relation(&self) -> Option<&Relation> {
        match &self.kind {
            FieldKind::EmbedsOne(relation) | FieldKind::EmbedsMany(relation) => Some(relation),
            FieldKind::Attribute(_) | FieldKind::Identifier(_) => None,
        }
    }

    pub fn is_identifier(&self) -> bool {
        matches!(self.kind, FieldKind::Identifier(_))
    }

    /// The declared type, with embedded fields described by their target.
    pub fn type_tag(&self) -> TypeTag {
        match &self.kind {
            FieldKind::Attribute(tag) | FieldKind::Identifier(tag) => tag.clone(),
            FieldKind::EmbedsOne(relation) => TypeTag::Embedded(relation.target_name().to_string()),
            FieldKind::EmbedsMany(relation) => {
                TypeTag::array_of(TypeTag::Embedded(relation.target_name().to_string()))
            }
        }
    }

    /// Value of a freshly constructed record: the produced default, or null.
    pub(crate) fn initial_value(&self) -> Value {
        self.default.as_ref().map(DefaultValue::produce).unwrap_or_default()
    }

    /// Value a field keeps when a document does not populate it: the literal default, or null.
    /// Generators never run here.
    pub(crate) fn structural_default(&self) -> Value {
        self.default
            .as_ref()
            .and_then(DefaultValue::as_literal)
            .cloned()
            .unwrap_or_default()
    }
}
