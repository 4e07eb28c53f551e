//! Schema definitions.
//!
//! A [`Schema`] describes one record type: its attributes, embedded relations, identifier
//! policy, hooks and backing collection. Schemas are built once through [`SchemaBuilder`] and
//! never change afterwards. A `Schema` is a cheap handle: clones share the same definition and
//! can be sent across threads freely.
//!
//! # Example
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
//! let card = Schema::builder("Card")
//!     .collection("cards")
//!     .field("title", TypeTag::String)
//!     .embeds_one_with_default("label", &label, DefaultValue::instance_of(&label))
//!     .build()?;
//! ```

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Weak},
};

use tracing::{debug, warn};

use crate::{
    document::KeyMode,
    error::{MappingError, MappingResult},
    field::{DefaultValue, Field, FieldKind, Generator, TypeTag},
    identifier::{DEFAULT_ID_FIELD, IdentifierProviderRef, ObjectIdProvider},
    record::Record,
    relation::{Capabilities, EmbedTarget, Mapper, PlainType, Relation},
    value::Value,
};

/// A lifecycle hook applied to whole records.
pub type Hook = Arc<dyn Fn(Record) -> Record + Send + Sync>;

/// How a schema identifies its records.
#[derive(Clone, Default)]
pub enum IdentifierPolicy {
    /// No identifier field.
    None,
    /// An `_id` field generated by the registry's identifier provider.
    #[default]
    Default,
    /// A caller-chosen field, type and generator, used verbatim.
    Custom {
        name: String,
        type_tag: TypeTag,
        generator: Generator,
    },
}

impl IdentifierPolicy {
    pub fn custom<F, V>(name: impl Into<String>, type_tag: TypeTag, generate: F) -> Self
    where
        F: Fn() -> V + Send + Sync + 'static,
        V: Into<Value>,
    {
        IdentifierPolicy::Custom {
            name: name.into(),
            type_tag,
            generator: Arc::new(move || generate().into()),
        }
    }
}

impl fmt::Debug for IdentifierPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentifierPolicy::None => f.write_str("None"),
            IdentifierPolicy::Default => f.write_str("Default"),
            IdentifierPolicy::Custom { name, type_tag, .. } => f
                .debug_struct("Custom")
                .field("name", name)
                .field("type_tag", type_tag)
                .finish_non_exhaustive(),
        }
    }
}

struct SchemaInner {
    name: String,
    collection: Option<String>,
    identifier: IdentifierPolicy,
    fields: Vec<Field>,
    index: HashMap<String, usize>,
    post_load: Option<Hook>,
    pre_dump: Option<Hook>,
}

/// An immutable record type description.
#[derive(Clone)]
pub struct Schema {
    inner: Arc<SchemaInner>,
}

impl Schema {
    /// Starts the definition of a schema named `name`.
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Name of the backing collection, if this is a top-level schema.
    pub fn collection(&self) -> Option<&str> {
        self.inner.collection.as_deref()
    }

    pub fn identifier_policy(&self) -> &IdentifierPolicy {
        &self.inner.identifier
    }

    /// The synthetic field contributed by the identifier policy.
    pub fn identifier_field(&self) -> Option<&Field> {
        self.inner.fields.iter().find(|field| field.is_identifier())
    }

    /// Every field in slot order: attributes, embedded singles, embedded collections, then the
    /// identifier.
    pub fn fields(&self) -> &[Field] {
        &self.inner.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.position(name).map(|pos| &self.inner.fields[pos])
    }

    /// Slot ordinal of a field.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.inner.index.get(name).copied()
    }

    /// Returns `true` when both handles share one definition.
    pub fn ptr_eq(&self, other: &Schema) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn apply_post_load(&self, record: Record) -> Record {
        match &self.inner.post_load {
            Some(hook) => hook(record),
            None => record,
        }
    }

    pub(crate) fn apply_pre_dump(&self, record: Record) -> Record {
        match &self.inner.pre_dump {
            Some(hook) => hook(record),
            None => record,
        }
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("name", &self.inner.name)
            .field("collection", &self.inner.collection)
            .field("identifier", &self.inner.identifier)
            .field("fields", &self.inner.fields)
            .finish_non_exhaustive()
    }
}

impl Mapper for Schema {
    fn type_name(&self) -> &str {
        self.name()
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::FULL
    }

    fn load_value(&self, value: &Value, mode: KeyMode) -> Value {
        Schema::load_value(self, value, mode)
    }

    fn dump_value(&self, value: Value) -> Value {
        Schema::dump_value(self, value)
    }
}

struct Declared<T> {
    name: String,
    kind: T,
    default: Option<DefaultValue>,
}

/// Builder for [`Schema`] definitions.
///
/// Declaration order is kept within each kind of field.
pub struct SchemaBuilder {
    name: String,
    collection: Option<String>,
    identifier: IdentifierPolicy,
    attributes: Vec<Declared<TypeTag>>,
    embeds_one: Vec<Declared<EmbedTarget>>,
    embeds_many: Vec<Declared<EmbedTarget>>,
    post_load: Option<Hook>,
    pre_dump: Option<Hook>,
}

impl SchemaBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collection: None,
            identifier: IdentifierPolicy::Default,
            attributes: Vec::new(),
            embeds_one: Vec::new(),
            embeds_many: Vec::new(),
            post_load: None,
            pre_dump: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets the backing collection name.
    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    /// Overrides the identifier policy. Defaults to [`IdentifierPolicy::Default`].
    pub fn identifier(mut self, policy: IdentifierPolicy) -> Self {
        self.identifier = policy;
        self
    }

    /// Declares an attribute without a default.
    pub fn field(mut self, name: impl Into<String>, type_tag: TypeTag) -> Self {
        self.attributes.push(Declared {
            name: name.into(),
            kind: type_tag,
            default: None,
        });
        self
    }

    /// Declares an attribute with a default provider.
    pub fn field_with_default(
        mut self,
        name: impl Into<String>,
        type_tag: TypeTag,
        default: DefaultValue,
    ) -> Self {
        self.attributes.push(Declared {
            name: name.into(),
            kind: type_tag,
            default: Some(default),
        });
        self
    }

    /// Declares a field holding zero or one record of `target`.
    pub fn embeds_one(mut self, name: impl Into<String>, target: impl Into<EmbedTarget>) -> Self {
        self.embeds_one.push(Declared {
            name: name.into(),
            kind: target.into(),
            default: None,
        });
        self
    }

    pub fn embeds_one_with_default(
        mut self,
        name: impl Into<String>,
        target: impl Into<EmbedTarget>,
        default: DefaultValue,
    ) -> Self {
        self.embeds_one.push(Declared {
            name: name.into(),
            kind: target.into(),
            default: Some(default),
        });
        self
    }

    /// Declares a field holding an ordered sequence of records of `target`.
    pub fn embeds_many(mut self, name: impl Into<String>, target: impl Into<EmbedTarget>) -> Self {
        self.embeds_many.push(Declared {
            name: name.into(),
            kind: target.into(),
            default: None,
        });
        self
    }

    pub fn embeds_many_with_default(
        mut self,
        name: impl Into<String>,
        target: impl Into<EmbedTarget>,
        default: DefaultValue,
    ) -> Self {
        self.embeds_many.push(Declared {
            name: name.into(),
            kind: target.into(),
            default: Some(default),
        });
        self
    }

    /// Sets the hook applied to every loaded record.
    pub fn post_load<F>(mut self, hook: F) -> Self
    where
        F: Fn(Record) -> Record + Send + Sync + 'static,
    {
        self.post_load = Some(Arc::new(hook));
        self
    }

    /// Sets the hook applied to every record before it is dumped.
    pub fn pre_dump<F>(mut self, hook: F) -> Self
    where
        F: Fn(Record) -> Record + Send + Sync + 'static,
    {
        self.pre_dump = Some(Arc::new(hook));
        self
    }

    /// Builds the schema with the [`ObjectIdProvider`] behind the default identifier policy.
    ///
    /// Named embed targets cannot be resolved outside a registry and are treated as plain types,
    /// except the schema's own name, which embeds the schema recursively.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::DuplicateField`] if two fields share a name.
    pub fn build(self) -> MappingResult<Schema> {
        self.build_with(Arc::new(ObjectIdProvider), |_| None)
    }

    pub(crate) fn build_with<R>(self, provider: IdentifierProviderRef, resolve: R) -> MappingResult<Schema>
    where
        R: Fn(&str) -> Option<Schema>,
    {
        let schema_name = self.name;
        let identifier_name = match &self.identifier {
            IdentifierPolicy::None => None,
            IdentifierPolicy::Default => Some(DEFAULT_ID_FIELD.to_string()),
            IdentifierPolicy::Custom { name, .. } => Some(name.clone()),
        };

        let names = self
            .attributes
            .iter()
            .map(|declared| &declared.name)
            .chain(self.embeds_one.iter().map(|declared| &declared.name))
            .chain(self.embeds_many.iter().map(|declared| &declared.name))
            .chain(identifier_name.as_ref());

        let mut index = HashMap::new();
        for (pos, name) in names.enumerate() {
            if index.insert(name.clone(), pos).is_some() {
                return Err(MappingError::DuplicateField(name.clone(), schema_name));
            }
        }

        let inner = Arc::new_cyclic(|this: &Weak<SchemaInner>| {
            let mut fields = Vec::with_capacity(index.len());

            for declared in self.attributes {
                fields.push(Field::new(declared.name, FieldKind::Attribute(declared.kind), declared.default));
            }

            for declared in self.embeds_one {
                let relation = resolve_relation(&schema_name, &declared.name, declared.kind, this, &resolve);
                fields.push(Field::new(declared.name, FieldKind::EmbedsOne(relation), declared.default));
            }

            for declared in self.embeds_many {
                let relation = resolve_relation(&schema_name, &declared.name, declared.kind, this, &resolve);
                fields.push(Field::new(declared.name, FieldKind::EmbedsMany(relation), declared.default));
            }

            match &self.identifier {
                IdentifierPolicy::None => {}
                IdentifierPolicy::Default => {
                    let type_tag = provider.type_tag();
                    let generator: Generator = Arc::new(move || provider.generate());
                    fields.push(Field::new(
                        DEFAULT_ID_FIELD,
                        FieldKind::Identifier(type_tag),
                        Some(DefaultValue::Generator(generator)),
                    ));
                }
                IdentifierPolicy::Custom { name, type_tag, generator } => {
                    fields.push(Field::new(
                        name.clone(),
                        FieldKind::Identifier(type_tag.clone()),
                        Some(DefaultValue::Generator(generator.clone())),
                    ));
                }
            }

            debug!(schema = %schema_name, fields = fields.len(), "built schema");

            SchemaInner {
                name: schema_name,
                collection: self.collection,
                identifier: self.identifier,
                fields,
                index,
                post_load: self.post_load,
                pre_dump: self.pre_dump,
            }
        });

        Ok(Schema { inner })
    }
}

/// The schema under construction, embedded in itself by name.
///
/// Held weakly so a recursive definition does not keep itself alive.
struct Recursive {
    name: String,
    inner: Weak<SchemaInner>,
}

impl Recursive {
    fn schema(&self) -> Option<Schema> {
        self.inner.upgrade().map(|inner| Schema { inner })
    }
}

impl fmt::Debug for Recursive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Recursive").field(&self.name).finish()
    }
}

impl Mapper for Recursive {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::FULL
    }

    fn load_value(&self, value: &Value, mode: KeyMode) -> Value {
        match self.schema() {
            Some(schema) => schema.load_value(value, mode),
            None => value.clone(),
        }
    }

    fn dump_value(&self, value: Value) -> Value {
        match self.schema() {
            Some(schema) => schema.dump_value(value),
            None => value,
        }
    }
}

fn resolve_relation<R>(
    schema: &str,
    field: &str,
    target: EmbedTarget,
    this: &Weak<SchemaInner>,
    resolve: &R,
) -> Relation
where
    R: Fn(&str) -> Option<Schema>,
{
    let mapper: Arc<dyn Mapper> = match target {
        EmbedTarget::Schema(target) => Arc::new(target),
        EmbedTarget::Mapper(mapper) => mapper,
        EmbedTarget::Named(name) if name == schema => Arc::new(Recursive {
            name,
            inner: this.clone(),
        }),
        EmbedTarget::Named(name) => match resolve(&name) {
            Some(target) => Arc::new(target),
            None => {
                warn!(
                    schema = %schema,
                    field = %field,
                    target = %name,
                    "embedded target is not a registered schema, relation will not be loaded or dumped"
                );
                Arc::new(PlainType::new(name))
            }
        },
    };

    Relation::new(mapper)
}
