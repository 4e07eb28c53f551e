//! Generic documents exchanged with a document store.
//!
//! A [`Document`] is an insertion-ordered mapping from [`Key`] to [`Value`]. Keys come in two
//! representations: textual keys, which is what stores hand out, and symbolic keys, which carry
//! a field identifier as-is. The two never compare equal, so a loader must be told which one to
//! look for through [`KeyMode`].
//!
//! Documents convert to and from [`bson::Document`] (the driver representation) and JSON.

use std::fmt;

use indexmap::IndexMap;
use serde_json::{Value as JsonValue, from_value, to_value};
use tracing::warn;

use crate::{error::MappingResult, value::Value};

/// A field identifier used as a document key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.0)
    }
}

/// A document key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// A string key, as produced by document stores.
    Text(String),
    /// A symbolic key carrying a field identifier.
    Symbol(Symbol),
}

impl Key {
    /// The key's name regardless of its representation.
    pub fn as_str(&self) -> &str {
        match self {
            Key::Text(name) => name,
            Key::Symbol(symbol) => symbol.as_str(),
        }
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, Key::Symbol(_))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Text(name) => f.write_str(name),
            Key::Symbol(symbol) => fmt::Display::fmt(symbol, f),
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Text(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Text(name)
    }
}

impl From<Symbol> for Key {
    fn from(symbol: Symbol) -> Self {
        Key::Symbol(symbol)
    }
}

/// Selects how field names are rendered when looking them up in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyMode {
    /// Field names are looked up as [`Key::Text`].
    #[default]
    Textual,
    /// Field names are looked up as [`Key::Symbol`].
    Symbolic,
}

impl KeyMode {
    /// Renders a field name as a key in this mode.
    pub fn key(self, field: &str) -> Key {
        match self {
            KeyMode::Textual => Key::Text(field.to_string()),
            KeyMode::Symbolic => Key::Symbol(Symbol::new(field)),
        }
    }
}

/// An insertion-ordered, loosely-typed key/value document.
///
/// # Example
///
/// ```ignore
/// use docmap::document::Document;
///
/// let doc: Document = [("title", "Draft"), ("state", "open")].into_iter().collect();
/// assert_eq!(doc.get_str("title").and_then(|v| v.as_str()), Some("Draft"));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    entries: IndexMap<Key, Value>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts a value, returning the one previously stored under the key.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Looks up a textual key.
    pub fn get_str(&self, key: &str) -> Option<&Value> {
        self.entries.get(&Key::Text(key.to_string()))
    }

    pub fn contains_key(&self, key: &Key) -> bool {
        self.entries.contains_key(key)
    }

    /// Removes a key, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &Key) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.entries.iter()
    }

    /// Converts into the BSON representation handed to document-store drivers.
    ///
    /// Symbolic keys are written under their name. When a textual and a symbolic key share a
    /// name, the later entry wins and a warning is logged.
    pub fn to_bson(&self) -> bson::Document {
        let mut doc = bson::Document::new();
        for (key, value) in &self.entries {
            if doc.insert(key.as_str(), bson::Bson::from(value.clone())).is_some() {
                warn!(key = key.as_str(), "document keys collide when rendered to BSON");
            }
        }
        doc
    }

    /// Builds a document from its BSON representation. Every key becomes textual.
    pub fn from_bson(doc: bson::Document) -> Self {
        doc.into_iter()
            .map(|(key, value)| (Key::Text(key), Value::from(value)))
            .collect()
    }

    /// Converts this document to JSON (extended JSON for opaque BSON types).
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> MappingResult<JsonValue> {
        Ok(to_value(self.to_bson())?)
    }

    /// Creates a document from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not an object or cannot be read as BSON.
    pub fn from_json(value: JsonValue) -> MappingResult<Self> {
        let doc: bson::Document = from_value(value)?;
        Ok(Self::from_bson(doc))
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl IntoIterator for Document {
    type Item = (Key, Value);
    type IntoIter = indexmap::map::IntoIter<Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = (&'a Key, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use bson::{Bson, doc, oid::ObjectId};
    use serde_json::json;

    use super::*;

    #[test]
    fn textual_and_symbolic_keys_are_distinct() {
        let mut doc = Document::new();
        doc.insert("name", "text");
        doc.insert(Symbol::new("name"), "symbol");

        assert_eq!(doc.len(), 2);
        assert_eq!(doc.get(&KeyMode::Textual.key("name")), Some(&Value::from("text")));
        assert_eq!(doc.get(&KeyMode::Symbolic.key("name")), Some(&Value::from("symbol")));
    }

    #[test]
    fn remove_keeps_order() {
        let mut doc: Document = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        doc.remove(&Key::from("b"));

        let keys: Vec<_> = doc.keys().map(Key::as_str).collect();
        assert_eq!(keys, ["a", "c"]);
    }

    #[test]
    fn bson_conversion_preserves_nesting() {
        let id = ObjectId::new();
        let source = doc! {
            "_id": id,
            "title": "Card",
            "tags": ["a", "b"],
            "label": { "name": "warning", "count": 2_i32 },
        };

        let doc = Document::from_bson(source);
        assert_eq!(doc.get_str("_id"), Some(&Value::ObjectId(id)));
        let label = doc.get_str("label").and_then(Value::as_document).unwrap();
        assert_eq!(label.get_str("count"), Some(&Value::Int32(2)));

        let back = doc.to_bson();
        assert_eq!(back.get("title"), Some(&Bson::String("Card".into())));
        assert_eq!(back.get_array("tags").unwrap().len(), 2);
    }

    #[test]
    fn symbolic_keys_render_as_text_in_bson() {
        let doc: Document = [(Symbol::new("title"), "Card")].into_iter().collect();
        assert_eq!(doc.to_bson(), doc! { "title": "Card" });
    }

    #[test]
    fn colliding_keys_keep_the_later_entry_in_bson() {
        let mut doc = Document::new();
        doc.insert("title", "text");
        doc.insert(Symbol::new("title"), "symbol");

        let bson = doc.to_bson();
        assert_eq!(doc.len(), 2);
        assert_eq!(bson, doc! { "title": "symbol" });
    }

    #[test]
    fn json_round_trip() {
        let doc = Document::from_json(json!({ "title": "Card", "done": false })).unwrap();
        assert_eq!(doc.get_str("done"), Some(&Value::Bool(false)));
        assert_eq!(doc.to_json().unwrap(), json!({ "title": "Card", "done": false }));
    }

    #[test]
    fn from_json_rejects_non_objects() {
        assert!(Document::from_json(json!([1, 2])).is_err());
    }
}
