//! Record to document dumping.

use crate::{
    document::Document,
    normalize::Normalizer,
    record::Record,
    schema::Schema,
    value::Value,
};

impl Schema {
    /// Dumps a record into a storable document.
    ///
    /// Embedded relations that can dump are replaced by their dumped form, the pre-dump hook
    /// runs, and the result is normalized: nested records become documents and null entries are
    /// dropped at every depth. Relations that cannot dump are passed through unchanged.
    pub fn dump(&self, record: Record) -> Document {
        let mut record = record;

        for field in self.fields() {
            let Some(relation) = field.relation() else {
                continue;
            };
            if relation.can_dump() {
                record.update(field.name(), |value| relation.dump(value));
            }
        }

        Normalizer::normalize_record(self.apply_pre_dump(record))
    }

    /// Dumps a list of records, keeping their order.
    pub fn dump_many(&self, records: Vec<Record>) -> Vec<Document> {
        records.into_iter().map(|record| self.dump(record)).collect()
    }

    /// Dumps any value held where a record of this schema is expected.
    ///
    /// - null dumps as null
    /// - a sequence dumps element-wise
    /// - a record dumps as a document
    /// - anything else is returned as-is
    pub fn dump_value(&self, value: Value) -> Value {
        match value {
            Value::Null => Value::Null,
            Value::Record(record) => Value::Map(self.dump(record)),
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(|item| self.dump_value(item))
                    .collect(),
            ),
            other => other,
        }
    }
}
