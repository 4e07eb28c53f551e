//! Construction of fresh records with schema defaults.

use crate::{field::Field, record::Record, schema::Schema};

impl Schema {
    /// Builds a new record populated with this schema's defaults.
    ///
    /// Literal defaults are cloned, generator defaults (including the identifier generator) are
    /// invoked once per field on every call, and fields without a default are null.
    pub fn new_record(&self) -> Record {
        let slots = self.fields().iter().map(Field::initial_value).collect();
        Record::from_slots(self.clone(), slots)
    }

    /// Builds `count` independent records; generators run for each of them.
    pub fn new_records(&self, count: usize) -> Vec<Record> {
        (0..count).map(|_| self.new_record()).collect()
    }
}
