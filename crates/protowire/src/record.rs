//! Record — the in-memory value a schema describes.

use std::collections::BTreeMap;

/// A decoded or assignable field value.
///
/// Repeated fields hold a [`Value::Repeated`] slot whose elements are
/// homogeneous per the field's schema kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Uint64(u64),
    Sint64(i64),
    Fixed32(u32),
    Fixed64(u64),
    Str(String),
    Bytes(Vec<u8>),
    Message(Record),
    Repeated(Vec<Value>),
}

impl Value {
    /// Whether this value is the proto3 implicit-presence default.
    ///
    /// Message values are never default: presence of the slot itself means
    /// the field is set, even when every nested sub-field is default.
    pub fn is_default(&self) -> bool {
        match self {
            Value::Bool(b) => !b,
            Value::Uint64(v) => *v == 0,
            Value::Sint64(v) => *v == 0,
            Value::Fixed32(v) => *v == 0,
            Value::Fixed64(v) => *v == 0,
            Value::Str(s) => s.is_empty(),
            Value::Bytes(b) => b.is_empty(),
            Value::Message(_) => false,
            Value::Repeated(items) => items.is_empty(),
        }
    }
}

/// An ordered set of field values keyed by field number, plus the raw bytes
/// of any fields the schema did not recognize.
///
/// A record starts empty (every field at its default, unknown tail empty) and
/// is populated either by [`set`](Record::set)/[`push`](Record::push) or by
/// decoding a buffer. Serialization never mutates the record.
///
/// The `unknown` tail is preserved verbatim and re-emitted after the known
/// fields on re-encode, so round-tripping through an older schema does not
/// silently drop data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: BTreeMap<u32, Value>,
    /// Raw bytes of unrecognized fields, appended in wire order.
    pub unknown: Vec<u8>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a field, replacing any previous value.
    pub fn set(&mut self, number: u32, value: Value) {
        self.fields.insert(number, value);
    }

    /// Appends an element to a repeated field, creating the slot on first
    /// use. Any existing non-repeated value under the number is replaced.
    pub fn push(&mut self, number: u32, value: Value) {
        match self.fields.get_mut(&number) {
            Some(Value::Repeated(items)) => items.push(value),
            _ => {
                self.fields.insert(number, Value::Repeated(vec![value]));
            }
        }
    }

    /// Removes a field, returning its previous value.
    pub fn remove(&mut self, number: u32) -> Option<Value> {
        self.fields.remove(&number)
    }

    /// Returns the value of a field, if set.
    pub fn get(&self, number: u32) -> Option<&Value> {
        self.fields.get(&number)
    }

    /// Returns a mutable reference to the value of a field, if set.
    pub fn get_mut(&mut self, number: u32) -> Option<&mut Value> {
        self.fields.get_mut(&number)
    }

    /// Iterates over set fields in ascending field-number order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Value)> {
        self.fields.iter().map(|(number, value)| (*number, value))
    }

    /// True when no field is set and the unknown tail is empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.unknown.is_empty()
    }

    // ------------------------------------------------------ typed accessors
    //
    // Absent fields read as their proto3 default.

    pub fn get_bool(&self, number: u32) -> bool {
        matches!(self.get(number), Some(Value::Bool(true)))
    }

    pub fn get_uint64(&self, number: u32) -> u64 {
        match self.get(number) {
            Some(Value::Uint64(v)) => *v,
            _ => 0,
        }
    }

    pub fn get_sint64(&self, number: u32) -> i64 {
        match self.get(number) {
            Some(Value::Sint64(v)) => *v,
            _ => 0,
        }
    }

    pub fn get_fixed32(&self, number: u32) -> u32 {
        match self.get(number) {
            Some(Value::Fixed32(v)) => *v,
            _ => 0,
        }
    }

    pub fn get_fixed64(&self, number: u32) -> u64 {
        match self.get(number) {
            Some(Value::Fixed64(v)) => *v,
            _ => 0,
        }
    }

    pub fn get_str(&self, number: u32) -> &str {
        match self.get(number) {
            Some(Value::Str(s)) => s,
            _ => "",
        }
    }

    pub fn get_bytes(&self, number: u32) -> &[u8] {
        match self.get(number) {
            Some(Value::Bytes(b)) => b,
            _ => &[],
        }
    }

    pub fn get_message(&self, number: u32) -> Option<&Record> {
        match self.get(number) {
            Some(Value::Message(record)) => Some(record),
            _ => None,
        }
    }

    pub fn get_repeated(&self, number: u32) -> &[Value] {
        match self.get(number) {
            Some(Value::Repeated(items)) => items,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_for_absent_fields() {
        let record = Record::new();
        assert!(!record.get_bool(1));
        assert_eq!(record.get_uint64(2), 0);
        assert_eq!(record.get_str(3), "");
        assert_eq!(record.get_bytes(4), b"");
        assert!(record.get_message(5).is_none());
        assert!(record.get_repeated(6).is_empty());
        assert!(record.is_empty());
    }

    #[test]
    fn set_overwrites() {
        let mut record = Record::new();
        record.set(1, Value::Uint64(7));
        record.set(1, Value::Uint64(9));
        assert_eq!(record.get_uint64(1), 9);
    }

    #[test]
    fn push_accumulates() {
        let mut record = Record::new();
        record.push(2, Value::Str("x".into()));
        record.push(2, Value::Str("yy".into()));
        assert_eq!(
            record.get_repeated(2),
            &[Value::Str("x".into()), Value::Str("yy".into())]
        );
    }

    #[test]
    fn value_defaults() {
        assert!(Value::Bool(false).is_default());
        assert!(!Value::Bool(true).is_default());
        assert!(Value::Uint64(0).is_default());
        assert!(Value::Str(String::new()).is_default());
        assert!(!Value::Str("a".into()).is_default());
        // An empty-but-present nested message is not a default.
        assert!(!Value::Message(Record::new()).is_default());
    }
}
