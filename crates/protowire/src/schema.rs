//! Message schema — the explicit field layout driving the codec.
//!
//! A [`MessageSchema`] is the compile-time-known mapping a generated message
//! type would otherwise carry: field numbers, wire types, nesting and
//! cardinality. It is plain owned data passed by reference into the generic
//! encode/decode functions; no global registry is involved.

use crate::wire::WireType;

/// Scalar or element kind of a field. Each kind maps to exactly one
/// [`WireType`].
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// Boolean, wire type 0 with value 0 or 1.
    Bool,
    /// Unsigned varint integer.
    Uint64,
    /// Signed integer, zigzag-mapped before varint encoding.
    Sint64,
    /// 4-byte little-endian integer.
    Fixed32,
    /// 8-byte little-endian integer.
    Fixed64,
    /// UTF-8 string, length-delimited.
    Str,
    /// Raw byte sequence, length-delimited.
    Bytes,
    /// Nested message with its own schema, length-delimited.
    Message(MessageSchema),
}

impl FieldKind {
    /// Returns the wire type this kind is framed with.
    pub fn wire_type(&self) -> WireType {
        match self {
            FieldKind::Bool | FieldKind::Uint64 | FieldKind::Sint64 => WireType::Varint,
            FieldKind::Fixed64 => WireType::Fixed64,
            FieldKind::Fixed32 => WireType::Fixed32,
            FieldKind::Str | FieldKind::Bytes | FieldKind::Message(_) => {
                WireType::LengthDelimited
            }
        }
    }
}

/// A single field descriptor: stable number, name, kind and cardinality.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    /// Stable small positive integer identifying the field across versions.
    pub number: u32,
    /// Field name, used in error messages.
    pub name: String,
    /// Scalar/element kind.
    pub kind: FieldKind,
    /// Repeated fields accumulate one element per wire entry.
    pub repeated: bool,
}

impl FieldSchema {
    /// Creates a singular field descriptor.
    pub fn new(number: u32, name: &str, kind: FieldKind) -> Self {
        Self {
            number,
            name: name.to_owned(),
            kind,
            repeated: false,
        }
    }

    /// Creates a repeated field descriptor.
    pub fn repeated(number: u32, name: &str, kind: FieldKind) -> Self {
        Self {
            number,
            name: name.to_owned(),
            kind,
            repeated: true,
        }
    }
}

/// Named, ordered set of field descriptors for one message type.
///
/// Fields are kept sorted by field number; the encoder walks them in that
/// order and the decoder looks them up by number. Field numbers must be
/// positive and unique within a message — backward compatibility of the wire
/// format depends on them never being reordered across versions.
#[derive(Debug, Clone)]
pub struct MessageSchema {
    /// Message type name, used in diagnostics.
    pub name: String,
    fields: Vec<FieldSchema>,
}

impl MessageSchema {
    /// Creates a schema from field descriptors, sorting them by number.
    ///
    /// A zero or duplicate field number is a schema-construction bug and is
    /// caught by a debug assertion.
    pub fn new(name: &str, mut fields: Vec<FieldSchema>) -> Self {
        fields.sort_by_key(|field| field.number);
        debug_assert!(
            fields.iter().all(|field| field.number > 0),
            "field numbers must be positive"
        );
        debug_assert!(
            fields.windows(2).all(|pair| pair[0].number < pair[1].number),
            "field numbers must be unique"
        );
        Self {
            name: name.to_owned(),
            fields,
        }
    }

    /// Returns the field descriptors in ascending field-number order.
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Looks up a field descriptor by number.
    pub fn field(&self, number: u32) -> Option<&FieldSchema> {
        self.fields
            .binary_search_by_key(&number, |field| field.number)
            .ok()
            .map(|index| &self.fields[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_number() {
        let schema = MessageSchema::new(
            "Test",
            vec![
                FieldSchema::new(3, "c", FieldKind::Bool),
                FieldSchema::new(1, "a", FieldKind::Uint64),
            ],
        );
        assert_eq!(schema.field(1).unwrap().name, "a");
        assert_eq!(schema.field(3).unwrap().name, "c");
        assert!(schema.field(2).is_none());
        // Sorted regardless of construction order.
        assert_eq!(schema.fields()[0].number, 1);
    }

    #[test]
    fn kind_wire_types() {
        assert_eq!(FieldKind::Bool.wire_type(), WireType::Varint);
        assert_eq!(FieldKind::Sint64.wire_type(), WireType::Varint);
        assert_eq!(FieldKind::Fixed64.wire_type(), WireType::Fixed64);
        assert_eq!(FieldKind::Fixed32.wire_type(), WireType::Fixed32);
        assert_eq!(FieldKind::Str.wire_type(), WireType::LengthDelimited);
        let nested = MessageSchema::new("Nested", vec![]);
        assert_eq!(
            FieldKind::Message(nested).wire_type(),
            WireType::LengthDelimited
        );
    }
}
