//! Size calculator.
//!
//! Mirrors the encoder's field-inclusion rules exactly; any divergence
//! between the two is a buffer-sizing defect.

use crate::error::WireError;
use crate::record::{Record, Value};
use crate::schema::{FieldKind, FieldSchema, MessageSchema};
use crate::varint::{varint_size, zigzag_encode};
use crate::wire::make_tag;

/// Returns the exact number of bytes [`encode`](crate::encode) will produce
/// for `record` under `schema`.
///
/// Zero-valued singular scalars contribute nothing; a present message field
/// always contributes its envelope, even when the nested record is empty;
/// repeated fields contribute one tag-prefixed entry per element; the
/// unknown tail contributes its raw length.
pub fn encoded_size(schema: &MessageSchema, record: &Record) -> Result<usize, WireError> {
    let mut n = 0;
    for field in schema.fields() {
        let Some(value) = record.get(field.number) else {
            continue;
        };
        if field.repeated {
            let Value::Repeated(items) = value else {
                return Err(WireError::ValueKindMismatch {
                    field: field.name.clone(),
                });
            };
            for item in items {
                n += element_size(field, item)?;
            }
        } else if !value.is_default() {
            n += element_size(field, value)?;
        }
    }
    Ok(n + record.unknown.len())
}

/// Size of one tag-prefixed wire entry, with no default-omission applied —
/// repeated elements are emitted even when zero-valued.
pub(crate) fn element_size(field: &FieldSchema, value: &Value) -> Result<usize, WireError> {
    let tag = varint_size(make_tag(field.number, field.kind.wire_type()));
    match (&field.kind, value) {
        (FieldKind::Bool, Value::Bool(_)) => Ok(tag + 1),
        (FieldKind::Uint64, Value::Uint64(v)) => Ok(tag + varint_size(*v)),
        (FieldKind::Sint64, Value::Sint64(v)) => Ok(tag + varint_size(zigzag_encode(*v))),
        (FieldKind::Fixed32, Value::Fixed32(_)) => Ok(tag + 4),
        (FieldKind::Fixed64, Value::Fixed64(_)) => Ok(tag + 8),
        (FieldKind::Str, Value::Str(s)) => {
            Ok(tag + varint_size(s.len() as u64) + s.len())
        }
        (FieldKind::Bytes, Value::Bytes(b)) => {
            Ok(tag + varint_size(b.len() as u64) + b.len())
        }
        (FieldKind::Message(sub), Value::Message(nested)) => {
            let len = encoded_size(sub, nested)?;
            Ok(tag + varint_size(len as u64) + len)
        }
        _ => Err(WireError::ValueKindMismatch {
            field: field.name.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> MessageSchema {
        MessageSchema::new(
            "Test",
            vec![
                FieldSchema::new(1, "flag", FieldKind::Bool),
                FieldSchema::new(2, "count", FieldKind::Uint64),
                FieldSchema::new(3, "label", FieldKind::Str),
                FieldSchema::repeated(4, "tags", FieldKind::Str),
                FieldSchema::new(
                    5,
                    "inner",
                    FieldKind::Message(MessageSchema::new("Inner", vec![])),
                ),
            ],
        )
    }

    #[test]
    fn empty_record_is_zero_bytes() {
        assert_eq!(encoded_size(&schema(), &Record::new()), Ok(0));
    }

    #[test]
    fn default_scalars_are_omitted() {
        let mut record = Record::new();
        record.set(1, Value::Bool(false));
        record.set(2, Value::Uint64(0));
        record.set(3, Value::Str(String::new()));
        assert_eq!(encoded_size(&schema(), &record), Ok(0));
    }

    #[test]
    fn non_default_scalars_are_counted() {
        let mut record = Record::new();
        record.set(1, Value::Bool(true)); // tag + 1
        record.set(2, Value::Uint64(300)); // tag + 2
        record.set(3, Value::Str("abc".into())); // tag + 1 + 3
        assert_eq!(encoded_size(&schema(), &record), Ok(2 + 3 + 5));
    }

    #[test]
    fn empty_present_message_costs_its_envelope() {
        let mut record = Record::new();
        record.set(5, Value::Message(Record::new()));
        assert_eq!(encoded_size(&schema(), &record), Ok(2));
    }

    #[test]
    fn repeated_elements_counted_even_when_empty() {
        let mut record = Record::new();
        record.push(4, Value::Str(String::new()));
        record.push(4, Value::Str("yy".into()));
        // Each entry: tag(1) + len(1) + payload.
        assert_eq!(encoded_size(&schema(), &record), Ok(2 + 4));
    }

    #[test]
    fn unknown_tail_is_counted() {
        let mut record = Record::new();
        record.unknown = vec![0x38, 0x01];
        assert_eq!(encoded_size(&schema(), &record), Ok(2));
    }

    #[test]
    fn kind_mismatch_is_an_error() {
        let mut record = Record::new();
        record.set(1, Value::Str("not a bool".into()));
        assert_eq!(
            encoded_size(&schema(), &record),
            Err(WireError::ValueKindMismatch {
                field: "flag".into()
            })
        );
    }
}
