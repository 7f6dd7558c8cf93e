//! Wire encoder.
//!
//! Total size is computed bottom-up first, a buffer of exactly that size is
//! reserved once, then fields are written front-to-back in ascending
//! field-number order. Nested message sizes are computed depth-first before
//! their length prefix is written, so no resizing or second pass is needed.

use protowire_buffers::Writer;

use crate::error::WireError;
use crate::record::{Record, Value};
use crate::schema::{FieldKind, FieldSchema, MessageSchema};
use crate::size::encoded_size;
use crate::varint::{write_varint, zigzag_encode};
use crate::wire::make_tag;

/// Schema-driven wire encoder.
///
/// The writer's allocation is retained across calls, so a long-lived encoder
/// amortizes buffer growth.
pub struct Encoder {
    pub writer: Writer,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
        }
    }

    /// Encodes `record` under `schema` into a fresh byte buffer.
    ///
    /// Zero-valued singular scalars are omitted; present message fields are
    /// emitted even when empty; repeated fields emit one tag-prefixed entry
    /// per element; the unknown tail is appended verbatim after the known
    /// fields. A failing nested encode propagates its error unchanged and no
    /// partial buffer is returned.
    pub fn encode(
        &mut self,
        schema: &MessageSchema,
        record: &Record,
    ) -> Result<Vec<u8>, WireError> {
        let size = encoded_size(schema, record)?;
        self.writer.reset();
        self.writer.reserve(size);
        self.write_record(schema, record)?;
        let bytes = self.writer.flush();
        debug_assert_eq!(bytes.len(), size, "size calculator diverged from encoder");
        Ok(bytes)
    }

    fn write_record(
        &mut self,
        schema: &MessageSchema,
        record: &Record,
    ) -> Result<(), WireError> {
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
                    self.write_element(field, item)?;
                }
            } else if !value.is_default() {
                self.write_element(field, value)?;
            }
        }
        self.writer.buf(&record.unknown);
        Ok(())
    }

    fn write_element(&mut self, field: &FieldSchema, value: &Value) -> Result<(), WireError> {
        write_varint(
            &mut self.writer,
            make_tag(field.number, field.kind.wire_type()),
        );
        match (&field.kind, value) {
            (FieldKind::Bool, Value::Bool(b)) => self.writer.u8(*b as u8),
            (FieldKind::Uint64, Value::Uint64(v)) => write_varint(&mut self.writer, *v),
            (FieldKind::Sint64, Value::Sint64(v)) => {
                write_varint(&mut self.writer, zigzag_encode(*v))
            }
            (FieldKind::Fixed32, Value::Fixed32(v)) => self.writer.u32_le(*v),
            (FieldKind::Fixed64, Value::Fixed64(v)) => self.writer.u64_le(*v),
            (FieldKind::Str, Value::Str(s)) => {
                write_varint(&mut self.writer, s.len() as u64);
                self.writer.buf(s.as_bytes());
            }
            (FieldKind::Bytes, Value::Bytes(b)) => {
                write_varint(&mut self.writer, b.len() as u64);
                self.writer.buf(b);
            }
            (FieldKind::Message(sub), Value::Message(nested)) => {
                let len = encoded_size(sub, nested)?;
                write_varint(&mut self.writer, len as u64);
                self.write_record(sub, nested)?;
            }
            _ => {
                return Err(WireError::ValueKindMismatch {
                    field: field.name.clone(),
                })
            }
        }
        Ok(())
    }
}

/// Encodes a record under a schema. Convenience wrapper over [`Encoder`].
pub fn encode(schema: &MessageSchema, record: &Record) -> Result<Vec<u8>, WireError> {
    Encoder::new().encode(schema, record)
}
