//! Wire decoder and unknown-field skipper.
//!
//! Decoding is a single forward pass over the buffer: read a tag varint,
//! validate the wire type against the schema, decode the value, repeat until
//! the cursor lands exactly on the buffer end. Unrecognized field numbers are
//! skipped and their bytes accumulated verbatim into the record's unknown
//! tail. Any error aborts the whole decode; no partial record escapes.

use protowire_buffers::Reader;

use crate::error::WireError;
use crate::record::{Record, Value};
use crate::schema::{FieldKind, FieldSchema, MessageSchema};
use crate::varint::{read_varint, zigzag_decode};
use crate::wire::{split_tag, WireType};

/// Schema-driven wire decoder.
pub struct Decoder;

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    pub fn new() -> Self {
        Self
    }

    /// Decodes `bytes` under `schema` into a fresh record.
    pub fn decode(&self, schema: &MessageSchema, bytes: &[u8]) -> Result<Record, WireError> {
        let mut reader = Reader::new(bytes);
        read_record(schema, &mut reader)
    }
}

/// Decodes a buffer under a schema. Convenience wrapper over [`Decoder`].
pub fn decode(schema: &MessageSchema, bytes: &[u8]) -> Result<Record, WireError> {
    Decoder::new().decode(schema, bytes)
}

fn read_record(schema: &MessageSchema, reader: &mut Reader) -> Result<Record, WireError> {
    let mut record = Record::new();
    read_record_into(schema, reader, &mut record)?;
    Ok(record)
}

fn read_record_into(
    schema: &MessageSchema,
    reader: &mut Reader,
    record: &mut Record,
) -> Result<(), WireError> {
    while reader.remaining() > 0 {
        let tag_start = reader.x;
        let tag = read_varint(reader)?;
        let (field_number, raw_wire) = split_tag(tag);
        if field_number == 0 {
            return Err(WireError::IllegalFieldNumber);
        }
        let wire_type = WireType::from_raw(raw_wire)?;
        if wire_type == WireType::EndGroup {
            return Err(WireError::UnexpectedEndGroup);
        }
        let field = u32::try_from(field_number)
            .ok()
            .and_then(|number| schema.field(number));
        match field {
            Some(field) => read_field(field, wire_type, raw_wire, reader, record)?,
            None => {
                // Re-skip from the tag so the unknown tail carries the whole
                // field, tag bytes included.
                let bytes = reader.bytes;
                let span = &bytes[tag_start..reader.end];
                let consumed = skip_field(span)?;
                record.unknown.extend_from_slice(&span[..consumed]);
                reader.x = tag_start + consumed;
            }
        }
    }
    Ok(())
}

fn read_field(
    field: &FieldSchema,
    wire_type: WireType,
    raw_wire: u8,
    reader: &mut Reader,
    record: &mut Record,
) -> Result<(), WireError> {
    let expected = field.kind.wire_type();
    if wire_type != expected {
        // A length-delimited entry for a repeated scalar field is a packed
        // run; unpack it element by element.
        if field.repeated && wire_type == WireType::LengthDelimited {
            let len = read_length(reader)?;
            let mut packed = reader.cut(len)?;
            while packed.remaining() > 0 {
                let value = read_scalar(field, &mut packed)?;
                record.push(field.number, value);
            }
            return Ok(());
        }
        return Err(WireError::WireTypeMismatch {
            field: field.name.clone(),
            wire_type: raw_wire,
        });
    }
    // A second wire occurrence of a singular message field merges into the
    // already-decoded record rather than replacing it: later sub-fields
    // overwrite, absent ones survive, unknown tails concatenate.
    if let FieldKind::Message(sub) = &field.kind {
        if !field.repeated {
            let len = read_length(reader)?;
            let mut nested = reader.cut(len)?;
            match record.get_mut(field.number) {
                Some(Value::Message(existing)) => {
                    read_record_into(sub, &mut nested, existing)?
                }
                _ => {
                    let decoded = read_record(sub, &mut nested)?;
                    record.set(field.number, Value::Message(decoded));
                }
            }
            return Ok(());
        }
    }
    let value = read_element(field, reader)?;
    if field.repeated {
        record.push(field.number, value);
    } else {
        record.set(field.number, value);
    }
    Ok(())
}

fn read_element(field: &FieldSchema, reader: &mut Reader) -> Result<Value, WireError> {
    match &field.kind {
        FieldKind::Str => {
            let len = read_length(reader)?;
            let bytes = reader.buf(len)?;
            let s = std::str::from_utf8(bytes).map_err(|_| WireError::InvalidUtf8 {
                field: field.name.clone(),
            })?;
            Ok(Value::Str(s.to_owned()))
        }
        FieldKind::Bytes => {
            let len = read_length(reader)?;
            Ok(Value::Bytes(reader.buf(len)?.to_vec()))
        }
        FieldKind::Message(sub) => {
            let len = read_length(reader)?;
            let mut nested = reader.cut(len)?;
            Ok(Value::Message(read_record(sub, &mut nested)?))
        }
        _ => read_scalar(field, reader),
    }
}

fn read_scalar(field: &FieldSchema, reader: &mut Reader) -> Result<Value, WireError> {
    match &field.kind {
        FieldKind::Bool => Ok(Value::Bool(read_varint(reader)? != 0)),
        FieldKind::Uint64 => Ok(Value::Uint64(read_varint(reader)?)),
        FieldKind::Sint64 => Ok(Value::Sint64(zigzag_decode(read_varint(reader)?))),
        FieldKind::Fixed32 => Ok(Value::Fixed32(reader.u32_le()?)),
        FieldKind::Fixed64 => Ok(Value::Fixed64(reader.u64_le()?)),
        _ => Err(WireError::ValueKindMismatch {
            field: field.name.clone(),
        }),
    }
}

fn read_length(reader: &mut Reader) -> Result<usize, WireError> {
    let len = read_varint(reader)?;
    usize::try_from(len).map_err(|_| WireError::InvalidLength)
}

/// Consumes exactly the bytes of the field whose tag starts at `data[0]`,
/// without interpreting its content, and returns the count.
///
/// Group-encoded fields are tracked with a nesting depth counter: wire type 3
/// opens a group, wire type 4 closes one, and a close with no open group is
/// an error. Truncation anywhere inside the skipped span is an error.
pub fn skip_field(data: &[u8]) -> Result<usize, WireError> {
    let mut reader = Reader::new(data);
    let mut depth = 0u32;
    loop {
        if reader.remaining() == 0 {
            return Err(WireError::UnexpectedEof);
        }
        let tag = read_varint(&mut reader)?;
        let (_, raw_wire) = split_tag(tag);
        match WireType::from_raw(raw_wire)? {
            WireType::Varint => {
                read_varint(&mut reader)?;
            }
            WireType::Fixed64 => {
                reader.buf(8)?;
            }
            WireType::LengthDelimited => {
                let len = read_length(&mut reader)?;
                reader.buf(len)?;
            }
            WireType::StartGroup => depth += 1,
            WireType::EndGroup => {
                if depth == 0 {
                    return Err(WireError::UnexpectedEndGroup);
                }
                depth -= 1;
            }
            WireType::Fixed32 => {
                reader.buf(4)?;
            }
        }
        if depth == 0 {
            return Ok(reader.x);
        }
    }
}
