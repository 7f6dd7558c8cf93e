//! Schema-driven protobuf wire-format codec.
//!
//! Converts an in-memory [`Record`] into a compact byte stream and back
//! under an explicit [`MessageSchema`], tolerating unknown fields (preserved
//! verbatim in the record's unknown tail) and nested sub-messages. The wire
//! format is bit-exact protobuf: tag varints, LEB128 varints, little-endian
//! fixed32/fixed64, length-delimited payloads.
//!
//! # Example
//!
//! ```
//! use protowire::{decode, encode, FieldKind, FieldSchema, MessageSchema, Record, Value};
//!
//! let schema = MessageSchema::new(
//!     "Settings",
//!     vec![
//!         FieldSchema::new(1, "enabled", FieldKind::Bool),
//!         FieldSchema::repeated(2, "names", FieldKind::Str),
//!     ],
//! );
//!
//! let mut record = Record::new();
//! record.set(1, Value::Bool(true));
//! record.push(2, Value::Str("x".into()));
//!
//! let bytes = encode(&schema, &record).unwrap();
//! assert_eq!(decode(&schema, &bytes).unwrap(), record);
//! ```

mod decoder;
mod encoder;
mod error;
mod record;
mod schema;
mod size;
mod varint;
mod wire;

pub use decoder::{decode, skip_field, Decoder};
pub use encoder::{encode, Encoder};
pub use error::WireError;
pub use record::{Record, Value};
pub use schema::{FieldKind, FieldSchema, MessageSchema};
pub use size::encoded_size;
pub use varint::{read_varint, varint_size, write_varint, zigzag_decode, zigzag_encode};
pub use wire::{make_tag, split_tag, WireType};
