//! Wire codec error type.

use protowire_buffers::BufferError;
use thiserror::Error;

/// Error type for wire-format encoding and decoding operations.
///
/// Every decode error is fatal to the whole call: the partially built record
/// is discarded and never returned. Encode errors arise only from a value
/// that does not match its schema kind and are reported before any bytes are
/// produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WireError {
    #[error("malformed varint: shift overflow")]
    MalformedVarint,
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("invalid length found during decoding")]
    InvalidLength,
    #[error("wrong wire type {wire_type} for field `{field}`")]
    WireTypeMismatch { field: String, wire_type: u8 },
    #[error("unexpected end-group tag")]
    UnexpectedEndGroup,
    #[error("illegal wire type {0}")]
    UnknownWireType(u8),
    #[error("illegal tag: field number must be positive")]
    IllegalFieldNumber,
    #[error("invalid UTF-8 in string field `{field}`")]
    InvalidUtf8 { field: String },
    #[error("value does not match schema kind for field `{field}`")]
    ValueKindMismatch { field: String },
}

impl From<BufferError> for WireError {
    fn from(_: BufferError) -> Self {
        WireError::UnexpectedEof
    }
}
