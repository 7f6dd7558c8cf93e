//! LEB128 varint primitives.
//!
//! Varints are little-endian base-128: 7 payload bits per byte, continuation
//! bit in the high bit, unsigned, at most 10 bytes for a 64-bit value.

use protowire_buffers::{Reader, Writer};

use crate::error::WireError;

/// Reads a varint limited to 64 bits.
///
/// A continuation past the tenth payload shift is a [`WireError::MalformedVarint`];
/// running off the buffer mid-varint is [`WireError::UnexpectedEof`].
pub fn read_varint(reader: &mut Reader) -> Result<u64, WireError> {
    let mut value = 0u64;
    let mut shift = 0u32;
    loop {
        if shift >= 64 {
            return Err(WireError::MalformedVarint);
        }
        let byte = reader.u8()?;
        value |= ((byte & 0x7f) as u64) << shift;
        if byte < 0x80 {
            return Ok(value);
        }
        shift += 7;
    }
}

/// Writes a value as a minimal varint.
pub fn write_varint(writer: &mut Writer, mut value: u64) {
    while value >= 0x80 {
        writer.u8((value as u8 & 0x7f) | 0x80);
        value >>= 7;
    }
    writer.u8(value as u8);
}

/// Returns the minimal varint encoding length of `value`.
///
/// The `| 1` makes a value of 0 still cost one byte.
pub fn varint_size(value: u64) -> usize {
    ((64 - (value | 1).leading_zeros()) as usize + 6) / 7
}

/// Maps a signed value to its zigzag wire representation.
pub fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

/// Inverse of [`zigzag_encode`].
pub fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}
