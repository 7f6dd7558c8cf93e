//! Wire type codes and tag math.

use crate::error::WireError;

/// The 3-bit wire code selecting how a field's payload is framed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WireType {
    /// LEB128 varint payload (integers, booleans, enums).
    Varint = 0,
    /// 8-byte little-endian payload.
    Fixed64 = 1,
    /// `varint(length) || length bytes` (strings, bytes, nested messages,
    /// packed repeated scalars).
    LengthDelimited = 2,
    /// Opens a group (deprecated encoding, recognized only for skipping).
    StartGroup = 3,
    /// Closes a group (deprecated encoding, recognized only for skipping).
    EndGroup = 4,
    /// 4-byte little-endian payload.
    Fixed32 = 5,
}

impl WireType {
    /// Converts a raw 3-bit wire code; 6 and 7 are not assigned.
    pub fn from_raw(raw: u8) -> Result<WireType, WireError> {
        match raw {
            0 => Ok(WireType::Varint),
            1 => Ok(WireType::Fixed64),
            2 => Ok(WireType::LengthDelimited),
            3 => Ok(WireType::StartGroup),
            4 => Ok(WireType::EndGroup),
            5 => Ok(WireType::Fixed32),
            other => Err(WireError::UnknownWireType(other)),
        }
    }
}

/// Composes a field tag: `(field_number << 3) | wire_type`.
pub fn make_tag(field_number: u32, wire_type: WireType) -> u64 {
    ((field_number as u64) << 3) | wire_type as u64
}

/// Splits a tag varint into its field number and raw wire code.
pub fn split_tag(tag: u64) -> (u64, u8) {
    (tag >> 3, (tag & 0x7) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_round_trip() {
        let tag = make_tag(5, WireType::LengthDelimited);
        assert_eq!(tag, 0x2a);
        assert_eq!(split_tag(tag), (5, 2));
    }

    #[test]
    fn from_raw_rejects_unassigned() {
        for raw in 0..=5u8 {
            assert!(WireType::from_raw(raw).is_ok());
        }
        assert_eq!(
            WireType::from_raw(6),
            Err(WireError::UnknownWireType(6))
        );
        assert_eq!(
            WireType::from_raw(7),
            Err(WireError::UnknownWireType(7))
        );
    }
}
