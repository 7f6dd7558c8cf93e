//! Binary buffer writer over an auto-growing buffer.

/// A binary buffer writer that appends data to an auto-growing buffer.
///
/// # Example
///
/// ```
/// use protowire_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u8(0x08);
/// writer.buf(b"abc");
/// assert_eq!(writer.flush(), vec![0x08, b'a', b'b', b'c']);
/// ```
pub struct Writer {
    /// The accumulated output bytes.
    pub bytes: Vec<u8>,
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer {
    /// Creates a new empty writer.
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Creates a writer with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    /// Clears the buffer, retaining its allocation.
    pub fn reset(&mut self) {
        self.bytes.clear();
    }

    /// Reserves capacity for at least `additional` more bytes.
    pub fn reserve(&mut self, additional: usize) {
        self.bytes.reserve(additional);
    }

    /// Returns the number of bytes written so far.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Writes a single byte.
    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.bytes.push(val);
    }

    /// Writes an unsigned 32-bit integer (little-endian).
    #[inline]
    pub fn u32_le(&mut self, val: u32) {
        self.bytes.extend_from_slice(&val.to_le_bytes());
    }

    /// Writes an unsigned 64-bit integer (little-endian).
    #[inline]
    pub fn u64_le(&mut self, val: u64) {
        self.bytes.extend_from_slice(&val.to_le_bytes());
    }

    /// Writes a byte slice.
    pub fn buf(&mut self, data: &[u8]) {
        self.bytes.extend_from_slice(data);
    }

    /// Takes the accumulated bytes, leaving the writer empty.
    pub fn flush(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8() {
        let mut writer = Writer::new();
        writer.u8(0x01);
        writer.u8(0x02);
        assert_eq!(writer.flush(), vec![0x01, 0x02]);
    }

    #[test]
    fn test_u32_le() {
        let mut writer = Writer::new();
        writer.u32_le(0x0403_0201);
        assert_eq!(writer.flush(), vec![0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn test_u64_le() {
        let mut writer = Writer::new();
        writer.u64_le(1);
        assert_eq!(writer.flush(), vec![1, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_flush_resets() {
        let mut writer = Writer::new();
        writer.buf(b"abc");
        assert_eq!(writer.flush(), b"abc".to_vec());
        assert!(writer.is_empty());
        writer.u8(0x7f);
        assert_eq!(writer.flush(), vec![0x7f]);
    }

    #[test]
    fn test_reset() {
        let mut writer = Writer::new();
        writer.buf(b"junk");
        writer.reset();
        writer.u8(0x01);
        assert_eq!(writer.flush(), vec![0x01]);
    }
}
