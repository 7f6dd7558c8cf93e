//! Binary buffer reader with cursor tracking.

use crate::BufferError;

/// A binary buffer reader that reads data from a byte slice.
///
/// The reader maintains a cursor position and provides checked methods for
/// reading bytes and little-endian fixed-width integers. Every read validates
/// that the requested bytes lie within the reader's window and returns
/// [`BufferError::EndOfBuffer`] otherwise.
///
/// # Example
///
/// ```
/// use protowire_buffers::Reader;
///
/// let data = [0x01, 0x02, 0x03, 0x04, 0x05];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.u8(), Ok(0x01));
/// assert_eq!(reader.u32_le(), Ok(0x0504_0302));
/// ```
pub struct Reader<'a> {
    /// The underlying byte slice.
    pub bytes: &'a [u8],
    /// Current cursor position.
    pub x: usize,
    /// End position (exclusive).
    pub end: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader for the given byte slice.
    pub fn new(bytes: &'a [u8]) -> Self {
        let end = bytes.len();
        Self { bytes, x: 0, end }
    }

    /// Creates a reader from a slice with custom start and end positions.
    pub fn from_slice(bytes: &'a [u8], x: usize, end: usize) -> Self {
        Self { bytes, x, end }
    }

    /// Resets the reader with a new byte slice.
    pub fn reset(&mut self, bytes: &'a [u8]) {
        self.x = 0;
        self.end = bytes.len();
        self.bytes = bytes;
    }

    /// Returns the number of remaining bytes.
    pub fn remaining(&self) -> usize {
        self.end - self.x
    }

    /// Advances the cursor by the given number of bytes.
    pub fn skip(&mut self, length: usize) {
        self.x += length;
    }

    /// Returns a subarray of the given size and advances the cursor.
    pub fn buf(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        if size > self.remaining() {
            return Err(BufferError::EndOfBuffer);
        }
        let x = self.x;
        let end = x + size;
        self.x = end;
        Ok(&self.bytes[x..end])
    }

    /// Creates a new Reader over the next `size` bytes and advances the cursor.
    pub fn cut(&mut self, size: usize) -> Result<Reader<'a>, BufferError> {
        if size > self.remaining() {
            return Err(BufferError::EndOfBuffer);
        }
        let slice = Reader::from_slice(self.bytes, self.x, self.x + size);
        self.x += size;
        Ok(slice)
    }

    /// Reads an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self) -> Result<u8, BufferError> {
        if self.x >= self.end {
            return Err(BufferError::EndOfBuffer);
        }
        let val = self.bytes[self.x];
        self.x += 1;
        Ok(val)
    }

    /// Reads an unsigned 32-bit integer (little-endian).
    #[inline]
    pub fn u32_le(&mut self) -> Result<u32, BufferError> {
        if self.remaining() < 4 {
            return Err(BufferError::EndOfBuffer);
        }
        let x = self.x;
        let val = u32::from_le_bytes([
            self.bytes[x],
            self.bytes[x + 1],
            self.bytes[x + 2],
            self.bytes[x + 3],
        ]);
        self.x += 4;
        Ok(val)
    }

    /// Reads an unsigned 64-bit integer (little-endian).
    #[inline]
    pub fn u64_le(&mut self) -> Result<u64, BufferError> {
        if self.remaining() < 8 {
            return Err(BufferError::EndOfBuffer);
        }
        let x = self.x;
        let val = u64::from_le_bytes([
            self.bytes[x],
            self.bytes[x + 1],
            self.bytes[x + 2],
            self.bytes[x + 3],
            self.bytes[x + 4],
            self.bytes[x + 5],
            self.bytes[x + 6],
            self.bytes[x + 7],
        ]);
        self.x += 8;
        Ok(val)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8() {
        let data = [0x01, 0x02, 0x03];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u8(), Ok(0x01));
        assert_eq!(reader.u8(), Ok(0x02));
        assert_eq!(reader.u8(), Ok(0x03));
        assert_eq!(reader.u8(), Err(BufferError::EndOfBuffer));
    }

    #[test]
    fn test_u32_le() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u32_le(), Ok(0x0403_0201));
    }

    #[test]
    fn test_u64_le() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u64_le(), Ok(0x0807_0605_0403_0201));
    }

    #[test]
    fn test_u64_le_truncated() {
        let data = [0x01, 0x02, 0x03];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u64_le(), Err(BufferError::EndOfBuffer));
    }

    #[test]
    fn test_skip() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut reader = Reader::new(&data);
        reader.skip(2);
        assert_eq!(reader.u8(), Ok(0x03));
    }

    #[test]
    fn test_buf() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.buf(3), Ok(&data[0..3]));
        assert_eq!(reader.buf(3), Err(BufferError::EndOfBuffer));
        assert_eq!(reader.buf(2), Ok(&data[3..5]));
    }

    #[test]
    fn test_cut() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05];
        let mut reader = Reader::new(&data);
        reader.skip(1);
        let mut sub = reader.cut(2).unwrap();
        assert_eq!(sub.u8(), Ok(0x02));
        assert_eq!(sub.u8(), Ok(0x03));
        assert_eq!(sub.u8(), Err(BufferError::EndOfBuffer));
        assert_eq!(reader.u8(), Ok(0x04));
    }
}
