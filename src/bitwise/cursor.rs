// Bit-cursor over a big-endian bit sequence
// Keeps sub-byte field extraction explicit and auditable

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CursorError {
    #[error("read of {requested} bits at bit {position} exceeds {available} available")]
    OutOfBits {
        position: usize,
        requested: usize,
        available: usize,
    },

    #[error("reads wider than 32 bits are not supported: {0}")]
    WidthTooLarge(usize),
}

pub type Result<T> = std::result::Result<T, CursorError>;

/// Cursor over a byte slice viewed as a big-endian bit sequence.
///
/// Bit 0 is the most significant bit of byte 0. Reads advance the cursor;
/// there is no way to seek backwards.
#[derive(Debug)]
pub struct BitCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BitCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current bit position from the start of the slice
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of unread bits
    pub fn remaining(&self) -> usize {
        self.data.len() * 8 - self.pos
    }

    /// Advance the cursor without reading
    pub fn skip(&mut self, bits: usize) -> Result<()> {
        self.check_available(bits)?;
        self.pos += bits;
        Ok(())
    }

    /// Read the next @bits bits as an unsigned big-endian integer
    pub fn read(&mut self, bits: usize) -> Result<u32> {
        if bits > 32 {
            return Err(CursorError::WidthTooLarge(bits));
        }
        self.check_available(bits)?;

        let mut value: u32 = 0;
        for _ in 0..bits {
            let byte = self.data[self.pos / 8];
            let bit = (byte >> (7 - self.pos % 8)) & 1;
            value = (value << 1) | bit as u32;
            self.pos += 1;
        }

        Ok(value)
    }

    fn check_available(&self, bits: usize) -> Result<()> {
        if bits > self.remaining() {
            return Err(CursorError::OutOfBits {
                position: self.pos,
                requested: bits,
                available: self.remaining(),
            });
        }
        Ok(())
    }
}
