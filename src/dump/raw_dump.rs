// Raw dump buffer retrieved from the monitor
// Immutable once captured; all slicing is bounds-checked

use std::fmt;
use thiserror::Error;

use crate::core::constants::DUMP_CHUNK_SIZE;

#[derive(Error, Debug)]
pub enum DumpError {
    #[error("range {start}..{end} is outside the {len}-byte dump")]
    OutOfBounds {
        start: usize,
        end: usize,
        len: usize,
    },
}

pub type Result<T> = std::result::Result<T, DumpError>;

/// The monitor's measurement memory as one opaque byte buffer
#[derive(Debug, Clone, PartialEq)]
pub struct RawDump {
    data: Vec<u8>,
}

impl RawDump {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get @length bytes starting at @start, failing instead of panicking
    /// when the window runs past the end of the dump
    pub fn get(&self, start: usize, length: usize) -> Result<&[u8]> {
        let end = start + length;
        if end > self.data.len() {
            return Err(DumpError::OutOfBounds {
                start,
                end,
                len: self.data.len(),
            });
        }
        Ok(&self.data[start..end])
    }

    /// The whole buffer as a byte slice
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Hex listing of the dump, one monitor chunk per row
    pub fn printable(&self) -> String {
        hexdump(&self.data)
    }
}

impl From<Vec<u8>> for RawDump {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl From<&[u8]> for RawDump {
    fn from(data: &[u8]) -> Self {
        Self::new(data.to_vec())
    }
}

impl AsRef<[u8]> for RawDump {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Display for RawDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawDump({} bytes)", self.data.len())
    }
}

/// Format bytes as offset-prefixed hex rows with a text gutter.
///
/// Rows are one DUMP_CHUNK_SIZE wide, matching the chunks the monitor
/// streams, so a truncated transfer shows up as a single ragged last row.
fn hexdump(data: &[u8]) -> String {
    data.chunks(DUMP_CHUNK_SIZE)
        .enumerate()
        .map(|(row, chunk)| {
            let hex = chunk
                .iter()
                .map(|byte| format!("{byte:02x}"))
                .collect::<Vec<_>>()
                .join(" ");
            let text: String = chunk.iter().map(|&byte| gutter_char(byte)).collect();
            format!(
                "{:06x}: {hex:<hex_width$}  {text}\n",
                row * DUMP_CHUNK_SIZE,
                hex_width = DUMP_CHUNK_SIZE * 3 - 1,
            )
        })
        .collect()
}

/// Dumps are mostly ASCII hex text; anything else renders as a dot
fn gutter_char(byte: u8) -> char {
    if byte.is_ascii_graphic() || byte == b' ' {
        byte as char
    } else {
        '.'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creation() {
        let dump = RawDump::new(vec![1, 2, 3, 4, 5]);
        assert_eq!(dump.len(), 5);
        assert!(!dump.is_empty());

        let empty = RawDump::new(Vec::new());
        assert!(empty.is_empty());
    }

    #[test]
    fn test_get_bounds_checking() {
        let dump = RawDump::new(vec![1, 2, 3]);

        assert_eq!(dump.get(0, 3).unwrap(), &[1, 2, 3]);
        assert_eq!(dump.get(1, 2).unwrap(), &[2, 3]);
        assert_eq!(dump.get(3, 0).unwrap(), &[] as &[u8]);

        assert!(matches!(
            dump.get(2, 5),
            Err(DumpError::OutOfBounds {
                start: 2,
                end: 7,
                len: 3,
            })
        ));
        assert!(dump.get(5, 1).is_err());
    }

    #[test]
    fn test_conversions() {
        let dump: RawDump = vec![0xAA, 0xBB].into();
        assert_eq!(dump.as_bytes(), &[0xAA, 0xBB]);
        assert_eq!(dump.to_string(), "RawDump(2 bytes)");

        let borrowed = RawDump::from(&[0xCC][..]);
        assert_eq!(borrowed.as_ref(), &[0xCC]);
    }

    #[test]
    fn test_hexdump_rows_follow_chunk_size() {
        let mut data = vec![0x00, 0x01, 0x02, 0x03];
        data.extend_from_slice(b"ABC");
        data.resize(DUMP_CHUNK_SIZE + 2, 0x99);

        let listing = RawDump::new(data).printable();
        let rows: Vec<&str> = listing.lines().collect();

        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("000000: 00 01 02 03 41 42 43"));
        assert!(rows[0].contains("....ABC"));
        assert!(rows[1].starts_with(&format!("{:06x}: 99 99", DUMP_CHUNK_SIZE)));
    }

    #[test]
    fn test_gutter_char() {
        assert_eq!(gutter_char(b'A'), 'A');
        assert_eq!(gutter_char(b' '), ' ');
        assert_eq!(gutter_char(0x99), '.');
        assert_eq!(gutter_char(0x00), '.');
    }
}
