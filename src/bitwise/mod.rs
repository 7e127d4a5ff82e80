// Bit-level decoding helpers for the monitor's packed record fields

pub mod cursor;

pub use cursor::{BitCursor, CursorError};
