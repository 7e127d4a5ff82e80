// BPMON-RS: memory reader and decoder for a serial blood-pressure monitor
// Copyright 2024 - Licensed under MIT

pub mod bitwise;
pub mod core;
pub mod dump;
pub mod parser;
pub mod serial;
pub mod store;

// Re-export commonly used types
pub use bitwise::BitCursor;
pub use crate::core::{constants::*, measurement::Measurement};
pub use dump::RawDump;
pub use parser::{parse_header, Header, ParseError, RecordDecoder};
pub use serial::{DumpProtocol, SerialConfig, SerialPort};
pub use store::{MeasurementStore, MemoryStore, SqliteStore, StoreError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
