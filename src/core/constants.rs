// Constants fixed by the monitor's dump format and serial protocol

use std::ops::Range;

/// Offset of the ASCII-hex header window within a dump
pub const HEADER_START: usize = 3;

/// Offset of the first cycle record; also the end of the header window
pub const FIRST_RECORD: usize = 33;

/// Stride between consecutive cycle records
pub const RECORD_LENGTH: usize = 32;

/// Bytes captured per record window; one past the stride, so consecutive
/// windows overlap by a single byte
pub const RECORD_WINDOW: usize = RECORD_LENGTH + 1;

/// Size of the decoded header: cycle count, two reserved bytes, user id
pub const HEADER_SIZE: usize = 15;

/// Number of user-id bytes in the decoded header
pub const USER_ID_LENGTH: usize = 12;

/// Pad byte filling unused user-id positions
pub const USER_ID_PAD: u8 = 0x99;

/// Record byte range holding the ASCII timestamp digits (YYMMDDHHMM)
pub const TIMESTAMP_RANGE: Range<usize> = 0..10;

/// Record byte range holding the ASCII-hex pressure payload
pub const PRESSURE_RANGE: Range<usize> = 16..24;

/// Command that asks the monitor to stream its measurement memory
pub const DUMP_COMMAND: [u8; 4] = [0x12, 0x16, 0x18, 0x22];

/// Size of the chunks the monitor streams; a short chunk ends the dump
pub const DUMP_CHUNK_SIZE: usize = 32;

/// The monitor's fixed line speed
pub const MONITOR_BAUD_RATE: u32 = 19200;
