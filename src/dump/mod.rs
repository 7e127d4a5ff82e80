// Raw dump buffer handling

pub mod raw_dump;

pub use raw_dump::{DumpError, RawDump};
