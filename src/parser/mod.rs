// Dump parsing: header window and cycle records

pub mod header;
pub mod record;

use crate::store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    #[error("record {index}: window {start}..{end} is outside the {len}-byte dump")]
    TruncatedRecord {
        index: usize,
        start: usize,
        end: usize,
        len: usize,
    },

    #[error("record {index} is malformed: {reason}")]
    MalformedRecord { index: usize, reason: String },

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, ParseError>;

pub use header::{parse_header, Header};
pub use record::RecordDecoder;
