// Measurement persistence keyed by content hash

pub mod memory;
pub mod sqlite;

use crate::core::Measurement;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("measurement {0} is already stored")]
    Duplicate(String),

    #[error("invalid stored datetime '{0}'")]
    InvalidDatetime(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Store of decoded measurements, keyed by content hash.
///
/// The decoder performs check-then-insert per record; `insert` on a hash
/// that `exists` already reported is a uniqueness violation.
pub trait MeasurementStore {
    /// Whether a measurement with this content hash is already stored
    fn exists(&self, hash: &str) -> Result<bool>;

    /// Store a measurement; the content hash must be unique
    fn insert(&mut self, measurement: &Measurement) -> Result<()>;
}

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
