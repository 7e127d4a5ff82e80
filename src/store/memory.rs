// In-memory store for one-shot decodes and tests

use std::collections::HashSet;

use super::{MeasurementStore, Result, StoreError};
use crate::core::Measurement;

/// Keeps every inserted measurement, with a hash index for dedup lookups
#[derive(Debug, Default)]
pub struct MemoryStore {
    hashes: HashSet<String>,
    measurements: Vec<Measurement>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    /// Stored measurements in insertion order
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }
}

impl MeasurementStore for MemoryStore {
    fn exists(&self, hash: &str) -> Result<bool> {
        Ok(self.hashes.contains(hash))
    }

    fn insert(&mut self, measurement: &Measurement) -> Result<()> {
        if !self.hashes.insert(measurement.content_hash.clone()) {
            return Err(StoreError::Duplicate(measurement.content_hash.clone()));
        }
        self.measurements.push(measurement.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::measurement::sentinel_timestamp;

    fn measurement(hash: &str) -> Measurement {
        Measurement::new(hash.to_string(), sentinel_timestamp(), 120, 80, 60)
    }

    #[test]
    fn test_exists_after_insert() {
        let mut store = MemoryStore::new();
        assert!(!store.exists("a").unwrap());

        store.insert(&measurement("a")).unwrap();
        assert!(store.exists("a").unwrap());
        assert!(!store.exists("b").unwrap());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_duplicate_insert_is_rejected() {
        let mut store = MemoryStore::new();
        store.insert(&measurement("a")).unwrap();

        let err = store.insert(&measurement("a")).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(hash) if hash == "a"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let mut store = MemoryStore::new();
        for hash in ["c", "a", "b"] {
            store.insert(&measurement(hash)).unwrap();
        }

        let order: Vec<&str> = store
            .measurements()
            .iter()
            .map(|m| m.content_hash.as_str())
            .collect();
        assert_eq!(order, ["c", "a", "b"]);
    }
}
