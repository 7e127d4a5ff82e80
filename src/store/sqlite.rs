// SQLite-backed measurement store

use std::path::Path;

use chrono::NaiveDateTime;
use rusqlite::{params, Connection};

use super::{MeasurementStore, Result, StoreError};
use crate::core::Measurement;

/// Timestamp column format; lexicographic order matches chronological order
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Persistent store backed by a single SQLite table, with the content hash
/// as primary key so duplicates are rejected by the schema as well
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at @path
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        if let Err(err) = conn.pragma_update(None, "journal_mode", "WAL") {
            tracing::warn!("Failed to enable WAL mode: {err}");
        }
        Self::with_connection(conn)
    }

    /// Open a transient in-memory database
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS measurements (
                 hash TEXT PRIMARY KEY,
                 taken_at TEXT NOT NULL,
                 systolic INTEGER NOT NULL,
                 diastolic INTEGER NOT NULL,
                 pulse INTEGER NOT NULL,
                 pulse_pressure INTEGER NOT NULL,
                 mean_arterial_pressure REAL NOT NULL
             )",
            [],
        )?;
        Ok(Self { conn })
    }

    /// All stored measurements, oldest first
    pub fn all_measurements(&self) -> Result<Vec<Measurement>> {
        let mut stmt = self.conn.prepare(
            "SELECT hash, taken_at, systolic, diastolic, pulse, pulse_pressure, mean_arterial_pressure
             FROM measurements
             ORDER BY taken_at",
        )?;

        let mut rows = stmt.query([])?;
        let mut measurements = Vec::new();
        while let Some(row) = rows.next()? {
            measurements.push(Measurement {
                content_hash: row.get(0)?,
                taken_at: parse_datetime(&row.get::<_, String>(1)?)?,
                systolic: row.get(2)?,
                diastolic: row.get(3)?,
                pulse: row.get(4)?,
                pulse_pressure: row.get(5)?,
                mean_arterial_pressure: row.get(6)?,
            });
        }

        Ok(measurements)
    }

    /// Number of stored measurements
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM measurements", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl MeasurementStore for SqliteStore {
    fn exists(&self, hash: &str) -> Result<bool> {
        let mut stmt = self
            .conn
            .prepare("SELECT 1 FROM measurements WHERE hash = ?1")?;
        Ok(stmt.exists(params![hash])?)
    }

    fn insert(&mut self, measurement: &Measurement) -> Result<()> {
        self.conn.execute(
            "INSERT INTO measurements
                 (hash, taken_at, systolic, diastolic, pulse, pulse_pressure, mean_arterial_pressure)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                measurement.content_hash,
                measurement.taken_at.format(DATETIME_FORMAT).to_string(),
                measurement.systolic,
                measurement.diastolic,
                measurement.pulse,
                measurement.pulse_pressure,
                measurement.mean_arterial_pressure,
            ],
        )?;
        Ok(())
    }
}

fn parse_datetime(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT)
        .map_err(|_| StoreError::InvalidDatetime(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn measurement(hash: &str, day: u32) -> Measurement {
        let taken_at = NaiveDate::from_ymd_opt(2019, 2, day)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        Measurement::new(hash.to_string(), taken_at, 132, 85, 72)
    }

    #[test]
    fn test_insert_and_exists() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        assert!(!store.exists("a").unwrap());

        store.insert(&measurement("a", 1)).unwrap();
        assert!(store.exists("a").unwrap());
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_duplicate_hash_is_rejected_by_schema() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.insert(&measurement("a", 1)).unwrap();

        let err = store.insert(&measurement("a", 2)).unwrap_err();
        assert!(matches!(err, StoreError::Database(_)));
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_all_measurements_ordered_by_date() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.insert(&measurement("later", 20)).unwrap();
        store.insert(&measurement("earlier", 5)).unwrap();

        let all = store.all_measurements().unwrap();
        let hashes: Vec<&str> = all.iter().map(|m| m.content_hash.as_str()).collect();
        assert_eq!(hashes, ["earlier", "later"]);
        assert_eq!(all[0], measurement("earlier", 5));
    }

    #[test]
    fn test_reopen_keeps_measurements() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("measurements.sqlite");

        {
            let mut store = SqliteStore::open(&path).unwrap();
            store.insert(&measurement("a", 1)).unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert!(store.exists("a").unwrap());
        assert_eq!(store.count().unwrap(), 1);
    }
}
