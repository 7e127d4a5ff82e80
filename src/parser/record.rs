// Cycle record decoding: timestamp, packed pressure fields, dedup

use chrono::NaiveDateTime;
use sha2::{Digest, Sha256};

use super::{Header, ParseError, Result};
use crate::bitwise::{BitCursor, CursorError};
use crate::core::constants::{FIRST_RECORD, PRESSURE_RANGE, RECORD_LENGTH, RECORD_WINDOW, TIMESTAMP_RANGE};
use crate::core::measurement::{sentinel_timestamp, Measurement};
use crate::dump::RawDump;
use crate::store::MeasurementStore;

/// Format of the leading timestamp digits
const TIMESTAMP_FORMAT: &str = "%y%m%d%H%M";

/// Decodes the cycle records described by a parsed header
pub struct RecordDecoder<'a> {
    header: &'a Header,
}

impl<'a> RecordDecoder<'a> {
    pub fn new(header: &'a Header) -> Self {
        Self { header }
    }

    /// Decode every cycle record in dump order, skipping records whose
    /// content hash the store has already seen.
    ///
    /// Dedup is check-then-insert per record, so a duplicate inside the same
    /// buffer is skipped exactly like one from an earlier dump. A record
    /// window that runs past the end of the dump fails the whole pass.
    pub fn decode_all(
        &self,
        dump: &RawDump,
        store: &mut dyn MeasurementStore,
    ) -> Result<Vec<Measurement>> {
        let mut measurements = Vec::new();

        for (index, offset) in self.offsets().enumerate() {
            let record = dump.get(offset, RECORD_WINDOW).map_err(|_| {
                ParseError::TruncatedRecord {
                    index,
                    start: offset,
                    end: offset + RECORD_WINDOW,
                    len: dump.len(),
                }
            })?;

            let hash = content_hash(&self.header.user_id, record);
            if store.exists(&hash)? {
                tracing::debug!("record {index} already stored, skipping");
                continue;
            }

            let measurement = self.decode_record(index, record, hash)?;
            store.insert(&measurement)?;
            measurements.push(measurement);
        }

        Ok(measurements)
    }

    fn decode_record(
        &self,
        index: usize,
        record: &[u8],
        content_hash: String,
    ) -> Result<Measurement> {
        let taken_at = parse_timestamp(&record[TIMESTAMP_RANGE]);

        let payload = hex::decode(&record[PRESSURE_RANGE]).map_err(|err| {
            ParseError::MalformedRecord {
                index,
                reason: format!("pressure payload is not hex text: {err}"),
            }
        })?;

        let (pulse, diastolic, systolic) =
            read_pressure_fields(&payload).map_err(|err| ParseError::MalformedRecord {
                index,
                reason: err.to_string(),
            })?;

        Ok(Measurement::new(
            content_hash,
            taken_at,
            systolic,
            diastolic,
            pulse,
        ))
    }

    /// Byte offsets of the record windows described by the header
    fn offsets(&self) -> impl Iterator<Item = usize> {
        (0..self.header.cycle_count as usize).map(|index| FIRST_RECORD + index * RECORD_LENGTH)
    }
}

/// Dedup key: SHA-256 over the user id and the raw record bytes
fn content_hash(user_id: &str, record: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(user_id.as_bytes());
    hasher.update(record);
    hex::encode(hasher.finalize())
}

/// Pressure payload layout: 2 unused bits, then 10-bit pulse, diastolic and
/// systolic, in that order
fn read_pressure_fields(payload: &[u8]) -> std::result::Result<(u16, u16, u16), CursorError> {
    let mut cursor = BitCursor::new(payload);
    cursor.skip(2)?;
    let pulse = cursor.read(10)? as u16;
    let diastolic = cursor.read(10)? as u16;
    let systolic = cursor.read(10)? as u16;
    Ok((pulse, diastolic, systolic))
}

/// Records carry their date as ASCII YYMMDDHHMM digits. Monitors with an
/// unset clock produce garbage here, which maps to the sentinel date rather
/// than failing the record.
fn parse_timestamp(bytes: &[u8]) -> NaiveDateTime {
    std::str::from_utf8(bytes)
        .ok()
        .and_then(|text| NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).ok())
        .unwrap_or_else(sentinel_timestamp)
}
