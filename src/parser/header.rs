// Header window: cycle count and user identifier

use super::{ParseError, Result};
use crate::core::constants::{FIRST_RECORD, HEADER_SIZE, HEADER_START, USER_ID_LENGTH};
use crate::dump::RawDump;

/// Decoded view of the dump header.
///
/// The raw reserved and user-id bytes are kept so the header window can be
/// re-encoded losslessly even when padding was dropped from `user_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Number of cycle records the dump claims to hold
    pub cycle_count: u8,

    /// User identifier with undecodable pad bytes dropped
    pub user_id: String,

    reserved: [u8; 2],
    user_raw: [u8; USER_ID_LENGTH],
}

impl Header {
    /// Raw user-id bytes, padding included
    pub fn user_raw(&self) -> &[u8] {
        &self.user_raw
    }

    /// Re-encode the header window as lowercase hex text
    pub fn encode_hex(&self) -> String {
        let mut bytes = Vec::with_capacity(HEADER_SIZE);
        bytes.push(self.cycle_count);
        bytes.extend_from_slice(&self.reserved);
        bytes.extend_from_slice(&self.user_raw);
        hex::encode(bytes)
    }
}

/// Parse the header window of a dump.
///
/// The window is 30 ASCII hex characters decoding to 15 bytes: one byte of
/// cycle count, two reserved bytes, and twelve bytes of user identifier
/// padded with 0x99.
pub fn parse_header(dump: &RawDump) -> Result<Header> {
    let window = dump
        .get(HEADER_START, FIRST_RECORD - HEADER_START)
        .map_err(|_| {
            ParseError::MalformedHeader(format!(
                "dump holds {} bytes, need at least {}",
                dump.len(),
                FIRST_RECORD
            ))
        })?;

    let decoded = hex::decode(window).map_err(|err| {
        ParseError::MalformedHeader(format!("header window is not hex text: {err}"))
    })?;

    let cycle_count = decoded[0];
    let mut reserved = [0u8; 2];
    reserved.copy_from_slice(&decoded[1..3]);
    let mut user_raw = [0u8; USER_ID_LENGTH];
    user_raw.copy_from_slice(&decoded[3..HEADER_SIZE]);

    Ok(Header {
        cycle_count,
        user_id: decode_user_id(&user_raw),
        reserved,
        user_raw,
    })
}

/// Decode user-id bytes, dropping anything that is not valid UTF-8.
///
/// The monitor pads unused positions with 0x99; padding must never fail the
/// header parse.
fn decode_user_id(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    let mut rest = bytes;
    while !rest.is_empty() {
        match std::str::from_utf8(rest) {
            Ok(tail) => {
                out.push_str(tail);
                break;
            }
            Err(err) => {
                let (valid, after) = rest.split_at(err.valid_up_to());
                out.push_str(std::str::from_utf8(valid).unwrap_or(""));
                let skip = err.error_len().unwrap_or(after.len());
                rest = &after[skip..];
            }
        }
    }
    out
}
