//! H3 index decoding and cell centers.

use crate::error::DecodeError;
use h3o::{CellIndex, LatLng};
use std::num::ParseIntError;

/// Parses a hexadecimal `u64`, with or without a `0x` prefix.
pub fn parse_hex(s: &str) -> Result<u64, ParseIntError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u64::from_str_radix(digits, 16)
}

/// Decodes one line of input into a cell.
///
/// Surrounding whitespace, including the line terminator, is ignored;
/// everything else must be hex digits.
pub fn decode(text: &str) -> Result<CellIndex, DecodeError> {
    let token = text.trim();
    let raw = parse_hex(token).map_err(|_| DecodeError::NotHex(token.to_owned()))?;
    decode_raw(raw)
}

pub fn decode_raw(raw: u64) -> Result<CellIndex, DecodeError> {
    Ok(CellIndex::try_from(raw)?)
}

/// A cell's center point, in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

impl Coordinate {
    pub fn lat_degrees(&self) -> f64 {
        self.lat.to_degrees()
    }

    pub fn lng_degrees(&self) -> f64 {
        self.lng.to_degrees()
    }
}

impl From<CellIndex> for Coordinate {
    fn from(cell: CellIndex) -> Self {
        let center = LatLng::from(cell);
        Self {
            lat: center.lat_radians(),
            lng: center.lng_radians(),
        }
    }
}
