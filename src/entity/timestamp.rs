//! Text form of `created_at` / `updated_at`: `YYYY-MM-DDTHH:MM:SS.ffffff`.
//!
//! Used as `#[serde(with = "timestamp")]` on entity timestamp fields.

use chrono::{NaiveDateTime, ParseResult};
use serde::{de, Deserialize, Deserializer, Serializer};

/// Six fraction digits, dot required.
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.%6f";

pub fn format(timestamp: &NaiveDateTime) -> String {
    timestamp.format(TIME_FORMAT).to_string()
}

/// Parse timestamp text carrying one to six fraction digits.
///
/// Short fractions are read as leading digits, so `.5` is 500000µs.
pub fn parse(text: &str) -> ParseResult<NaiveDateTime> {
    let normalized = match text.split_once('.') {
        Some((whole, fraction)) if (1..=6).contains(&fraction.len()) => {
            format!("{}.{:0<6}", whole, fraction)
        }
        _ => text.to_string(),
    };
    NaiveDateTime::parse_from_str(&normalized, TIME_FORMAT)
}

pub fn serialize<S: Serializer>(
    timestamp: &NaiveDateTime,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(timestamp))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
    let text = String::deserialize(deserializer)?;
    parse(&text).map_err(|e| de::Error::custom(format_args!("invalid timestamp `{}`: {}", text, e)))
}
