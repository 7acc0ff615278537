//! Timestamp format used by the API (`2006-01-02 15:04:05`, exchange local time).

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serializer};

pub const KITE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Serde adapter for optional API timestamps.
///
/// `null`, a missing field and an empty string all decode to `None`.
pub mod optional {
    use super::*;

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_str(&ts.format(KITE_TIME_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => NaiveDateTime::parse_from_str(s, KITE_TIME_FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
