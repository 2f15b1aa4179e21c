//! A single temperature sample. Also the unit of the agent's wire format.

use chrono::{NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};

/// Timestamp layout used for display and on the wire.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    #[serde(rename = "temp")]
    value: f64,
    #[serde(with = "timestamp_format")]
    timestamp: NaiveDateTime,
}

impl Reading {
    /// Build a reading; the timestamp is truncated to whole seconds.
    pub fn new(value: f64, timestamp: NaiveDateTime) -> Self {
        Self {
            value,
            timestamp: timestamp.trunc_subsecs(0),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn timestamp_str(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

mod timestamp_format {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&ts.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}
