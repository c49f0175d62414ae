//! Timestamp type used throughout the workflow.
//!
//! Timestamps are UTC instants and always travel as ISO-8601 (RFC 3339)
//! strings, which is what the record store and presentation layer expect.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::TypesError;

/// A UTC timestamp rendered as ISO-8601.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn new(inner: DateTime<Utc>) -> Self {
        Self(inner)
    }

    /// Get the current system time.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Build from Unix epoch seconds. Out-of-range values clamp to the epoch.
    pub fn from_unix_secs(secs: i64) -> Self {
        Self(DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or_default())
    }

    /// Parse an RFC 3339 string such as `2024-01-01T00:00:00Z`.
    pub fn parse(raw: &str) -> Result<Self, TypesError> {
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(|e| TypesError::InvalidTimestamp {
                value: raw.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn as_unix_secs(&self) -> i64 {
        self.0.timestamp()
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// ISO-8601 with millisecond precision and a `Z` suffix.
    pub fn to_iso8601(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl FromStr for Timestamp {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
