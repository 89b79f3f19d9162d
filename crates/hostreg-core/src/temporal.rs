//! # Timestamps
//!
//! `Timestamp` is the time type carried by transition records. It is always
//! UTC and truncated to whole seconds, so two records written by different
//! services for the same instant render identically (`YYYY-MM-DDTHH:MM:SSZ`).
//!
//! Serde goes through the same string form: serialization writes the
//! `Display` output and deserialization runs [`Timestamp::parse`], so a
//! stored record can never come back with an offset or a fraction.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::HostregError;

/// A UTC timestamp with seconds precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// The current time, truncated to seconds.
    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    /// Wrap a `DateTime<Utc>`, discarding sub-second precision.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt.with_nanosecond(0).unwrap_or(dt))
    }

    /// Parse an RFC 3339 string. Only the `Z` suffix is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`HostregError::Validation`] for malformed input or for any
    /// explicit offset, including `+00:00`.
    pub fn parse(s: &str) -> Result<Self, HostregError> {
        if !s.ends_with('Z') {
            return Err(HostregError::Validation(format!(
                "timestamp must be UTC with Z suffix, got {s:?}"
            )));
        }
        let dt = DateTime::parse_from_rfc3339(s)
            .map_err(|e| HostregError::Validation(format!("invalid timestamp {s:?}: {e}")))?;
        Ok(Self::from_utc(dt.with_timezone(&Utc)))
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%SZ"))
    }
}

impl TryFrom<String> for Timestamp {
    type Error = HostregError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> Self {
        ts.to_string()
    }
}
