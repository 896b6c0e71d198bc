// SPDX-License-Identifier: MIT
// Copyright (c) 2026 The registers authors

//! RFC3339 entry timestamps

use chrono::{DateTime, SecondsFormat, Utc};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid RFC3339 timestamp '{0}'")]
pub struct TimestampError(pub String);

/// An entry timestamp
///
/// Keeps the exact text it was parsed from so logs round-trip byte for byte,
/// while ordering and equality use the instant it denotes.
#[derive(Debug, Clone)]
pub struct Timestamp {
    raw: String,
    instant: DateTime<Utc>,
}

impl Timestamp {
    pub fn parse(raw: &str) -> Result<Self, TimestampError> {
        let instant = DateTime::parse_from_rfc3339(raw)
            .map_err(|_| TimestampError(raw.to_string()))?
            .with_timezone(&Utc);
        Ok(Self {
            raw: raw.to_string(),
            instant,
        })
    }

    /// Current time at second precision, `Z` suffixed
    pub fn now() -> Self {
        Self::from_instant(Utc::now())
    }

    pub fn from_instant(instant: DateTime<Utc>) -> Self {
        Self {
            raw: instant.to_rfc3339_opts(SecondsFormat::Secs, true),
            instant,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Timestamp {}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instant
            .cmp(&other.instant)
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_raw_text() {
        let ts = Timestamp::parse("2024-01-01T01:00:00+01:00").unwrap();
        assert_eq!(ts.as_str(), "2024-01-01T01:00:00+01:00");
        assert_eq!(ts.instant(), Timestamp::parse("2024-01-01T00:00:00Z").unwrap().instant());
    }

    #[test]
    fn ordering_follows_instant() {
        let early = Timestamp::parse("2023-12-31T23:59:59Z").unwrap();
        let late = Timestamp::parse("2024-01-01T00:00:00Z").unwrap();
        assert!(early < late);
    }

    #[test]
    fn now_uses_seconds_and_z() {
        let now = Timestamp::now();
        assert!(now.as_str().ends_with('Z'));
        assert_eq!(now.as_str().len(), "2024-01-01T00:00:00Z".len());
    }

    #[test]
    fn rejects_garbage() {
        assert!(Timestamp::parse("yesterday").is_err());
        assert!(Timestamp::parse("2024-01-01").is_err());
    }
}
