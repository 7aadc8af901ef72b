//! Build numbers
//!
//! A build number is a monotonically increasing integer stored next to the
//! semantic version in platform manifests. Two derivations are supported:
//! - Increment: previous + 1
//! - Timestamp: UTC time as YYYYMMDDHHmm (e.g. 202410161230)

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use launchpad_core::error::{Result, VersionError};
use launchpad_core::BuildStrategy;

/// A monotonic build identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildNumber {
    value: u64,
}

impl BuildNumber {
    /// Create a build number
    pub fn new(value: u64) -> Self {
        Self { value }
    }

    /// The raw value
    pub fn value(&self) -> u64 {
        self.value
    }

    /// The next build number
    pub fn increment(&self) -> Self {
        Self::new(self.value.saturating_add(1))
    }

    /// Derive a build number from the current UTC time
    pub fn from_current_time() -> Self {
        Self::from_time(Utc::now())
    }

    /// Encode a UTC time as YYYYMMDDHHmm
    pub fn from_time(time: DateTime<Utc>) -> Self {
        let value = time.year().max(0) as u64 * 100_000_000
            + time.month() as u64 * 1_000_000
            + time.day() as u64 * 10_000
            + time.hour() as u64 * 100
            + time.minute() as u64;
        Self::new(value)
    }

    /// Time-derived build number that still moves past `previous`
    ///
    /// Two derivations within the same minute would otherwise collide.
    pub fn next_after_time(time: DateTime<Utc>, previous: Option<BuildNumber>) -> Self {
        let candidate = Self::from_time(time);
        match previous {
            Some(prev) if prev >= candidate => {
                debug!(previous = prev.value, candidate = candidate.value, "timestamp collision, incrementing");
                prev.increment()
            }
            _ => candidate,
        }
    }

    /// Derive the next build number with the configured strategy
    #[instrument(level = "debug")]
    pub fn resolve(
        strategy: BuildStrategy,
        previous: Option<BuildNumber>,
        time: DateTime<Utc>,
    ) -> Self {
        let next = match strategy {
            BuildStrategy::Timestamp => Self::next_after_time(time, previous),
            BuildStrategy::Increment => previous.map_or(Self::new(1), |p| p.increment()),
        };
        debug!(build = next.value, "resolved build number");
        next
    }
}

impl From<u64> for BuildNumber {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for BuildNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl FromStr for BuildNumber {
    type Err = launchpad_core::LaunchpadError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(VersionError::InvalidBuildNumber(s.to_string()).into());
        }
        trimmed
            .parse()
            .map(Self::new)
            .map_err(|_| VersionError::InvalidBuildNumber(s.to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 42).unwrap()
    }

    #[test]
    fn test_increment() {
        assert_eq!(BuildNumber::new(41).increment().value(), 42);
    }

    #[test]
    fn test_from_time_encoding() {
        assert_eq!(BuildNumber::from_time(at(2024, 10, 16, 12, 30)).value(), 202410161230);
        assert_eq!(BuildNumber::from_time(at(2025, 1, 2, 3, 4)).value(), 202501020304);
    }

    #[test]
    fn test_from_current_time_brackets_now() {
        let before = BuildNumber::from_time(Utc::now());
        let current = BuildNumber::from_current_time();
        let after = BuildNumber::from_time(Utc::now());
        assert!(before <= current && current <= after);
    }

    #[test]
    fn test_from_time_is_monotonic_across_minutes() {
        let earlier = BuildNumber::from_time(at(2024, 12, 31, 23, 59));
        let later = BuildNumber::from_time(at(2025, 1, 1, 0, 0));
        assert!(later > earlier);
    }

    #[test]
    fn test_next_after_time_same_minute() {
        let time = at(2024, 10, 16, 12, 30);
        let first = BuildNumber::next_after_time(time, None);
        let second = BuildNumber::next_after_time(time, Some(first));
        assert_eq!(first.value(), 202410161230);
        assert_eq!(second.value(), 202410161231);
    }

    #[test]
    fn test_next_after_time_older_previous() {
        let time = at(2024, 10, 16, 12, 30);
        let next = BuildNumber::next_after_time(time, Some(BuildNumber::new(17)));
        assert_eq!(next.value(), 202410161230);
    }

    #[test]
    fn test_resolve_increment() {
        let time = at(2024, 10, 16, 12, 30);
        assert_eq!(
            BuildNumber::resolve(BuildStrategy::Increment, Some(BuildNumber::new(9)), time).value(),
            10
        );
        assert_eq!(
            BuildNumber::resolve(BuildStrategy::Increment, None, time).value(),
            1
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!("42".parse::<BuildNumber>().unwrap().value(), 42);
        assert_eq!(" 7 ".parse::<BuildNumber>().unwrap().value(), 7);
        assert!("".parse::<BuildNumber>().is_err());
        assert!("-1".parse::<BuildNumber>().is_err());
        assert!("1.2".parse::<BuildNumber>().is_err());
        assert!("99999999999999999999999".parse::<BuildNumber>().is_err());
    }
}
