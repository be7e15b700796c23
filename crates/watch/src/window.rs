//! Departure-hour window for matching trains.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error for a time range that is not of the `HH:HH` form or violates
/// `0 <= start <= end <= 24`.
#[derive(Debug, Error)]
#[error("invalid time range '{0}', expected HH:HH with 0 <= start <= end <= 24 (e.g. 11:18)")]
pub struct ParseWindowError(String);

/// Inclusive departure-hour window: `11:18` matches any train leaving
/// between 11:00 and 18:59.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: u32,
    end: u32,
}

impl TimeWindow {
    /// Create a window, enforcing `0 <= start <= end <= 24`.
    pub fn new(start: u32, end: u32) -> Result<Self, ParseWindowError> {
        if start <= end && end <= 24 {
            Ok(Self { start, end })
        } else {
            Err(ParseWindowError(format!("{start}:{end}")))
        }
    }

    /// Whether `hour` falls inside the window (bounds included).
    #[must_use]
    pub fn contains(self, hour: u32) -> bool {
        self.start <= hour && hour <= self.end
    }

    /// Lower bound, in hours.
    #[must_use]
    pub fn start(self) -> u32 {
        self.start
    }

    /// Upper bound, in hours.
    #[must_use]
    pub fn end(self) -> u32 {
        self.end
    }
}

impl FromStr for TimeWindow {
    type Err = ParseWindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once(':')
            .ok_or_else(|| ParseWindowError(s.to_string()))?;
        let start = start
            .trim()
            .parse()
            .map_err(|_| ParseWindowError(s.to_string()))?;
        let end = end
            .trim()
            .parse()
            .map_err(|_| ParseWindowError(s.to_string()))?;
        Self::new(start, end).map_err(|_| ParseWindowError(s.to_string()))
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}
