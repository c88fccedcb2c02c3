//! Validity periods for rule effectiveness
//!
//! A rule is only considered during matching while the evaluation instant
//! falls inside its valid period. Periods are half-open: the start is
//! inclusive, the end exclusive, and a missing end means "open-ended".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid period: start {start} must be before end {end}")]
    InvalidPeriod { start: String, end: String },
}

/// Represents a valid time period (when a fact is true in the real world)
///
/// Used to track the business-effective window of a commission rule:
/// `[effective_from, effective_to)`, where a missing end is unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidPeriod {
    /// Start of the valid period (inclusive)
    pub start: DateTime<Utc>,
    /// End of the valid period (exclusive), None means unbounded
    pub end: Option<DateTime<Utc>>,
}

impl ValidPeriod {
    /// Creates a new valid period
    pub fn new(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Result<Self, TemporalError> {
        if let Some(end) = end {
            if start >= end {
                return Err(TemporalError::InvalidPeriod {
                    start: start.to_string(),
                    end: end.to_string(),
                });
            }
        }
        Ok(Self { start, end })
    }

    /// Creates an unbounded period starting from the given time
    pub fn from(start: DateTime<Utc>) -> Self {
        Self { start, end: None }
    }

    /// Creates a bounded period
    pub fn bounded(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, TemporalError> {
        Self::new(start, Some(end))
    }

    /// Returns true if this period contains the given timestamp
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        timestamp >= self.start && self.end.map_or(true, |e| timestamp < e)
    }

    /// Returns true if this period overlaps with another
    pub fn overlaps(&self, other: &ValidPeriod) -> bool {
        let self_end = self.end.unwrap_or(DateTime::<Utc>::MAX_UTC);
        let other_end = other.end.unwrap_or(DateTime::<Utc>::MAX_UTC);

        self.start < other_end && other.start < self_end
    }

    /// Returns true if this period is unbounded (no end date)
    pub fn is_unbounded(&self) -> bool {
        self.end.is_none()
    }
}
