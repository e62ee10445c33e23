// Copyright (c) 2025 - Cowboy AI, Inc.
//! Date and Time Slot Key Value Objects
//!
//! Appointment documents are keyed by calendar date (`YYYY-MM-DD`) and
//! time-of-day (`HH:mm`). Both formats are zero-padded so that lexicographic
//! order equals chronological order; the aggregation engine and the weekly
//! purge both rely on this property.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Key validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("invalid date key (expected YYYY-MM-DD): {0}")]
    BadDate(String),

    #[error("invalid slot time (expected zero-padded HH:mm): {0}")]
    BadTime(String),
}

/// Calendar date key, rendered as zero-padded `YYYY-MM-DD`
///
/// # Invariants
/// - Renders to exactly the document-id format used by the store
/// - Ordering is chronological, which equals lexicographic order of the
///   rendered key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Wrap a calendar date
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parse a `YYYY-MM-DD` document id
    pub fn parse(id: &str) -> Result<Self, KeyError> {
        NaiveDate::parse_from_str(id, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| KeyError::BadDate(id.to_string()))
    }

    /// The underlying calendar date
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Saturday or Sunday
    pub fn is_weekend(&self) -> bool {
        matches!(self.0.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// The next non-weekend date strictly after this one
    pub fn next_working_day(&self) -> DateKey {
        let mut next = self.0 + Duration::days(1);
        while matches!(next.weekday(), Weekday::Sat | Weekday::Sun) {
            next += Duration::days(1);
        }
        DateKey(next)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

/// Time-of-day slot key, rendered as zero-padded 24-hour `HH:mm`
///
/// Slot times are minute-granular; seconds never appear in slot ids.
/// Ordering is chronological, equal to lexicographic order of the rendered
/// key (load-bearing for next-appointment selection).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotTime {
    hour: u8,
    minute: u8,
}

impl SlotTime {
    /// Create a slot time, validating the 24-hour range
    pub fn new(hour: u8, minute: u8) -> Result<Self, KeyError> {
        if hour > 23 || minute > 59 {
            return Err(KeyError::BadTime(format!("{hour:02}:{minute:02}")));
        }
        Ok(Self { hour, minute })
    }

    /// Const constructor for known-good literals
    pub const fn hm(hour: u8, minute: u8) -> Self {
        debug_assert!(hour < 24 && minute < 60);
        Self { hour, minute }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes since midnight
    pub fn minutes_from_midnight(&self) -> u32 {
        self.hour as u32 * 60 + self.minute as u32
    }

    /// The slot `interval` minutes after this one, if it stays within the day
    pub fn advanced_by(&self, interval: u32) -> Option<SlotTime> {
        let total = self.minutes_from_midnight() + interval;
        if total >= 24 * 60 {
            return None;
        }
        Some(Self {
            hour: (total / 60) as u8,
            minute: (total % 60) as u8,
        })
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for SlotTime {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || KeyError::BadTime(s.to_string());
        let (h, m) = s.split_once(':').ok_or_else(bad)?;
        if h.len() != 2 || m.len() != 2 {
            return Err(bad());
        }
        let hour: u8 = h.parse().map_err(|_| bad())?;
        let minute: u8 = m.parse().map_err(|_| bad())?;
        Self::new(hour, minute).map_err(|_| bad())
    }
}

impl Serialize for SlotTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SlotTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
