// Copyright (c) 2025 - Cowboy AI, Inc.
//! Calendar Identity

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a bookable calendar (a per-team calendar or the shared one)
///
/// Identity is a plain string id; there is no nesting. The duty-roster view
/// id also lives in this type because it shares the selection UI, but it is
/// never a booking target; callers select booking targets from the configured
/// bookable set (`BoardConfig::is_bookable`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarId(String);

impl CalendarId {
    /// Wrap a calendar id, trimming surrounding whitespace
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty id is never a valid booking target
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CalendarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CalendarId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}
