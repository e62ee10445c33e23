// Copyright (c) 2025 - Cowboy AI, Inc.
//! Rotation Arithmetic
//!
//! Pure date arithmetic over the rotation sequence. The duty agent for a
//! working day is determined by how many working days have elapsed since the
//! rotation epoch: the k-th working day on or after the epoch maps to
//! sequence index `(k - 1) mod N`. Weekends consume no rotation slots.

use crate::domain::{AgentName, DateKey};
use crate::rotation::Assignment;
use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Deterministic duty-rotation calculator
#[derive(Debug, Clone)]
pub struct RotationCalculator {
    epoch: NaiveDate,
    sequence: Vec<AgentName>,
}

impl RotationCalculator {
    /// Build a calculator from the rotation epoch and the agent sequence
    pub fn new(epoch: NaiveDate, sequence: Vec<AgentName>) -> Self {
        Self { epoch, sequence }
    }

    pub fn sequence(&self) -> &[AgentName] {
        &self.sequence
    }

    /// Count of working days from the epoch through `date`, inclusive.
    ///
    /// Zero when `date` precedes the epoch. A weekend `date` contributes
    /// nothing itself but the count still covers the working days before it.
    pub fn workday_ordinal(&self, date: &DateKey) -> i64 {
        let target = date.date();
        if target < self.epoch {
            return 0;
        }
        let mut count = 0;
        let mut cursor = self.epoch;
        while cursor <= target {
            if !matches!(cursor.weekday(), Weekday::Sat | Weekday::Sun) {
                count += 1;
            }
            cursor += Duration::days(1);
        }
        count
    }

    /// The computed assignment for a date, ignoring pause and overrides
    pub fn assignment_for(&self, date: &DateKey) -> Assignment {
        if date.is_weekend() {
            return Assignment::Weekend;
        }
        if self.sequence.is_empty() {
            return Assignment::Unavailable;
        }
        let ordinal = self.workday_ordinal(date);
        if ordinal == 0 {
            return Assignment::Unavailable;
        }
        let index = (ordinal - 1).rem_euclid(self.sequence.len() as i64) as usize;
        Assignment::Assigned(self.sequence[index].clone())
    }

    /// Position of an agent in the sequence
    pub fn position_of(&self, agent: &AgentName) -> Option<usize> {
        self.sequence.iter().position(|a| a == agent)
    }

    /// The agent after `agent` in the sequence, wrapping around
    pub fn next_after(&self, agent: &AgentName) -> Option<&AgentName> {
        let pos = self.position_of(agent)?;
        self.sequence.get((pos + 1) % self.sequence.len())
    }

    /// The agent before `agent` in the sequence, wrapping around
    pub fn previous_before(&self, agent: &AgentName) -> Option<&AgentName> {
        let pos = self.position_of(agent)?;
        let len = self.sequence.len();
        self.sequence.get((pos + len - 1) % len)
    }
}
