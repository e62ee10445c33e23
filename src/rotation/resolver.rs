// Copyright (c) 2025 - Cowboy AI, Inc.
//! Assignment Resolution
//!
//! Pure precedence logic combining the pause flag, any persisted assignment,
//! and the computed rotation into the effective duty assignment. Persistence
//! effects come back as data: when a computed default should be written so
//! that later overrides have a base to step from, the resolution says so and
//! the caller performs the write.

use crate::domain::{AgentName, DateKey};
use crate::rotation::{Assignment, RotationCalculator};

/// Outcome of resolving one date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The effective assignment to display
    pub assignment: Assignment,

    /// When set, the caller should persist this agent as the date's
    /// assignment (first resolution of a working day)
    pub persist: Option<AgentName>,
}

impl Resolution {
    fn display_only(assignment: Assignment) -> Self {
        Self {
            assignment,
            persist: None,
        }
    }
}

/// Resolve the duty assignment for one date.
///
/// Precedence: pause beats everything, weekend beats persistence, a persisted
/// assignment is taken verbatim, and only then is the rotation computed.
pub fn resolve(
    paused: bool,
    date: &DateKey,
    persisted: Option<&AgentName>,
    calculator: &RotationCalculator,
) -> Resolution {
    if paused {
        return Resolution::display_only(Assignment::Paused);
    }
    if date.is_weekend() {
        return Resolution::display_only(Assignment::Weekend);
    }
    if let Some(agent) = persisted {
        return Resolution::display_only(Assignment::Assigned(agent.clone()));
    }
    match calculator.assignment_for(date) {
        Assignment::Assigned(agent) => Resolution {
            assignment: Assignment::Assigned(agent.clone()),
            persist: Some(agent),
        },
        other => Resolution::display_only(other),
    }
}
