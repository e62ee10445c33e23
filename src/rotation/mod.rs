// Copyright (c) 2025 - Cowboy AI, Inc.
//! Duty-Agent Rotation
//!
//! One agent per working day handles office service duty, cycling through a
//! fixed sequence anchored at a rotation epoch. The split mirrors the rest of
//! the crate: a pure calculator, a pure resolver that folds in pause state
//! and persisted overrides, and a store-facing service that owns the
//! persistence and guard checks.
//!
//! ```text
//! RotationCalculator ──► resolve() ──► RotationStore
//!   (epoch + sequence)    (pure)        (persistence + guards)
//! ```

pub mod calculator;
pub mod resolver;
pub mod store;

pub use calculator::RotationCalculator;
pub use resolver::{resolve, Resolution};
pub use store::{AssignmentRecord, PauseState, RotationStore};

use crate::domain::AgentName;

/// Resolved duty assignment for one date
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
    /// Saturday or Sunday: no duty agent
    Weekend,

    /// Rotation is paused; no duty agent until resumed
    Paused,

    /// No agent could be determined (empty rotation sequence)
    Unavailable,

    /// The duty agent for the date
    Assigned(AgentName),
}

impl Assignment {
    /// The assigned agent, if any
    pub fn agent(&self) -> Option<&AgentName> {
        match self {
            Assignment::Assigned(agent) => Some(agent),
            _ => None,
        }
    }

    pub fn is_assigned(&self) -> bool {
        matches!(self, Assignment::Assigned(_))
    }
}
