// Copyright (c) 2025 - Cowboy AI, Inc.
//! Collection and Document Path Layout
//!
//! All collection names and document-id conventions live here so the rest of
//! the crate never concatenates path strings by hand.
//!
//! ```text
//! teams/{calendar}/appointments/{YYYY-MM-DD}   one doc per day, field per slot
//! dailyAssignments/{YYYY-MM-DD}                persisted duty assignment
//! rotationPause/pauseState                     singleton pause flag
//! agent_debts/{agent}                          running debt balance
//! debt_history/{uuid}                          debt event log
//! teambuilding_contributions/{agent}           contribution balance
//! ```

use crate::domain::{AgentName, CalendarId, DateKey};
use crate::store::DocPath;

pub const ASSIGNMENTS_COLLECTION: &str = "dailyAssignments";
pub const PAUSE_COLLECTION: &str = "rotationPause";
pub const PAUSE_DOC_ID: &str = "pauseState";
pub const DEBTS_COLLECTION: &str = "agent_debts";
pub const DEBT_HISTORY_COLLECTION: &str = "debt_history";
pub const CONTRIBUTIONS_COLLECTION: &str = "teambuilding_contributions";

/// Appointments collection of one calendar
pub fn appointments_collection(calendar: &CalendarId) -> String {
    format!("teams/{calendar}/appointments")
}

/// The per-day appointment document of one calendar
pub fn day_doc(calendar: &CalendarId, date: &DateKey) -> DocPath {
    DocPath::new(appointments_collection(calendar), date.to_string())
}

/// Persisted duty assignment for one date
pub fn assignment_doc(date: &DateKey) -> DocPath {
    DocPath::new(ASSIGNMENTS_COLLECTION, date.to_string())
}

/// The singleton rotation pause document
pub fn pause_doc() -> DocPath {
    DocPath::new(PAUSE_COLLECTION, PAUSE_DOC_ID)
}

/// Running debt balance of one agent
pub fn debt_doc(agent: &AgentName) -> DocPath {
    DocPath::new(DEBTS_COLLECTION, agent.as_str())
}

/// One debt history event
pub fn debt_history_doc(event_id: &str) -> DocPath {
    DocPath::new(DEBT_HISTORY_COLLECTION, event_id)
}

/// Contribution balance of one agent
pub fn contribution_doc(agent: &AgentName) -> DocPath {
    DocPath::new(CONTRIBUTIONS_COLLECTION, agent.as_str())
}
