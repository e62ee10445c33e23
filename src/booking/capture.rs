// Copyright (c) 2025 - Cowboy AI, Inc.
//! Delegate Capture Session
//!
//! When the liaison books on the shared calendar, the booking is made on
//! behalf of another agent and for a named client. The two extra inputs are
//! gathered through a modal flow that locks the board UI; this module models
//! that flow as a small state machine so a commit can only ever happen with
//! both fields present.
//!
//! ```text
//! Idle ──begin──► Capturing ──commit──► Committing ──complete──► Idle
//!                    │                      │
//!                  cancel                 cancel
//!                    ▼                      ▼
//!                  Idle                   Idle
//! ```

use crate::booking::state_machine::TransitionError;
use crate::domain::{AgentName, CalendarId, DateKey, SlotTime};

/// Address of one slot on the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRef {
    pub calendar: CalendarId,
    pub date: DateKey,
    pub time: SlotTime,
}

/// Capture flow state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureState {
    /// No capture in progress; board is unlocked
    Idle,

    /// Gathering delegate and client for a pending slot
    Capturing {
        slot: SlotRef,
        delegate: Option<AgentName>,
        client: Option<String>,
    },

    /// Inputs complete, booking write in flight
    Committing {
        slot: SlotRef,
        delegate: AgentName,
        client: String,
    },
}

/// One liaison capture session
///
/// The session owner is fixed at construction; the board locks for everyone
/// while a session is in progress.
#[derive(Debug, Clone)]
pub struct CaptureSession {
    owner: AgentName,
    state: CaptureState,
}

impl CaptureSession {
    pub fn new(owner: AgentName) -> Self {
        Self {
            owner,
            state: CaptureState::Idle,
        }
    }

    pub fn owner(&self) -> &AgentName {
        &self.owner
    }

    pub fn state(&self) -> &CaptureState {
        &self.state
    }

    /// The board locks while a session is not idle
    pub fn in_progress(&self) -> bool {
        self.state != CaptureState::Idle
    }

    /// Start capturing for a slot. Only valid when idle.
    pub fn begin(&mut self, slot: SlotRef) -> Result<(), TransitionError> {
        match &self.state {
            CaptureState::Idle => {
                self.state = CaptureState::Capturing {
                    slot,
                    delegate: None,
                    client: None,
                };
                Ok(())
            }
            other => Err(TransitionError::InvalidTransition {
                from: format!("{other:?}"),
                to: "Capturing".to_string(),
            }),
        }
    }

    /// Record the delegate agent
    pub fn set_delegate(&mut self, agent: AgentName) -> Result<(), TransitionError> {
        match &mut self.state {
            CaptureState::Capturing { delegate, .. } => {
                *delegate = Some(agent);
                Ok(())
            }
            other => Err(TransitionError::InvalidTransition {
                from: format!("{other:?}"),
                to: "Capturing".to_string(),
            }),
        }
    }

    /// Record the client name
    pub fn set_client(&mut self, name: String) -> Result<(), TransitionError> {
        match &mut self.state {
            CaptureState::Capturing { client, .. } => {
                *client = Some(name);
                Ok(())
            }
            other => Err(TransitionError::InvalidTransition {
                from: format!("{other:?}"),
                to: "Capturing".to_string(),
            }),
        }
    }

    /// Move to committing, returning the gathered inputs for the booking
    /// write. Fails unless both delegate and a non-empty client are present.
    pub fn commit(&mut self) -> Result<(SlotRef, AgentName, String), TransitionError> {
        match &self.state {
            CaptureState::Capturing {
                slot,
                delegate: Some(delegate),
                client: Some(client),
            } if !client.trim().is_empty() => {
                let slot = slot.clone();
                let delegate = delegate.clone();
                let client = client.trim().to_string();
                self.state = CaptureState::Committing {
                    slot: slot.clone(),
                    delegate: delegate.clone(),
                    client: client.clone(),
                };
                Ok((slot, delegate, client))
            }
            CaptureState::Capturing { .. } => Err(TransitionError::RuleViolation(
                "delegate and client are both required".to_string(),
            )),
            other => Err(TransitionError::InvalidTransition {
                from: format!("{other:?}"),
                to: "Committing".to_string(),
            }),
        }
    }

    /// The booking write finished; unlock the board
    pub fn complete(&mut self) -> Result<(), TransitionError> {
        match &self.state {
            CaptureState::Committing { .. } => {
                self.state = CaptureState::Idle;
                Ok(())
            }
            other => Err(TransitionError::InvalidTransition {
                from: format!("{other:?}"),
                to: "Idle".to_string(),
            }),
        }
    }

    /// Abandon the session from any state. Idempotent.
    pub fn cancel(&mut self) {
        self.state = CaptureState::Idle;
    }
}
