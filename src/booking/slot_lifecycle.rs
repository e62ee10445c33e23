// Copyright (c) 2025 - Cowboy AI, Inc.
//! Slot Lifecycle State Machine
//!
//! Formal FSM for a single (calendar, date, time) slot. This is a Mealy
//! machine: outputs depend on both state and input.
//!
//! # States
//!
//! - Empty: no appointment
//! - Booked: appointment present, unconfirmed
//! - Confirmed: appointment present, confirmed
//!
//! # Inputs
//!
//! - Book: Empty → Booked
//! - Confirm: Booked → Confirmed; Confirmed → Confirmed (idempotent)
//! - Deconfirm: Confirmed → Booked; Booked → Booked (idempotent)
//! - Cancel: Booked/Confirmed → Empty
//!
//! A slot never jumps Empty → Confirmed; confirmation always passes through
//! a booking.

use super::state_machine::{StateMachine, TransitionError, TransitionResult};

/// Slot state (FSM state)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// No appointment in the slot
    Empty,

    /// Appointment present, not yet confirmed
    Booked,

    /// Appointment present and confirmed
    Confirmed,
}

/// Slot command (FSM input)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotCommand {
    Book,
    Confirm,
    Deconfirm,
    Cancel,
}

/// Transition output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotOutput {
    /// Whether stored state needs updating (idempotent re-applies report
    /// success without a write)
    pub changed: bool,
}

impl SlotOutput {
    fn changed() -> Self {
        Self { changed: true }
    }

    fn unchanged() -> Self {
        Self { changed: false }
    }
}

impl StateMachine for SlotState {
    type Input = SlotCommand;
    type Output = SlotOutput;

    fn transition(&self, input: &Self::Input) -> TransitionResult<(Self, Self::Output)> {
        use SlotCommand::*;
        use SlotState::*;

        match (self, input) {
            (Empty, Book) => Ok((Booked, SlotOutput::changed())),

            (Booked, Confirm) => Ok((Confirmed, SlotOutput::changed())),
            (Booked, Deconfirm) => Ok((Booked, SlotOutput::unchanged())),
            (Booked, Cancel) => Ok((Empty, SlotOutput::changed())),
            (Booked, Book) => Err(TransitionError::RuleViolation(
                "slot is already booked".to_string(),
            )),

            (Confirmed, Confirm) => Ok((Confirmed, SlotOutput::unchanged())),
            (Confirmed, Deconfirm) => Ok((Booked, SlotOutput::changed())),
            (Confirmed, Cancel) => Ok((Empty, SlotOutput::changed())),
            (Confirmed, Book) => Err(TransitionError::RuleViolation(
                "slot is already booked".to_string(),
            )),

            // nothing to confirm or cancel in an empty slot
            (Empty, Confirm) | (Empty, Deconfirm) => Err(TransitionError::InvalidTransition {
                from: "Empty".to_string(),
                to: "Confirmed/Booked".to_string(),
            }),
            (Empty, Cancel) => Err(TransitionError::InvalidTransition {
                from: "Empty".to_string(),
                to: "Empty".to_string(),
            }),
        }
    }

    fn valid_inputs(&self) -> Vec<SlotCommand> {
        use SlotCommand::*;
        match self {
            SlotState::Empty => vec![Book],
            SlotState::Booked => vec![Confirm, Deconfirm, Cancel],
            SlotState::Confirmed => vec![Confirm, Deconfirm, Cancel],
        }
    }
}

impl SlotState {
    /// State of a stored appointment from its confirmation flag
    pub fn of_appointment(is_confirmed: bool) -> Self {
        if is_confirmed {
            SlotState::Confirmed
        } else {
            SlotState::Booked
        }
    }
}
