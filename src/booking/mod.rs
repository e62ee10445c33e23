// Copyright (c) 2025 - Cowboy AI, Inc.
//! Slot Booking
//!
//! Booking is modeled as two pure state machines plus a store-facing
//! service. The slot lifecycle FSM governs what a single slot may do next;
//! the capture session FSM governs the liaison's delegate flow on the shared
//! calendar; role guards decide who may trigger which transition. The
//! service wires the three to the document store.

pub mod capture;
pub mod guards;
pub mod service;
pub mod slot_lifecycle;
pub mod state_machine;

pub use capture::{CaptureSession, CaptureState, SlotRef};
pub use service::{BookingService, ConfirmedCancellation};
pub use slot_lifecycle::{SlotCommand, SlotOutput, SlotState};
pub use state_machine::{StateMachine, TransitionError, TransitionResult};
