// Copyright (c) 2025 - Cowboy AI, Inc.
//! Core Domain Types
//!
//! Value objects shared across the crate: agents and their roles, calendar
//! ids, date/time slot keys, and appointment records with the snapshot shapes
//! derived from them.

pub mod agent;
pub mod appointment;
pub mod calendar;
pub mod keys;

pub use agent::{AgentName, AgentProfile, LoginError, Role, Roster};
pub use appointment::{
    calendar_days_from_docs, day_bookings_from_doc, Appointment, BoardSnapshot, CalendarDays,
    DayBookings,
};
pub use calendar::CalendarId;
pub use keys::{DateKey, KeyError, SlotTime};
