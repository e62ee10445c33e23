//! Scheduling board core for a shared sales office
//!
//! This crate provides the board's building blocks: slot bookings on shared
//! calendars, the duty-agent rotation with pause and override controls,
//! snapshot-based widget aggregations, money ledgers, the client message
//! generator, and the weekly purge.

pub mod aggregation;
pub mod booking;
pub mod cleanup;
pub mod config;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod message;
pub mod rotation;
pub mod store;

// Re-export commonly used types
pub use booking::{BookingService, ConfirmedCancellation, SlotRef};
pub use config::BoardConfig;
pub use domain::{AgentName, AgentProfile, Appointment, CalendarId, DateKey, Role, SlotTime};
pub use errors::{BoardError, BoardResult};
pub use rotation::{Assignment, RotationCalculator, RotationStore};
pub use store::{DocumentStore, MemoryStore};
