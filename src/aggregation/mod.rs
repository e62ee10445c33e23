// Copyright (c) 2025 - Cowboy AI, Inc.
//! Widget Aggregations
//!
//! The dashboard widgets never patch state incrementally: each calendar
//! subscription delivers full snapshots and the widgets recompute from the
//! latest one. The computations themselves are pure functions over
//! [`crate::domain::BoardSnapshot`]; the engine adds the snapshot cache and
//! the subscription plumbing.

pub mod engine;
pub mod next_day;
pub mod today;

pub use engine::{spawn_calendar_feeds, AggregationEngine};
pub use next_day::next_day_counts;
pub use today::{today_overview, NextAppointment, TodayOverview};
