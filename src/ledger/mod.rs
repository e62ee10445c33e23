// Copyright (c) 2025 - Cowboy AI, Inc.
//! Money Ledgers
//!
//! Two small accounting surfaces: per-agent debt balances with a short-lived
//! event history, and teambuilding contribution standings.

pub mod contributions;
pub mod debts;

pub use contributions::{ContributionLedger, Standings};
pub use debts::{DebtEvent, DebtEventKind, DebtLedger};
