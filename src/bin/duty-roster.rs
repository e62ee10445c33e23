// Copyright (c) 2025 - Cowboy AI, Inc.
//! Duty Roster Preview
//!
//! Prints the computed duty rotation for the coming days so the office can
//! sanity-check the schedule without opening the board.
//!
//! Run with: cargo run --bin duty-roster
//!
//! Environment:
//! - BOARD_START_DATE: first date to print, YYYY-MM-DD (default: today)
//! - BOARD_DAYS: how many days to print (default: 14)

use agenda_board::config::BoardConfig;
use agenda_board::rotation::{Assignment, RotationCalculator};
use agenda_board::DateKey;
use anyhow::{Context, Result};
use chrono::{Duration, Local};
use tracing::info;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = BoardConfig::default();
    let calculator = RotationCalculator::new(config.rotation.epoch, config.rotation.sequence);

    let start = match std::env::var("BOARD_START_DATE") {
        Ok(raw) => DateKey::parse(&raw).context("BOARD_START_DATE must be YYYY-MM-DD")?,
        Err(_) => DateKey::new(Local::now().date_naive()),
    };
    let days: i64 = std::env::var("BOARD_DAYS")
        .unwrap_or_else(|_| "14".to_string())
        .parse()
        .context("BOARD_DAYS must be a number")?;

    info!(start = %start, days, "printing duty roster");

    for offset in 0..days {
        let date = DateKey::new(start.date() + Duration::days(offset));
        match calculator.assignment_for(&date) {
            Assignment::Assigned(agent) => println!("{date}  {agent}"),
            Assignment::Weekend => println!("{date}  -- weekend --"),
            Assignment::Paused | Assignment::Unavailable => println!("{date}  (no assignment)"),
        }
    }

    Ok(())
}
