// Copyright (c) 2025 - Cowboy AI, Inc.
//! Next-Working-Day Appointment Counts
//!
//! Pure computation over a board snapshot: how many slots each calendar has
//! booked for the next working day. On Friday the widget already looks at
//! Monday.

use crate::domain::{BoardSnapshot, CalendarId, DateKey};
use std::collections::BTreeMap;

/// Appointment counts per calendar for the next working day after `today`.
///
/// Calendars without bookings (or without a snapshot yet) count as zero so
/// the widget always shows every configured calendar.
pub fn next_day_counts(
    snapshot: &BoardSnapshot,
    calendars: &[CalendarId],
    today: &DateKey,
) -> BTreeMap<CalendarId, usize> {
    let target = today.next_working_day();
    calendars
        .iter()
        .map(|calendar| {
            let count = snapshot
                .day(calendar, &target)
                .map(|slots| slots.len())
                .unwrap_or(0);
            (calendar.clone(), count)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AgentName, Appointment, CalendarDays, DayBookings, SlotTime};
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn booked_day(times: &[SlotTime]) -> DayBookings {
        times
            .iter()
            .map(|time| {
                (
                    *time,
                    Appointment {
                        agent_name: AgentName::new("Dida"),
                        color: "#808080".to_string(),
                        time: *time,
                        is_confirmed: false,
                        created_at: Utc::now(),
                        selected_agent: None,
                        client_name: None,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn counts_cover_every_configured_calendar() {
        let calendars = vec![CalendarId::new("Andreea"), CalendarId::new("Cristina")];
        let monday = DateKey::parse("2024-01-08").unwrap();

        let mut snapshot = BoardSnapshot::new();
        let mut days = CalendarDays::new();
        days.insert(monday, booked_day(&[SlotTime::hm(9, 30), SlotTime::hm(10, 0)]));
        snapshot.apply(CalendarId::new("Andreea"), days);

        let friday = DateKey::parse("2024-01-05").unwrap();
        let counts = next_day_counts(&snapshot, &calendars, &friday);
        assert_eq!(counts[&CalendarId::new("Andreea")], 2);
        // no snapshot at all still reads as zero
        assert_eq!(counts[&CalendarId::new("Cristina")], 0);
    }

    #[test]
    fn friday_looks_at_monday() {
        let calendar = CalendarId::new("Andreea");
        let friday = DateKey::parse("2024-01-05").unwrap();
        let saturday = DateKey::parse("2024-01-06").unwrap();
        let monday = DateKey::parse("2024-01-08").unwrap();

        let mut snapshot = BoardSnapshot::new();
        let mut days = CalendarDays::new();
        days.insert(saturday, booked_day(&[SlotTime::hm(9, 30)]));
        days.insert(monday, booked_day(&[SlotTime::hm(10, 0)]));
        snapshot.apply(calendar.clone(), days);

        let counts = next_day_counts(&snapshot, &[calendar.clone()], &friday);
        // only Monday's booking counts; the Saturday entry is skipped
        assert_eq!(counts[&calendar], 1);
    }
}
