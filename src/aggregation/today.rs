// Copyright (c) 2025 - Cowboy AI, Inc.
//! Today Overview
//!
//! Pure computation over a board snapshot: the next upcoming appointment per
//! calendar and how far through today's booked slots the office is.

use crate::domain::{AgentName, BoardSnapshot, CalendarId, DateKey, SlotTime};
use std::collections::BTreeMap;

/// The next upcoming appointment on one calendar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextAppointment {
    pub time: SlotTime,

    /// The displayed agent: the delegate when the booking was made on
    /// someone's behalf
    pub agent: AgentName,
}

/// Today's widget state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodayOverview {
    /// Next appointment per calendar; `None` when nothing is left today
    pub next: BTreeMap<CalendarId, Option<NextAppointment>>,

    /// Completed share of today's booked slots across all calendars,
    /// rounded to whole percent. Zero when nothing is booked.
    pub progress_percent: u8,
}

/// Compute the today widget from a snapshot.
///
/// A slot is upcoming when its time is strictly after `now`; a slot whose
/// time has arrived counts as completed.
pub fn today_overview(
    snapshot: &BoardSnapshot,
    calendars: &[CalendarId],
    today: &DateKey,
    now: SlotTime,
) -> TodayOverview {
    let mut next = BTreeMap::new();
    let mut total = 0usize;
    let mut completed = 0usize;

    for calendar in calendars {
        let slots = snapshot.day(calendar, today);
        let upcoming = slots.and_then(|slots| {
            slots
                .iter()
                .find(|(time, _)| **time > now)
                .map(|(time, appointment)| NextAppointment {
                    time: *time,
                    agent: appointment.effective_agent().clone(),
                })
        });
        next.insert(calendar.clone(), upcoming);

        if let Some(slots) = slots {
            total += slots.len();
            completed += slots.keys().filter(|time| **time <= now).count();
        }
    }

    let progress_percent = if total == 0 {
        0
    } else {
        ((completed as f64 / total as f64) * 100.0).round() as u8
    };

    TodayOverview {
        next,
        progress_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Appointment, CalendarDays, DayBookings};
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn appointment(agent: &str, time: SlotTime, delegate: Option<&str>) -> Appointment {
        Appointment {
            agent_name: AgentName::new(agent),
            color: "#808080".to_string(),
            time,
            is_confirmed: false,
            created_at: Utc::now(),
            selected_agent: delegate.map(AgentName::new),
            client_name: delegate.map(|_| "Popescu Ion".to_string()),
        }
    }

    fn snapshot_with(calendar: &CalendarId, date: DateKey, slots: DayBookings) -> BoardSnapshot {
        let mut snapshot = BoardSnapshot::new();
        let mut days = CalendarDays::new();
        days.insert(date, slots);
        snapshot.apply(calendar.clone(), days);
        snapshot
    }

    #[test]
    fn next_is_strictly_after_now() {
        let calendar = CalendarId::new("Andreea");
        let today = DateKey::parse("2024-01-08").unwrap();
        let mut slots = DayBookings::new();
        slots.insert(SlotTime::hm(9, 30), appointment("Dida", SlotTime::hm(9, 30), None));
        slots.insert(SlotTime::hm(11, 0), appointment("Florin", SlotTime::hm(11, 0), None));
        let snapshot = snapshot_with(&calendar, today, slots);

        // a slot starting exactly now is already underway
        let overview = today_overview(&snapshot, &[calendar.clone()], &today, SlotTime::hm(9, 30));
        let next = overview.next[&calendar].as_ref().unwrap();
        assert_eq!(next.time, SlotTime::hm(11, 0));
        assert_eq!(next.agent, AgentName::new("Florin"));
        assert_eq!(overview.progress_percent, 50);
    }

    #[test]
    fn delegate_bookings_display_the_delegate() {
        let calendar = CalendarId::new("SHARED_CREDIT");
        let today = DateKey::parse("2024-01-08").unwrap();
        let mut slots = DayBookings::new();
        slots.insert(
            SlotTime::hm(14, 0),
            appointment("Catalina", SlotTime::hm(14, 0), Some("Florin")),
        );
        let snapshot = snapshot_with(&calendar, today, slots);

        let overview = today_overview(&snapshot, &[calendar.clone()], &today, SlotTime::hm(9, 0));
        let next = overview.next[&calendar].as_ref().unwrap();
        assert_eq!(next.agent, AgentName::new("Florin"));
    }

    #[test]
    fn empty_day_has_zero_progress_and_no_next() {
        let calendar = CalendarId::new("Andreea");
        let today = DateKey::parse("2024-01-08").unwrap();
        let overview = today_overview(
            &BoardSnapshot::new(),
            &[calendar.clone()],
            &today,
            SlotTime::hm(12, 0),
        );
        assert_eq!(overview.next[&calendar], None);
        assert_eq!(overview.progress_percent, 0);
    }

    #[test]
    fn progress_rounds_to_whole_percent() {
        let calendar = CalendarId::new("Andreea");
        let today = DateKey::parse("2024-01-08").unwrap();
        let mut slots = DayBookings::new();
        for time in [SlotTime::hm(9, 30), SlotTime::hm(10, 0), SlotTime::hm(15, 0)] {
            slots.insert(time, appointment("Dida", time, None));
        }
        let snapshot = snapshot_with(&calendar, today, slots);

        // one of three completed: 33.33 rounds to 33
        let overview = today_overview(&snapshot, &[calendar.clone()], &today, SlotTime::hm(9, 45));
        assert_eq!(overview.progress_percent, 33);

        // two of three: 66.67 rounds to 67
        let overview = today_overview(&snapshot, &[calendar.clone()], &today, SlotTime::hm(10, 30));
        assert_eq!(overview.progress_percent, 67);
    }
}
