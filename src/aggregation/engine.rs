// Copyright (c) 2025 - Cowboy AI, Inc.
//! Aggregation Engine
//!
//! Holds the latest full snapshot of every watched calendar and answers the
//! widget queries from it. Store subscriptions are drained by background
//! tasks that forward decoded calendar snapshots over a channel; the engine
//! itself stays synchronous so widgets recompute from consistent state.
//!
//! ```text
//! store subscriptions ──► feed tasks ──► (CalendarId, CalendarDays) channel
//!                                              │
//!                                     engine.apply_calendar()
//!                                              │
//!                            next_day_counts() / today_overview()
//! ```

use crate::aggregation::next_day::next_day_counts;
use crate::aggregation::today::{today_overview, TodayOverview};
use crate::domain::{calendar_days_from_docs, BoardSnapshot, CalendarDays, CalendarId, DateKey, SlotTime};
use crate::errors::BoardResult;
use crate::store::paths::appointments_collection;
use crate::store::{DocumentStore, SnapshotEvent, WatchTarget};
use futures::future::try_join_all;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Snapshot-holding widget aggregator
#[derive(Debug, Clone)]
pub struct AggregationEngine {
    snapshot: BoardSnapshot,
    calendars: Vec<CalendarId>,
}

impl AggregationEngine {
    /// Build an engine over the calendars the widgets cover
    pub fn new(calendars: Vec<CalendarId>) -> Self {
        Self {
            snapshot: BoardSnapshot::new(),
            calendars,
        }
    }

    pub fn calendars(&self) -> &[CalendarId] {
        &self.calendars
    }

    /// Replace one calendar's snapshot with a fresh decode
    pub fn apply_calendar(&mut self, calendar: CalendarId, days: CalendarDays) {
        debug!(calendar = %calendar, days = days.len(), "calendar snapshot applied");
        self.snapshot.apply(calendar, days);
    }

    /// Appointment counts per calendar for the next working day
    pub fn next_day_counts(&self, today: &DateKey) -> BTreeMap<CalendarId, usize> {
        next_day_counts(&self.snapshot, &self.calendars, today)
    }

    /// Next appointments and completion progress for today
    pub fn today_overview(&self, today: &DateKey, now: SlotTime) -> TodayOverview {
        today_overview(&self.snapshot, &self.calendars, today, now)
    }
}

/// Subscribe to every calendar and forward decoded snapshots.
///
/// One task per calendar drains its subscription for as long as the store
/// keeps it alive; dropping the receiver ends the tasks. Snapshots that fail
/// to decode are logged and skipped, leaving the previous state in place.
pub async fn spawn_calendar_feeds<S: DocumentStore>(
    store: &S,
    calendars: &[CalendarId],
) -> BoardResult<mpsc::UnboundedReceiver<(CalendarId, CalendarDays)>> {
    let (tx, rx) = mpsc::unbounded_channel();
    let subscriptions = try_join_all(calendars.iter().map(|calendar| {
        store.subscribe(WatchTarget::Collection(appointments_collection(calendar)))
    }))
    .await?;
    for (calendar, mut subscription) in calendars.iter().zip(subscriptions) {
        let tx = tx.clone();
        let calendar = calendar.clone();
        tokio::spawn(async move {
            while let Some(event) = subscription.next().await {
                let SnapshotEvent::Collection { docs, .. } = event else {
                    continue;
                };
                match calendar_days_from_docs(&docs) {
                    Ok(days) => {
                        if tx.send((calendar.clone(), days)).is_err() {
                            break;
                        }
                    }
                    Err(e) => warn!(calendar = %calendar, error = %e, "undecodable calendar snapshot"),
                }
            }
        });
    }
    Ok(rx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{BookingService, SlotRef};
    use crate::domain::{AgentName, AgentProfile, Role};
    use crate::store::MemoryStore;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn profile(name: &str) -> AgentProfile {
        AgentProfile {
            name: AgentName::new(name),
            team: CalendarId::new("Andreea"),
            color: "#808080".to_string(),
            role: Role::Agent,
            secret: String::new(),
        }
    }

    #[tokio::test]
    async fn feeds_deliver_initial_and_updated_snapshots() {
        let store = Arc::new(MemoryStore::new());
        let calendar = CalendarId::new("Andreea");
        let service = BookingService::new(store.clone(), CalendarId::new("SHARED_CREDIT"));

        let mut rx = spawn_calendar_feeds(store.as_ref(), &[calendar.clone()])
            .await
            .unwrap();
        let mut engine = AggregationEngine::new(vec![calendar.clone()]);

        // initial (empty) snapshot arrives before any booking
        let (from, days) = rx.recv().await.unwrap();
        assert_eq!(from, calendar);
        assert!(days.is_empty());
        engine.apply_calendar(from, days);

        let monday = DateKey::parse("2024-01-08").unwrap();
        service
            .book(
                &profile("Dida"),
                &SlotRef {
                    calendar: calendar.clone(),
                    date: monday,
                    time: SlotTime::hm(9, 30),
                },
                Utc::now(),
            )
            .await
            .unwrap();

        let (from, days) = rx.recv().await.unwrap();
        engine.apply_calendar(from, days);

        let friday = DateKey::parse("2024-01-05").unwrap();
        assert_eq!(engine.next_day_counts(&friday)[&calendar], 1);
    }

    #[tokio::test]
    async fn widgets_tolerate_missing_calendars() {
        let engine = AggregationEngine::new(vec![CalendarId::new("Andreea")]);
        let monday = DateKey::parse("2024-01-08").unwrap();
        assert_eq!(engine.next_day_counts(&monday)[&CalendarId::new("Andreea")], 0);
        let overview = engine.today_overview(&monday, SlotTime::hm(12, 0));
        assert_eq!(overview.progress_percent, 0);
    }
}
