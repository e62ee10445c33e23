// Copyright (c) 2025 - Cowboy AI, Inc.
//! Weekly Appointment Purge
//!
//! Appointment documents older than the previous ISO week are deleted on a
//! weekly sweep. Document ids are zero-padded dates, so the age test is a
//! plain string comparison against the cutoff id.

use crate::domain::{CalendarId, DateKey};
use crate::errors::BoardResult;
use crate::store::paths::{appointments_collection, day_doc};
use crate::store::{DocumentStore, WriteOp};
use chrono::{Datelike, Duration};
use tracing::info;

/// First date that survives a purge run on `today`: the Monday of the
/// previous ISO week. Everything strictly before it goes.
pub fn purge_cutoff(today: &DateKey) -> DateKey {
    let date = today.date();
    let week_start = date - Duration::days(date.weekday().num_days_from_monday() as i64);
    DateKey::new(week_start - Duration::days(7))
}

/// Delete appointment documents older than the cutoff on every calendar.
///
/// Returns the number of deleted documents. Each calendar's deletions go
/// through one batch commit so its subscribers see a single snapshot.
pub async fn purge_old_appointments<S: DocumentStore>(
    store: &S,
    calendars: &[CalendarId],
    today: &DateKey,
) -> BoardResult<usize> {
    let cutoff = purge_cutoff(today).to_string();
    let mut removed = 0;

    for calendar in calendars {
        let ids = store
            .list_document_ids(&appointments_collection(calendar))
            .await?;
        let stale: Vec<WriteOp> = ids
            .into_iter()
            .filter(|id| id.as_str() < cutoff.as_str())
            .filter_map(|id| DateKey::parse(&id).ok())
            .map(|date| WriteOp::Delete {
                path: day_doc(calendar, &date),
            })
            .collect();
        if stale.is_empty() {
            continue;
        }
        removed += stale.len();
        let count = stale.len();
        store.batch_commit(stale).await?;
        info!(calendar = %calendar, count, cutoff = %cutoff, "purged old appointment days");
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{DocPath, MemoryStore};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use test_case::test_case;

    // 2024-01-17 is a Wednesday; its week starts Monday 2024-01-15
    #[test_case("2024-01-17", "2024-01-08"; "midweek")]
    #[test_case("2024-01-15", "2024-01-08"; "monday itself")]
    #[test_case("2024-01-21", "2024-01-08"; "sunday still counts to the same week")]
    fn cutoff_is_monday_of_previous_week(today: &str, expected: &str) {
        let cutoff = purge_cutoff(&DateKey::parse(today).unwrap());
        assert_eq!(cutoff.to_string(), expected);
    }

    #[tokio::test]
    async fn purge_removes_only_documents_before_the_cutoff() {
        let store = MemoryStore::new();
        let calendar = CalendarId::new("Andreea");
        let collection = appointments_collection(&calendar);

        for id in ["2024-01-03", "2024-01-05", "2024-01-08", "2024-01-16"] {
            store
                .write_replace(
                    &DocPath::new(&collection, id),
                    [("09:30".to_string(), json!({"agentName": "Dida"}))]
                        .into_iter()
                        .collect(),
                )
                .await
                .unwrap();
        }

        let today = DateKey::parse("2024-01-17").unwrap();
        let removed = purge_old_appointments(&store, &[calendar.clone()], &today)
            .await
            .unwrap();
        assert_eq!(removed, 2);

        let remaining = store.list_document_ids(&collection).await.unwrap();
        assert_eq!(remaining, vec!["2024-01-08", "2024-01-16"]);
    }

    #[tokio::test]
    async fn purge_of_an_empty_board_is_a_no_op() {
        let store = MemoryStore::new();
        let today = DateKey::parse("2024-01-17").unwrap();
        let removed = purge_old_appointments(&store, &[CalendarId::new("Andreea")], &today)
            .await
            .unwrap();
        assert_eq!(removed, 0);
    }
}
