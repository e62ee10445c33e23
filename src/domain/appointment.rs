// Copyright (c) 2025 - Cowboy AI, Inc.
//! Appointment Records and Snapshot Shapes
//!
//! An appointment occupies exactly one (calendar, date, time) cell. The store
//! keeps one document per (calendar, date) with one field per slot time, so a
//! calendar snapshot decodes into nested ordered maps:
//!
//! ```text
//! CalendarId → DateKey → SlotTime → Appointment
//! ```
//!
//! Consumers always recompute derived values from the latest full snapshot;
//! nothing in this crate patches snapshots incrementally.

use crate::domain::agent::AgentName;
use crate::domain::calendar::CalendarId;
use crate::domain::keys::{DateKey, SlotTime};
use crate::errors::{BoardError, BoardResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

/// One booked slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// The agent who made the booking (always the acting user, even for
    /// delegate bookings)
    pub agent_name: AgentName,

    /// Display color for the cell
    pub color: String,

    pub time: SlotTime,

    /// Confirmation flag, toggled in place
    #[serde(default)]
    pub is_confirmed: bool,

    pub created_at: DateTime<Utc>,

    /// Agent the booking was made on behalf of (liaison bookings only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_agent: Option<AgentName>,

    /// Client the delegate booking is for (liaison bookings only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
}

impl Appointment {
    /// The agent name widgets should display: the delegate when present,
    /// otherwise the booking agent
    pub fn effective_agent(&self) -> &AgentName {
        self.selected_agent.as_ref().unwrap_or(&self.agent_name)
    }

    pub fn is_delegate_booking(&self) -> bool {
        self.selected_agent.is_some()
    }
}

/// Booked slots of one calendar day, ordered by time
pub type DayBookings = BTreeMap<SlotTime, Appointment>;

/// All days of one calendar, ordered by date
pub type CalendarDays = BTreeMap<DateKey, DayBookings>;

/// Latest known snapshot per calendar
///
/// Calendars whose initial snapshot has not arrived yet are simply absent and
/// read as empty; subscriptions across calendars carry no ordering guarantee.
#[derive(Debug, Clone, Default)]
pub struct BoardSnapshot {
    calendars: HashMap<CalendarId, CalendarDays>,
}

impl BoardSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the full snapshot of one calendar
    pub fn apply(&mut self, calendar: CalendarId, days: CalendarDays) {
        self.calendars.insert(calendar, days);
    }

    pub fn calendar(&self, calendar: &CalendarId) -> Option<&CalendarDays> {
        self.calendars.get(calendar)
    }

    /// Booked slots for one day; absent calendar or date reads as empty
    pub fn day(&self, calendar: &CalendarId, date: &DateKey) -> Option<&DayBookings> {
        self.calendars.get(calendar).and_then(|days| days.get(date))
    }

    pub fn appointment(
        &self,
        calendar: &CalendarId,
        date: &DateKey,
        time: &SlotTime,
    ) -> Option<&Appointment> {
        self.day(calendar, date).and_then(|slots| slots.get(time))
    }
}

/// Decode one date document (slot-time field → appointment) into day bookings
pub fn day_bookings_from_doc(doc: &Map<String, Value>) -> BoardResult<DayBookings> {
    let mut slots = DayBookings::new();
    for (slot_id, value) in doc {
        let time: SlotTime = slot_id
            .parse()
            .map_err(|e| BoardError::Serialization(format!("bad slot id {slot_id}: {e}")))?;
        let appointment: Appointment = serde_json::from_value(value.clone())?;
        slots.insert(time, appointment);
    }
    Ok(slots)
}

/// Decode a full appointments collection (date id → date document)
pub fn calendar_days_from_docs(
    docs: &BTreeMap<String, Map<String, Value>>,
) -> BoardResult<CalendarDays> {
    let mut days = CalendarDays::new();
    for (date_id, doc) in docs {
        let date = DateKey::parse(date_id)
            .map_err(|e| BoardError::Serialization(format!("bad date id {date_id}: {e}")))?;
        days.insert(date, day_bookings_from_doc(doc)?);
    }
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn appointment(agent: &str) -> Appointment {
        Appointment {
            agent_name: AgentName::new(agent),
            color: "#FFA500".to_string(),
            time: SlotTime::hm(9, 30),
            is_confirmed: false,
            created_at: Utc.with_ymd_and_hms(2024, 1, 8, 8, 0, 0).unwrap(),
            selected_agent: None,
            client_name: None,
        }
    }

    #[test]
    fn effective_agent_prefers_delegate() {
        let mut appt = appointment("Catalina");
        assert_eq!(appt.effective_agent().as_str(), "Catalina");

        appt.selected_agent = Some(AgentName::new("Florin"));
        appt.client_name = Some("Popescu Ion".to_string());
        assert_eq!(appt.effective_agent().as_str(), "Florin");
        assert!(appt.is_delegate_booking());
    }

    #[test]
    fn appointment_serde_uses_store_field_names() {
        let appt = appointment("Andreea");
        let value = serde_json::to_value(&appt).unwrap();
        assert_eq!(value["agentName"], "Andreea");
        assert_eq!(value["isConfirmed"], false);
        assert_eq!(value["time"], "09:30");
        // delegate fields omitted entirely when unset
        assert!(value.get("selectedAgent").is_none());
        assert!(value.get("clientName").is_none());
    }

    #[test]
    fn confirmed_flag_defaults_to_false_on_decode() {
        let value = serde_json::json!({
            "agentName": "Voicu",
            "color": "#3498DB",
            "time": "10:00",
            "createdAt": "2024-01-08T08:00:00Z",
        });
        let appt: Appointment = serde_json::from_value(value).unwrap();
        assert!(!appt.is_confirmed);
    }

    #[test]
    fn snapshot_reads_missing_calendar_as_empty() {
        let snapshot = BoardSnapshot::new();
        let calendar = CalendarId::new("Cristina");
        let date = DateKey::parse("2024-01-08").unwrap();
        assert!(snapshot.day(&calendar, &date).is_none());
        assert!(snapshot
            .appointment(&calendar, &date, &SlotTime::hm(9, 30))
            .is_none());
    }

    #[test]
    fn decode_rejects_bad_slot_ids() {
        let mut doc = Map::new();
        doc.insert("9am".to_string(), serde_json::json!({}));
        assert!(day_bookings_from_doc(&doc).is_err());
    }

    #[test]
    fn decode_collection_round_trip() {
        let mut doc = Map::new();
        doc.insert(
            "09:30".to_string(),
            serde_json::to_value(appointment("Dida")).unwrap(),
        );
        let mut docs = BTreeMap::new();
        docs.insert("2024-01-08".to_string(), doc);

        let days = calendar_days_from_docs(&docs).unwrap();
        let date = DateKey::parse("2024-01-08").unwrap();
        let slots = days.get(&date).unwrap();
        assert_eq!(slots.len(), 1);
        assert_eq!(
            slots.get(&SlotTime::hm(9, 30)).unwrap().agent_name.as_str(),
            "Dida"
        );
    }
}
