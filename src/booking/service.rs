// Copyright (c) 2025 - Cowboy AI, Inc.
//! Booking Service
//!
//! Store-facing booking operations. Every mutation decides its slot
//! transition with the pure lifecycle FSM and the role guards first, then
//! performs the storage write only when the transition is valid. Creation
//! goes through a conditional field write, so two agents racing for the same
//! slot resolve first-writer-wins inside the store.

use crate::booking::capture::SlotRef;
use crate::booking::guards::{
    can_book, can_cancel, can_toggle_confirmation, requires_delegate_capture,
};
use crate::booking::slot_lifecycle::{SlotCommand, SlotState};
use crate::booking::state_machine::StateMachine;
use crate::domain::{
    calendar_days_from_docs, day_bookings_from_doc, AgentProfile, Appointment, CalendarDays,
    CalendarId,
};
use crate::errors::{BoardError, BoardResult};
use crate::store::paths::{appointments_collection, day_doc};
use crate::store::{DocumentStore, Subscription, WatchTarget};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

/// Proof that the cancellation dialog was acknowledged
///
/// Cancellation is the one destructive slot operation, so the API demands an
/// explicit token instead of a bare call.
#[derive(Debug, Clone, Copy)]
pub struct ConfirmedCancellation;

/// Booking operations over a document store
#[derive(Debug, Clone)]
pub struct BookingService<S: DocumentStore> {
    store: Arc<S>,
    shared_calendar: CalendarId,
}

impl<S: DocumentStore> BookingService<S> {
    pub fn new(store: Arc<S>, shared_calendar: CalendarId) -> Self {
        Self {
            store,
            shared_calendar,
        }
    }

    pub fn shared_calendar(&self) -> &CalendarId {
        &self.shared_calendar
    }

    /// Book a slot for the acting agent themselves
    pub async fn book(
        &self,
        actor: &AgentProfile,
        slot: &SlotRef,
        now: DateTime<Utc>,
    ) -> BoardResult<()> {
        self.check_bookable(actor, slot)?;
        if requires_delegate_capture(actor, &slot.calendar, &self.shared_calendar) {
            return Err(BoardError::Validation(format!(
                "{} books on {} through delegate capture",
                actor.name, slot.calendar
            )));
        }
        let appointment = Appointment {
            agent_name: actor.name.clone(),
            color: actor.color.clone(),
            time: slot.time,
            is_confirmed: false,
            created_at: now,
            selected_agent: None,
            client_name: None,
        };
        self.put_new(slot, &appointment).await?;
        info!(agent = %actor.name, calendar = %slot.calendar, date = %slot.date, time = %slot.time, "slot booked");
        Ok(())
    }

    /// Book a shared-calendar slot on behalf of another agent.
    ///
    /// Liaison only; the delegate and client come out of a completed capture
    /// session. The appointment carries the delegate's color so the board
    /// shows who the slot is really for.
    pub async fn book_with_delegate(
        &self,
        actor: &AgentProfile,
        slot: &SlotRef,
        delegate: &AgentProfile,
        client_name: &str,
        now: DateTime<Utc>,
    ) -> BoardResult<()> {
        self.check_bookable(actor, slot)?;
        if !requires_delegate_capture(actor, &slot.calendar, &self.shared_calendar) {
            return Err(BoardError::PermissionDenied(format!(
                "{} may not make delegate bookings on {}",
                actor.name, slot.calendar
            )));
        }
        let client = client_name.trim();
        if client.is_empty() {
            return Err(BoardError::Validation("client name is required".into()));
        }
        let appointment = Appointment {
            agent_name: actor.name.clone(),
            color: delegate.color.clone(),
            time: slot.time,
            is_confirmed: false,
            created_at: now,
            selected_agent: Some(delegate.name.clone()),
            client_name: Some(client.to_string()),
        };
        self.put_new(slot, &appointment).await?;
        info!(
            agent = %actor.name,
            delegate = %delegate.name,
            date = %slot.date,
            time = %slot.time,
            "delegate slot booked"
        );
        Ok(())
    }

    /// Cancel an appointment. Owner only; the token attests the destructive
    /// confirmation dialog.
    pub async fn cancel(
        &self,
        actor: &AgentProfile,
        slot: &SlotRef,
        _ack: ConfirmedCancellation,
    ) -> BoardResult<()> {
        let path = day_doc(&slot.calendar, &slot.date);
        let mut doc = self
            .store
            .read_once(&path)
            .await?
            .ok_or_else(|| BoardError::NotFound(format!("no bookings on {}", slot.date)))?;
        let field = slot.time.to_string();
        let appointment: Appointment = match doc.remove(&field) {
            Some(value) => serde_json::from_value(value)?,
            None => {
                return Err(BoardError::NotFound(format!(
                    "no appointment at {} on {}",
                    slot.time, slot.date
                )))
            }
        };
        if !can_cancel(actor, &appointment) {
            return Err(BoardError::PermissionDenied(format!(
                "{} may not cancel {}'s appointment",
                actor.name, appointment.agent_name
            )));
        }
        // last slot of the day removes the whole document
        if doc.is_empty() {
            self.store.delete(&path).await?;
        } else {
            self.store.write_replace(&path, doc).await?;
        }
        info!(agent = %actor.name, calendar = %slot.calendar, date = %slot.date, time = %slot.time, "slot cancelled");
        Ok(())
    }

    /// Confirm an appointment. Returns whether stored state changed;
    /// confirming an already-confirmed slot succeeds without a write.
    pub async fn confirm(&self, actor: &AgentProfile, slot: &SlotRef) -> BoardResult<bool> {
        self.toggle_confirmation(actor, slot, SlotCommand::Confirm)
            .await
    }

    /// Remove the confirmation flag. Idempotent like [`Self::confirm`].
    pub async fn deconfirm(&self, actor: &AgentProfile, slot: &SlotRef) -> BoardResult<bool> {
        self.toggle_confirmation(actor, slot, SlotCommand::Deconfirm)
            .await
    }

    /// Watch all appointment documents of one calendar
    pub async fn subscribe_calendar(&self, calendar: &CalendarId) -> BoardResult<Subscription> {
        self.store
            .subscribe(WatchTarget::Collection(appointments_collection(calendar)))
            .await
    }

    /// Decoded current contents of one calendar
    pub async fn calendar_days(&self, calendar: &CalendarId) -> BoardResult<CalendarDays> {
        let docs = self
            .store
            .read_collection(&appointments_collection(calendar))
            .await?;
        calendar_days_from_docs(&docs)
    }

    fn check_bookable(&self, actor: &AgentProfile, slot: &SlotRef) -> BoardResult<()> {
        if slot.calendar.is_empty() {
            return Err(BoardError::Validation("calendar id is required".into()));
        }
        if actor.name.is_empty() {
            return Err(BoardError::Validation("agent name is required".into()));
        }
        if !can_book(actor, &slot.calendar, &self.shared_calendar) {
            return Err(BoardError::PermissionDenied(format!(
                "{} may not book on {}",
                actor.name, slot.calendar
            )));
        }
        Ok(())
    }

    async fn put_new(&self, slot: &SlotRef, appointment: &Appointment) -> BoardResult<()> {
        let path = day_doc(&slot.calendar, &slot.date);
        let field = slot.time.to_string();
        let value = serde_json::to_value(appointment)?;
        let created = self
            .store
            .create_field_if_absent(&path, &field, value)
            .await?;
        if !created {
            return Err(BoardError::Conflict(format!(
                "slot {} on {} is already booked",
                slot.time, slot.date
            )));
        }
        Ok(())
    }

    async fn toggle_confirmation(
        &self,
        actor: &AgentProfile,
        slot: &SlotRef,
        command: SlotCommand,
    ) -> BoardResult<bool> {
        let path = day_doc(&slot.calendar, &slot.date);
        let doc = self
            .store
            .read_once(&path)
            .await?
            .ok_or_else(|| BoardError::NotFound(format!("no bookings on {}", slot.date)))?;
        let slots = day_bookings_from_doc(&doc)?;
        let mut appointment = slots
            .get(&slot.time)
            .cloned()
            .ok_or_else(|| {
                BoardError::NotFound(format!("no appointment at {} on {}", slot.time, slot.date))
            })?;
        if !can_toggle_confirmation(actor, &appointment, &slot.calendar, &self.shared_calendar) {
            return Err(BoardError::PermissionDenied(format!(
                "{} may not manage confirmation at {} on {}",
                actor.name, slot.time, slot.date
            )));
        }

        let state = SlotState::of_appointment(appointment.is_confirmed);
        let (next, output) = state
            .transition(&command)
            .map_err(|e| BoardError::Validation(e.to_string()))?;
        if !output.changed {
            return Ok(false);
        }

        appointment.is_confirmed = next == SlotState::Confirmed;
        let mut fields = serde_json::Map::new();
        fields.insert(slot.time.to_string(), serde_json::to_value(&appointment)?);
        self.store.write_merged(&path, fields).await?;
        info!(
            agent = %actor.name,
            date = %slot.date,
            time = %slot.time,
            confirmed = appointment.is_confirmed,
            "confirmation toggled"
        );
        Ok(true)
    }
}
