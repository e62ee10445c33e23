// Copyright (c) 2025 - Cowboy AI, Inc.
//! Rotation Persistence and Overrides
//!
//! Store-facing side of the rotation: reads and writes the persisted
//! per-date assignments and the singleton pause flag, runs the pure resolver
//! over them, and applies the role-guarded override arrows and pause toggle.

use crate::booking::guards::{can_override_rotation, can_toggle_pause};
use crate::domain::{AgentName, AgentProfile, DateKey};
use crate::errors::{BoardError, BoardResult};
use crate::rotation::{resolve, Assignment, RotationCalculator};
use crate::store::paths::{assignment_doc, pause_doc};
use crate::store::{DocumentStore, Subscription, WatchTarget};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Persisted duty assignment for one date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRecord {
    pub assigned_agent: AgentName,
    pub date: DateKey,
}

/// Singleton rotation pause flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PauseState {
    pub is_paused: bool,
    pub last_updated: DateTime<Utc>,
}

impl Default for PauseState {
    fn default() -> Self {
        Self {
            is_paused: false,
            last_updated: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

/// Rotation service over a document store
#[derive(Debug, Clone)]
pub struct RotationStore<S: DocumentStore> {
    store: Arc<S>,
    calculator: RotationCalculator,
}

impl<S: DocumentStore> RotationStore<S> {
    pub fn new(store: Arc<S>, calculator: RotationCalculator) -> Self {
        Self { store, calculator }
    }

    pub fn calculator(&self) -> &RotationCalculator {
        &self.calculator
    }

    /// The persisted assignment for a date, if any
    pub async fn assignment(&self, date: &DateKey) -> BoardResult<Option<AssignmentRecord>> {
        let doc = self.store.read_once(&assignment_doc(date)).await?;
        doc.map(|d| serde_json::from_value(serde_json::Value::Object(d)).map_err(Into::into))
            .transpose()
    }

    /// Persist an assignment, replacing any previous one for the date
    pub async fn set_assignment(&self, date: &DateKey, agent: &AgentName) -> BoardResult<()> {
        let record = AssignmentRecord {
            assigned_agent: agent.clone(),
            date: *date,
        };
        let doc = match serde_json::to_value(&record)? {
            serde_json::Value::Object(map) => map,
            _ => return Err(BoardError::Serialization("assignment record".into())),
        };
        self.store.write_replace(&assignment_doc(date), doc).await?;
        info!(date = %date, agent = %agent, "persisted duty assignment");
        Ok(())
    }

    /// The current pause state; absent document reads as not paused
    pub async fn pause_state(&self) -> BoardResult<PauseState> {
        let doc = self.store.read_once(&pause_doc()).await?;
        match doc {
            Some(d) => serde_json::from_value(serde_json::Value::Object(d)).map_err(Into::into),
            None => Ok(PauseState::default()),
        }
    }

    /// Toggle the rotation pause. Coordinator only.
    pub async fn set_pause(&self, actor: &AgentProfile, paused: bool) -> BoardResult<()> {
        if !can_toggle_pause(actor) {
            return Err(BoardError::PermissionDenied(format!(
                "{} may not toggle the rotation pause",
                actor.name
            )));
        }
        let state = PauseState {
            is_paused: paused,
            last_updated: Utc::now(),
        };
        let doc = match serde_json::to_value(&state)? {
            serde_json::Value::Object(map) => map,
            _ => return Err(BoardError::Serialization("pause state".into())),
        };
        self.store.write_replace(&pause_doc(), doc).await?;
        info!(actor = %actor.name, paused, "rotation pause toggled");
        Ok(())
    }

    /// Resolve the effective assignment for a date, persisting the computed
    /// default on the first resolution of a working day
    pub async fn resolve_assignment(&self, date: &DateKey) -> BoardResult<Assignment> {
        let pause = self.pause_state().await?;
        let persisted = self.assignment(date).await?;
        let resolution = resolve(
            pause.is_paused,
            date,
            persisted.as_ref().map(|r| &r.assigned_agent),
            &self.calculator,
        );
        if let Some(agent) = &resolution.persist {
            self.set_assignment(date, agent).await?;
        }
        Ok(resolution.assignment)
    }

    /// Step the date's assignment to the previous agent in the sequence.
    /// Admin or Coordinator only.
    pub async fn override_previous(
        &self,
        actor: &AgentProfile,
        date: &DateKey,
    ) -> BoardResult<AgentName> {
        self.step_assignment(actor, date, StepDirection::Previous)
            .await
    }

    /// Step the date's assignment to the next agent in the sequence.
    /// Admin or Coordinator only.
    pub async fn override_next(
        &self,
        actor: &AgentProfile,
        date: &DateKey,
    ) -> BoardResult<AgentName> {
        self.step_assignment(actor, date, StepDirection::Next).await
    }

    async fn step_assignment(
        &self,
        actor: &AgentProfile,
        date: &DateKey,
        direction: StepDirection,
    ) -> BoardResult<AgentName> {
        if !can_override_rotation(actor) {
            return Err(BoardError::PermissionDenied(format!(
                "{} may not override the rotation",
                actor.name
            )));
        }
        let current = match self.resolve_assignment(date).await? {
            Assignment::Assigned(agent) => agent,
            other => {
                return Err(BoardError::Validation(format!(
                    "no duty agent to step from on {date}: {other:?}"
                )))
            }
        };
        let stepped = match direction {
            StepDirection::Previous => self.calculator.previous_before(&current),
            StepDirection::Next => self.calculator.next_after(&current),
        }
        // current agent may be an out-of-sequence override; restart the cycle
        .or_else(|| self.calculator.sequence().first())
        .ok_or_else(|| BoardError::Validation("rotation sequence is empty".into()))?
        .clone();

        self.set_assignment(date, &stepped).await?;
        info!(actor = %actor.name, date = %date, from = %current, to = %stepped, "rotation override");
        Ok(stepped)
    }

    /// Watch the persisted assignment document for one date
    pub async fn watch_assignment(&self, date: &DateKey) -> BoardResult<Subscription> {
        self.store
            .subscribe(WatchTarget::Document(assignment_doc(date)))
            .await
    }

    /// Watch the pause flag
    pub async fn watch_pause(&self) -> BoardResult<Subscription> {
        self.store
            .subscribe(WatchTarget::Document(pause_doc()))
            .await
    }
}

#[derive(Debug, Clone, Copy)]
enum StepDirection {
    Previous,
    Next,
}
