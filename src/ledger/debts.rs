// Copyright (c) 2025 - Cowboy AI, Inc.
//! Agent Debt Ledger
//!
//! Running debt balance per agent plus a short-lived event history. Balance
//! and history are written in one batch commit so observers never see a
//! balance move without its event, or the reverse. History is display-only
//! and pruned after a week; balances are the durable record.

use crate::domain::AgentName;
use crate::errors::{BoardError, BoardResult};
use crate::store::paths::{debt_doc, debt_history_doc, DEBTS_COLLECTION, DEBT_HISTORY_COLLECTION};
use crate::store::{DocPath, DocumentStore, Subscription, WatchTarget, WriteOp};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Retention window for debt history events
const HISTORY_RETENTION_DAYS: i64 = 7;

/// Kind of debt event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebtEventKind {
    /// Debt added to the agent's balance
    Add,

    /// Payment reducing the balance
    Payment,
}

/// One entry in the debt history
///
/// The recording user lands in `addedBy` for debts and `approvedBy` for
/// payments; exactly one of the two is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtEvent {
    pub agent: AgentName,

    /// Positive amount; the kind carries the direction
    pub amount: f64,

    #[serde(rename = "type")]
    pub kind: DebtEventKind,

    #[serde(rename = "date")]
    pub timestamp: DateTime<Utc>,

    /// Who recorded the debt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_by: Option<AgentName>,

    /// Who approved the payment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<AgentName>,
}

impl DebtEvent {
    /// The user who recorded this event, whichever role they acted in
    pub fn recorded_by(&self) -> Option<&AgentName> {
        self.added_by.as_ref().or(self.approved_by.as_ref())
    }
}

/// Debt operations over a document store
#[derive(Debug, Clone)]
pub struct DebtLedger<S: DocumentStore> {
    store: Arc<S>,
}

impl<S: DocumentStore> DebtLedger<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Add debt to an agent's balance, recording who added it
    pub async fn add_debt(
        &self,
        agent: &AgentName,
        amount: f64,
        added_by: &AgentName,
        now: DateTime<Utc>,
    ) -> BoardResult<()> {
        self.apply(agent, amount, DebtEventKind::Add, added_by, now)
            .await
    }

    /// Record a payment against an agent's balance, recording who approved it
    pub async fn process_payment(
        &self,
        agent: &AgentName,
        amount: f64,
        approved_by: &AgentName,
        now: DateTime<Utc>,
    ) -> BoardResult<()> {
        self.apply(agent, amount, DebtEventKind::Payment, approved_by, now)
            .await
    }

    async fn apply(
        &self,
        agent: &AgentName,
        amount: f64,
        kind: DebtEventKind,
        actor: &AgentName,
        now: DateTime<Utc>,
    ) -> BoardResult<()> {
        if !(amount > 0.0) {
            return Err(BoardError::Validation(format!(
                "debt amount must be positive, got {amount}"
            )));
        }
        let event = DebtEvent {
            agent: agent.clone(),
            amount,
            kind,
            timestamp: now,
            added_by: matches!(kind, DebtEventKind::Add).then(|| actor.clone()),
            approved_by: matches!(kind, DebtEventKind::Payment).then(|| actor.clone()),
        };
        let event_doc = match serde_json::to_value(&event)? {
            serde_json::Value::Object(map) => map,
            _ => return Err(BoardError::Serialization("debt event".into())),
        };
        let delta = match kind {
            DebtEventKind::Add => amount,
            DebtEventKind::Payment => -amount,
        };
        self.store
            .batch_commit(vec![
                WriteOp::Increment {
                    path: debt_doc(agent),
                    field: "currentDebtAmount".to_string(),
                    delta,
                },
                WriteOp::Replace {
                    path: debt_history_doc(&Uuid::now_v7().to_string()),
                    doc: event_doc,
                },
            ])
            .await?;
        info!(agent = %agent, amount, kind = ?kind, actor = %actor, "debt ledger updated");
        Ok(())
    }

    /// Current balance per agent with a recorded debt document
    pub async fn totals(&self) -> BoardResult<BTreeMap<AgentName, f64>> {
        let docs = self.store.read_collection(DEBTS_COLLECTION).await?;
        Ok(docs
            .into_iter()
            .map(|(agent, doc)| {
                let amount = doc
                    .get("currentDebtAmount")
                    .and_then(serde_json::Value::as_f64)
                    .unwrap_or(0.0);
                (AgentName::new(agent), amount)
            })
            .collect())
    }

    /// Delete history events older than the retention window.
    ///
    /// Returns how many events were removed. Undecodable events are removed
    /// too; they can never be displayed.
    pub async fn clean_old_history(&self, now: DateTime<Utc>) -> BoardResult<usize> {
        let cutoff = now - Duration::days(HISTORY_RETENTION_DAYS);
        let docs = self.store.read_collection(DEBT_HISTORY_COLLECTION).await?;
        let stale: Vec<DocPath> = docs
            .into_iter()
            .filter(|(_, doc)| {
                doc.get("date")
                    .and_then(|v| serde_json::from_value::<DateTime<Utc>>(v.clone()).ok())
                    .map(|ts| ts < cutoff)
                    .unwrap_or(true)
            })
            .map(|(id, _)| debt_history_doc(&id))
            .collect();
        let removed = stale.len();
        if removed > 0 {
            self.store
                .batch_commit(stale.into_iter().map(|path| WriteOp::Delete { path }).collect())
                .await?;
            info!(removed, "debt history pruned");
        }
        Ok(removed)
    }

    /// Watch the balance collection
    pub async fn watch_totals(&self) -> BoardResult<Subscription> {
        self.store
            .subscribe(WatchTarget::Collection(DEBTS_COLLECTION.to_string()))
            .await
    }
}
