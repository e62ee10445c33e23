// Copyright (c) 2025 - Cowboy AI, Inc.
//! Teambuilding Contribution Ledger
//!
//! Running contribution balance per participating agent, displayed as a
//! ranked standings board with a podium. Unlike debts there is no history:
//! the balance is the whole record.

use crate::domain::AgentName;
use crate::errors::{BoardError, BoardResult};
use crate::store::paths::{contribution_doc, CONTRIBUTIONS_COLLECTION};
use crate::store::{DocumentStore, Subscription, WatchTarget};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// Ranked contribution standings
#[derive(Debug, Clone, PartialEq)]
pub struct Standings {
    /// Participants ranked by amount, highest first; ties keep name order
    pub ranked: Vec<(AgentName, f64)>,

    /// Sum over all participants
    pub total: f64,
}

impl Standings {
    /// The top three, fewer when fewer participants have contributed
    pub fn podium(&self) -> &[(AgentName, f64)] {
        &self.ranked[..self.ranked.len().min(3)]
    }
}

/// Contribution operations over a document store
#[derive(Debug, Clone)]
pub struct ContributionLedger<S: DocumentStore> {
    store: Arc<S>,
    participants: Vec<AgentName>,
}

impl<S: DocumentStore> ContributionLedger<S> {
    pub fn new(store: Arc<S>, participants: Vec<AgentName>) -> Self {
        Self {
            store,
            participants,
        }
    }

    pub fn participants(&self) -> &[AgentName] {
        &self.participants
    }

    /// Add to a participant's balance
    pub async fn add_contribution(&self, agent: &AgentName, amount: f64) -> BoardResult<()> {
        if !self.participants.contains(agent) {
            return Err(BoardError::Validation(format!(
                "{agent} is not a teambuilding participant"
            )));
        }
        if !(amount > 0.0) {
            return Err(BoardError::Validation(format!(
                "contribution must be positive, got {amount}"
            )));
        }
        self.store
            .atomic_increment(&contribution_doc(agent), "amount", amount)
            .await?;
        info!(agent = %agent, amount, "contribution recorded");
        Ok(())
    }

    /// Balance per participant; agents without a document read as zero
    pub async fn totals(&self) -> BoardResult<BTreeMap<AgentName, f64>> {
        let docs = self.store.read_collection(CONTRIBUTIONS_COLLECTION).await?;
        Ok(self
            .participants
            .iter()
            .map(|agent| {
                let amount = docs
                    .get(agent.as_str())
                    .and_then(|doc| doc.get("amount"))
                    .and_then(serde_json::Value::as_f64)
                    .unwrap_or(0.0);
                (agent.clone(), amount)
            })
            .collect())
    }

    /// Current standings, ranked by amount descending
    pub async fn standings(&self) -> BoardResult<Standings> {
        let totals = self.totals().await?;
        let total = totals.values().sum();
        let mut ranked: Vec<(AgentName, f64)> = totals.into_iter().collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        Ok(Standings { ranked, total })
    }

    /// Watch the contribution collection
    pub async fn watch_totals(&self) -> BoardResult<Subscription> {
        self.store
            .subscribe(WatchTarget::Collection(CONTRIBUTIONS_COLLECTION.to_string()))
            .await
    }
}
