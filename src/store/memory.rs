// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-Memory Document Store
//!
//! Single-process store backing one office. All state lives behind one async
//! mutex, which makes every trait method atomic with respect to the others;
//! subscribers are notified with fresh snapshots before the lock is released,
//! so no mutation can interleave between a write and its fan-out.

use crate::errors::{BoardError, BoardResult};
use crate::store::{
    CollectionSnapshot, DocPath, Document, DocumentStore, SnapshotEvent, Subscription, WatchTarget,
    WriteOp,
};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::debug;

/// In-memory [`DocumentStore`] implementation
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

type Collections = BTreeMap<String, BTreeMap<String, Document>>;

#[derive(Debug, Default)]
struct Inner {
    collections: Collections,
    subscribers: Vec<SubscriberEntry>,
}

#[derive(Debug)]
struct SubscriberEntry {
    target: WatchTarget,
    tx: mpsc::UnboundedSender<SnapshotEvent>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Inner {
    fn document(&self, path: &DocPath) -> Option<&Document> {
        self.collections
            .get(&path.collection)
            .and_then(|docs| docs.get(&path.doc_id))
    }

    fn snapshot_for(&self, target: &WatchTarget) -> SnapshotEvent {
        match target {
            WatchTarget::Collection(name) => SnapshotEvent::Collection {
                name: name.clone(),
                docs: self.collections.get(name).cloned().unwrap_or_default(),
            },
            WatchTarget::Document(path) => SnapshotEvent::Document {
                path: path.clone(),
                doc: self.document(path).cloned(),
            },
        }
    }

    /// Re-send snapshots to every subscriber whose target was touched,
    /// dropping subscribers whose receiver is gone
    fn notify(&mut self, touched: &HashSet<DocPath>) {
        let mut live = Vec::with_capacity(self.subscribers.len());
        let subscribers = std::mem::take(&mut self.subscribers);
        for entry in subscribers {
            let hit = match &entry.target {
                WatchTarget::Collection(name) => {
                    touched.iter().any(|path| path.collection == *name)
                }
                WatchTarget::Document(path) => touched.contains(path),
            };
            if hit {
                let event = self.snapshot_for(&entry.target);
                if entry.tx.send(event).is_err() {
                    debug!(target = ?entry.target, "dropping closed subscription");
                    continue;
                }
            }
            live.push(entry);
        }
        self.subscribers = live;
    }

}

fn document_mut<'a>(collections: &'a mut Collections, path: &DocPath) -> &'a mut Document {
    collections
        .entry(path.collection.clone())
        .or_default()
        .entry(path.doc_id.clone())
        .or_default()
}

fn remove_document(collections: &mut Collections, path: &DocPath) {
    if let Some(docs) = collections.get_mut(&path.collection) {
        docs.remove(&path.doc_id);
        if docs.is_empty() {
            collections.remove(&path.collection);
        }
    }
}

fn apply_increment(
    collections: &mut Collections,
    path: &DocPath,
    field: &str,
    delta: f64,
) -> BoardResult<()> {
    let doc = document_mut(collections, path);
    let current = match doc.get(field) {
        None | Some(Value::Null) => 0.0,
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(other) => {
            return Err(BoardError::Storage(format!(
                "cannot increment non-numeric field {field} at {path}: {other}"
            )))
        }
    };
    let next = current + delta;
    let number = serde_json::Number::from_f64(next)
        .ok_or_else(|| BoardError::Storage(format!("non-finite increment result: {next}")))?;
    doc.insert(field.to_string(), Value::Number(number));
    Ok(())
}

fn apply_op(
    collections: &mut Collections,
    op: WriteOp,
    touched: &mut HashSet<DocPath>,
) -> BoardResult<()> {
    match op {
        WriteOp::Merge { path, fields } => {
            document_mut(collections, &path).extend(fields);
            touched.insert(path);
        }
        WriteOp::Replace { path, doc } => {
            *document_mut(collections, &path) = doc;
            touched.insert(path);
        }
        WriteOp::Delete { path } => {
            remove_document(collections, &path);
            touched.insert(path);
        }
        WriteOp::Increment { path, field, delta } => {
            apply_increment(collections, &path, &field, delta)?;
            touched.insert(path);
        }
    }
    Ok(())
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn read_once(&self, path: &DocPath) -> BoardResult<Option<Document>> {
        let inner = self.inner.lock().await;
        Ok(inner.document(path).cloned())
    }

    async fn write_merged(&self, path: &DocPath, fields: Document) -> BoardResult<()> {
        let mut inner = self.inner.lock().await;
        document_mut(&mut inner.collections, path).extend(fields);
        inner.notify(&HashSet::from([path.clone()]));
        Ok(())
    }

    async fn write_replace(&self, path: &DocPath, doc: Document) -> BoardResult<()> {
        let mut inner = self.inner.lock().await;
        *document_mut(&mut inner.collections, path) = doc;
        inner.notify(&HashSet::from([path.clone()]));
        Ok(())
    }

    async fn delete(&self, path: &DocPath) -> BoardResult<()> {
        let mut inner = self.inner.lock().await;
        remove_document(&mut inner.collections, path);
        inner.notify(&HashSet::from([path.clone()]));
        Ok(())
    }

    async fn create_field_if_absent(
        &self,
        path: &DocPath,
        field: &str,
        value: Value,
    ) -> BoardResult<bool> {
        let mut inner = self.inner.lock().await;
        if inner
            .document(path)
            .is_some_and(|doc| doc.contains_key(field))
        {
            return Ok(false);
        }
        document_mut(&mut inner.collections, path).insert(field.to_string(), value);
        inner.notify(&HashSet::from([path.clone()]));
        Ok(true)
    }

    async fn atomic_increment(&self, path: &DocPath, field: &str, delta: f64) -> BoardResult<()> {
        let mut inner = self.inner.lock().await;
        apply_increment(&mut inner.collections, path, field, delta)?;
        inner.notify(&HashSet::from([path.clone()]));
        Ok(())
    }

    async fn batch_commit(&self, ops: Vec<WriteOp>) -> BoardResult<()> {
        let mut inner = self.inner.lock().await;
        // Stage on a copy; a failing op must leave nothing behind, so the
        // staged state only replaces the live one once every op has applied.
        let mut staged = inner.collections.clone();
        let mut touched = HashSet::new();
        for op in ops {
            apply_op(&mut staged, op, &mut touched)?;
        }
        inner.collections = staged;
        inner.notify(&touched);
        Ok(())
    }

    async fn list_document_ids(&self, collection: &str) -> BoardResult<Vec<String>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .collections
            .get(collection)
            .map(|docs| docs.keys().cloned().collect())
            .unwrap_or_default())
    }

    async fn read_collection(&self, collection: &str) -> BoardResult<CollectionSnapshot> {
        let inner = self.inner.lock().await;
        Ok(inner.collections.get(collection).cloned().unwrap_or_default())
    }

    async fn subscribe(&self, target: WatchTarget) -> BoardResult<Subscription> {
        let mut inner = self.inner.lock().await;
        let (tx, rx) = mpsc::unbounded_channel();
        // initial snapshot so consumers never start blind
        let initial = inner.snapshot_for(&target);
        if tx.send(initial).is_err() {
            return Err(BoardError::Storage("subscription closed at creation".into()));
        }
        inner.subscribers.push(SubscriberEntry { target, tx });
        Ok(Subscription::new(rx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn doc(fields: &[(&str, Value)]) -> Document {
        fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[tokio::test]
    async fn merge_creates_then_extends() {
        let store = MemoryStore::new();
        let path = DocPath::new("teams/Andreea/appointments", "2024-01-08");

        store
            .write_merged(&path, doc(&[("09:30", json!({"agentName": "Dida"}))]))
            .await
            .unwrap();
        store
            .write_merged(&path, doc(&[("10:00", json!({"agentName": "Florin"}))]))
            .await
            .unwrap();

        let stored = store.read_once(&path).await.unwrap().unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored["09:30"]["agentName"], "Dida");
    }

    #[tokio::test]
    async fn replace_discards_previous_fields() {
        let store = MemoryStore::new();
        let path = DocPath::new("rotationPause", "pauseState");

        store
            .write_merged(&path, doc(&[("isPaused", json!(true)), ("extra", json!(1))]))
            .await
            .unwrap();
        store
            .write_replace(&path, doc(&[("isPaused", json!(false))]))
            .await
            .unwrap();

        let stored = store.read_once(&path).await.unwrap().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored["isPaused"], json!(false));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryStore::new();
        let path = DocPath::new("dailyAssignments", "2024-01-08");
        store.delete(&path).await.unwrap();
        store
            .write_replace(&path, doc(&[("assignedAgent", json!("Scarlat"))]))
            .await
            .unwrap();
        store.delete(&path).await.unwrap();
        assert!(store.read_once(&path).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn create_field_if_absent_is_first_writer_wins() {
        let store = MemoryStore::new();
        let path = DocPath::new("teams/SHARED_CREDIT/appointments", "2024-01-08");

        let first = store
            .create_field_if_absent(&path, "09:30", json!({"agentName": "Dida"}))
            .await
            .unwrap();
        let second = store
            .create_field_if_absent(&path, "09:30", json!({"agentName": "Florin"}))
            .await
            .unwrap();

        assert!(first);
        assert!(!second);
        let stored = store.read_once(&path).await.unwrap().unwrap();
        assert_eq!(stored["09:30"]["agentName"], "Dida");
    }

    #[tokio::test]
    async fn increment_treats_absent_as_zero() {
        let store = MemoryStore::new();
        let path = DocPath::new("agent_debts", "Florin");

        store
            .atomic_increment(&path, "currentDebtAmount", 150.0)
            .await
            .unwrap();
        store
            .atomic_increment(&path, "currentDebtAmount", -50.0)
            .await
            .unwrap();

        let stored = store.read_once(&path).await.unwrap().unwrap();
        assert_eq!(stored["currentDebtAmount"], json!(100.0));
    }

    #[tokio::test]
    async fn increment_rejects_non_numeric_field() {
        let store = MemoryStore::new();
        let path = DocPath::new("agent_debts", "Florin");
        store
            .write_merged(&path, doc(&[("currentDebtAmount", json!("oops"))]))
            .await
            .unwrap();
        let err = store
            .atomic_increment(&path, "currentDebtAmount", 1.0)
            .await
            .unwrap_err();
        assert!(matches!(err, BoardError::Storage(_)));
    }

    #[tokio::test]
    async fn subscription_gets_initial_then_updated_snapshots() {
        let store = MemoryStore::new();
        let collection = "dailyAssignments".to_string();

        let mut sub = store
            .subscribe(WatchTarget::Collection(collection.clone()))
            .await
            .unwrap();

        match sub.next().await.unwrap() {
            SnapshotEvent::Collection { docs, .. } => assert!(docs.is_empty()),
            other => panic!("expected collection snapshot, got {other:?}"),
        }

        store
            .write_replace(
                &DocPath::new(&collection, "2024-01-08"),
                doc(&[("assignedAgent", json!("Scarlat"))]),
            )
            .await
            .unwrap();

        match sub.next().await.unwrap() {
            SnapshotEvent::Collection { docs, .. } => {
                assert_eq!(docs.len(), 1);
                assert_eq!(docs["2024-01-08"]["assignedAgent"], "Scarlat");
            }
            other => panic!("expected collection snapshot, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn document_subscription_sees_deletion_as_none() {
        let store = MemoryStore::new();
        let path = DocPath::new("rotationPause", "pauseState");
        store
            .write_replace(&path, doc(&[("isPaused", json!(true))]))
            .await
            .unwrap();

        let mut sub = store
            .subscribe(WatchTarget::Document(path.clone()))
            .await
            .unwrap();
        match sub.next().await.unwrap() {
            SnapshotEvent::Document { doc, .. } => assert!(doc.is_some()),
            other => panic!("expected document snapshot, got {other:?}"),
        }

        store.delete(&path).await.unwrap();
        match sub.next().await.unwrap() {
            SnapshotEvent::Document { doc, .. } => assert!(doc.is_none()),
            other => panic!("expected document snapshot, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unsubscribe_stops_delivery() {
        let store = MemoryStore::new();
        let path = DocPath::new("dailyAssignments", "2024-01-08");
        let mut sub = store
            .subscribe(WatchTarget::Document(path.clone()))
            .await
            .unwrap();
        assert!(sub.next().await.is_some()); // initial

        sub.unsubscribe();
        sub.unsubscribe(); // idempotent
        store
            .write_replace(&path, doc(&[("assignedAgent", json!("Mihaela"))]))
            .await
            .unwrap();
        assert!(sub.next().await.is_none());
    }

    #[tokio::test]
    async fn batch_commit_notifies_once_per_target() {
        let store = MemoryStore::new();
        let collection = "debt_history".to_string();
        let mut sub = store
            .subscribe(WatchTarget::Collection(collection.clone()))
            .await
            .unwrap();
        assert!(sub.next().await.is_some()); // initial

        store
            .batch_commit(vec![
                WriteOp::Replace {
                    path: DocPath::new(&collection, "a"),
                    doc: doc(&[("amount", json!(10))]),
                },
                WriteOp::Replace {
                    path: DocPath::new(&collection, "b"),
                    doc: doc(&[("amount", json!(20))]),
                },
            ])
            .await
            .unwrap();

        match sub.next().await.unwrap() {
            SnapshotEvent::Collection { docs, .. } => assert_eq!(docs.len(), 2),
            other => panic!("expected collection snapshot, got {other:?}"),
        }
        // both writes arrived in a single event
        sub.unsubscribe();
        assert!(sub.next().await.is_none());
    }

    #[tokio::test]
    async fn failed_batch_leaves_no_partial_writes() {
        let store = MemoryStore::new();
        let balance = DocPath::new("agent_debts", "Dida");
        let history = DocPath::new("debt_history", "event-1");
        store
            .write_merged(&balance, doc(&[("currentDebtAmount", json!("corrupt"))]))
            .await
            .unwrap();

        let mut sub = store
            .subscribe(WatchTarget::Collection("debt_history".to_string()))
            .await
            .unwrap();
        assert!(sub.next().await.is_some()); // initial

        let err = store
            .batch_commit(vec![
                WriteOp::Replace {
                    path: history.clone(),
                    doc: doc(&[("agent", json!("Dida"))]),
                },
                WriteOp::Increment {
                    path: balance.clone(),
                    field: "currentDebtAmount".to_string(),
                    delta: 10.0,
                },
            ])
            .await
            .unwrap_err();
        assert!(matches!(err, BoardError::Storage(_)));

        // the earlier replace did not land and no subscriber saw it
        assert!(store.read_once(&history).await.unwrap().is_none());
        store.write_replace(&history, doc(&[("agent", json!("Voicu"))])).await.unwrap();
        match sub.next().await.unwrap() {
            SnapshotEvent::Collection { docs, .. } => {
                assert_eq!(docs.len(), 1);
                assert_eq!(docs["event-1"]["agent"], "Voicu");
            }
            other => panic!("expected collection snapshot, got {other:?}"),
        }
    }
}
