// Copyright (c) 2025 - Cowboy AI, Inc.
//! Document Store Abstraction
//!
//! The board persists everything in a document store organized as named
//! collections of JSON documents. The trait below is the full surface the
//! rest of the crate uses; `MemoryStore` is the in-process implementation
//! used in production for a single office and in every test.
//!
//! Subscriptions are snapshot-based: every mutation that touches a watched
//! collection or document re-sends the complete current state. Consumers
//! recompute their views from scratch on each event instead of patching.

pub mod memory;
pub mod paths;

pub use memory::MemoryStore;

use crate::errors::BoardResult;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use tokio::sync::mpsc;

/// A stored JSON document: field name to value
pub type Document = Map<String, Value>;

/// Full contents of a collection, ordered by document id
pub type CollectionSnapshot = BTreeMap<String, Document>;

/// Address of one document inside a collection
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocPath {
    pub collection: String,
    pub doc_id: String,
}

impl DocPath {
    pub fn new(collection: impl Into<String>, doc_id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            doc_id: doc_id.into(),
        }
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.doc_id)
    }
}

/// What a subscription watches
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchTarget {
    /// Every document of a collection
    Collection(String),

    /// One document
    Document(DocPath),
}

/// Snapshot delivered to subscribers
#[derive(Debug, Clone)]
pub enum SnapshotEvent {
    /// Full contents of a watched collection
    Collection {
        name: String,
        docs: CollectionSnapshot,
    },

    /// Current state of a watched document; `None` when deleted or absent
    Document {
        path: DocPath,
        doc: Option<Document>,
    },
}

/// One write inside a batch commit
#[derive(Debug, Clone)]
pub enum WriteOp {
    /// Merge fields into the document, creating it if absent
    Merge { path: DocPath, fields: Document },

    /// Replace the document wholesale
    Replace { path: DocPath, doc: Document },

    /// Delete the document; deleting an absent document is a no-op
    Delete { path: DocPath },

    /// Add `delta` to a numeric field, treating an absent field as zero
    Increment {
        path: DocPath,
        field: String,
        delta: f64,
    },
}

/// Storage operations the board depends on
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read one document, `None` when absent
    async fn read_once(&self, path: &DocPath) -> BoardResult<Option<Document>>;

    /// Merge fields into a document, creating it if absent
    async fn write_merged(&self, path: &DocPath, fields: Document) -> BoardResult<()>;

    /// Replace a document wholesale
    async fn write_replace(&self, path: &DocPath, doc: Document) -> BoardResult<()>;

    /// Delete a document; absent documents delete successfully
    async fn delete(&self, path: &DocPath) -> BoardResult<()>;

    /// Set `field` to `value` only if the document has no such field yet.
    ///
    /// Returns `true` when the write happened, `false` when the field already
    /// existed. The check and the write are one atomic step, which is what
    /// makes concurrent slot booking first-writer-wins.
    async fn create_field_if_absent(
        &self,
        path: &DocPath,
        field: &str,
        value: Value,
    ) -> BoardResult<bool>;

    /// Atomically add `delta` to a numeric field (absent field reads as zero)
    async fn atomic_increment(&self, path: &DocPath, field: &str, delta: f64) -> BoardResult<()>;

    /// Apply several writes as one atomic unit; subscribers observe either
    /// none or all of them
    async fn batch_commit(&self, ops: Vec<WriteOp>) -> BoardResult<()>;

    /// Document ids of a collection, in lexicographic order
    async fn list_document_ids(&self, collection: &str) -> BoardResult<Vec<String>>;

    /// Full contents of a collection
    async fn read_collection(&self, collection: &str) -> BoardResult<CollectionSnapshot>;

    /// Watch a collection or document.
    ///
    /// The current snapshot is delivered immediately, then a fresh snapshot
    /// after every mutation that touches the target.
    async fn subscribe(&self, target: WatchTarget) -> BoardResult<Subscription>;
}

/// Live snapshot feed for one watch target
///
/// Dropping the subscription (or calling [`Subscription::unsubscribe`])
/// stops delivery; the store prunes the sender side lazily.
#[derive(Debug)]
pub struct Subscription {
    rx: mpsc::UnboundedReceiver<SnapshotEvent>,
}

impl Subscription {
    pub(crate) fn new(rx: mpsc::UnboundedReceiver<SnapshotEvent>) -> Self {
        Self { rx }
    }

    /// Next snapshot, `None` once the feed is closed
    pub async fn next(&mut self) -> Option<SnapshotEvent> {
        self.rx.recv().await
    }

    /// Stop the feed. Idempotent; already-queued snapshots can still be
    /// drained with [`Subscription::next`].
    pub fn unsubscribe(&mut self) {
        self.rx.close();
    }
}
