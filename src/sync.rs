//! Cross-client collection change notifications.
//!
//! Mutations publish only the name of the collection that changed; every
//! subscribed client re-reads the full persisted snapshot and replaces its
//! in-memory view. Whole-snapshot propagation means a lagged or missed
//! notification is harmless: the next re-read converges regardless.

use std::sync::{Arc, RwLock};

use serde::de::DeserializeOwned;
use tokio::sync::broadcast;
use tracing::debug;

use crate::store::repository::{load_collection, Repository};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncEvent {
    pub collection: &'static str,
}

/// Broadcast fan-out of collection change notifications.
#[derive(Clone)]
pub struct SyncChannel {
    tx: broadcast::Sender<SyncEvent>,
}

impl SyncChannel {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publishing with no subscribers is not an error.
    pub fn publish(&self, collection: &'static str) {
        debug!(collection, "Publishing collection change");
        let _ = self.tx.send(SyncEvent { collection });
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.tx.subscribe()
    }
}

/// A subscriber-side mirror of one persisted collection.
///
/// Holds the last snapshot read; `refresh` replaces it wholesale from the
/// repository, and `follow` keeps it current from a [`SyncChannel`].
#[derive(Clone)]
pub struct ReadView<T> {
    repo: Arc<dyn Repository>,
    collection: &'static str,
    items: Arc<RwLock<Vec<T>>>,
}

impl<T: DeserializeOwned + Clone + Send + Sync + 'static> ReadView<T> {
    pub fn new(repo: Arc<dyn Repository>, collection: &'static str) -> Self {
        let items = load_collection(repo.as_ref(), collection);
        Self {
            repo,
            collection,
            items: Arc::new(RwLock::new(items)),
        }
    }

    pub fn snapshot(&self) -> Vec<T> {
        self.items
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Re-reads the persisted snapshot and replaces the in-memory view.
    pub fn refresh(&self) {
        let fresh = load_collection(self.repo.as_ref(), self.collection);
        *self.items.write().unwrap_or_else(|e| e.into_inner()) = fresh;
    }

    /// Spawns a task that refreshes the view whenever its collection is
    /// published. Lagging behind the channel just triggers a refresh, since
    /// each refresh reads the complete current snapshot.
    pub fn follow(&self, channel: &SyncChannel) -> tokio::task::JoinHandle<()> {
        let view = self.clone();
        let mut rx = channel.subscribe();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) if event.collection == view.collection => view.refresh(),
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(_)) => view.refresh(),
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }
}
