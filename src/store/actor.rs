//! Generic actor server owning one persisted collection.
//!
//! Every mutation is serialized through the actor's mailbox and committed as
//! one whole-snapshot write followed by a sync notification, so concurrent
//! readers and other clients only ever observe complete collections.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

use crate::error::StoreError;
use crate::store::client::CollectionClient;
use crate::store::record::Record;
use crate::store::repository::{load_collection, store_collection, Repository};
use crate::sync::SyncChannel;

pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

#[derive(Debug)]
pub enum CollectionRequest<T: Record> {
    Create {
        payload: T::CreatePayload,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Search {
        query: String,
        respond_to: Response<Vec<T>>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<bool>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Refresh {
        now_ms: u64,
        respond_to: Response<usize>,
    },
}

pub struct CollectionActor<T: Record> {
    receiver: mpsc::Receiver<CollectionRequest<T>>,
    items: Vec<T>,
    repo: Arc<dyn Repository>,
    sync: SyncChannel,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Record> CollectionActor<T> {
    /// Boots the collection from its persisted snapshot. A key that was
    /// never written seeds `seed` once; an unreadable snapshot fails open
    /// to an empty collection.
    pub fn new(
        buffer_size: usize,
        repo: Arc<dyn Repository>,
        sync: SyncChannel,
        seed: Vec<T>,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, CollectionClient<T>) {
        let items = match repo.read(T::COLLECTION) {
            Ok(Some(payload)) => match serde_json::from_str(&payload) {
                Ok(items) => items,
                Err(e) => {
                    warn!(collection = T::COLLECTION, error = %e, "Unreadable snapshot, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => {
                if !seed.is_empty() {
                    info!(collection = T::COLLECTION, count = seed.len(), "Seeding first run");
                    if let Err(e) = store_collection(repo.as_ref(), T::COLLECTION, &seed) {
                        warn!(collection = T::COLLECTION, error = %e, "Seed write failed");
                    }
                }
                seed
            }
            Err(e) => {
                warn!(collection = T::COLLECTION, error = %e, "Snapshot read failed, starting empty");
                Vec::new()
            }
        };

        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            items,
            repo,
            sync,
            next_id_fn: Box::new(next_id_fn),
        };
        (actor, CollectionClient::new(sender))
    }

    #[instrument(name = "collection_actor", fields(collection = T::COLLECTION), skip(self))]
    pub async fn run(mut self) {
        info!("Collection actor starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CollectionRequest::Create { payload, respond_to } => {
                    self.handle_create(payload, respond_to);
                }
                CollectionRequest::Get { id, respond_to } => {
                    let item = self.find(&id).cloned();
                    let _ = respond_to.send(Ok(item));
                }
                CollectionRequest::List { respond_to } => {
                    let _ = respond_to.send(Ok(self.items.clone()));
                }
                CollectionRequest::Search { query, respond_to } => {
                    self.handle_search(query, respond_to);
                }
                CollectionRequest::Delete { id, respond_to } => {
                    self.handle_delete(id, respond_to);
                }
                CollectionRequest::Action { id, action, respond_to } => {
                    self.handle_action(id, action, respond_to);
                }
                CollectionRequest::Refresh { now_ms, respond_to } => {
                    self.handle_refresh(now_ms, respond_to);
                }
            }
        }

        info!("Collection actor stopped");
    }

    fn find(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    fn handle_create(&mut self, payload: T::CreatePayload, respond_to: Response<T::Id>) {
        let id = (self.next_id_fn)();
        if self.find(&id).is_some() {
            let _ = respond_to.send(Err(StoreError::Validation(format!(
                "duplicate id: {}",
                id
            ))));
            return;
        }
        match T::from_create(id.clone(), payload) {
            Ok(item) => {
                self.items.push(item);
                self.commit();
                let _ = respond_to.send(Ok(id));
            }
            Err(e) => {
                let _ = respond_to.send(Err(e));
            }
        }
    }

    fn handle_search(&self, query: String, respond_to: Response<Vec<T>>) {
        let hits: Vec<T> = self
            .items
            .iter()
            .filter(|item| item.matches(&query))
            .cloned()
            .collect();
        debug!(query, hits = hits.len(), "Search completed");
        let _ = respond_to.send(Ok(hits));
    }

    /// Deleting an id the collection does not hold is a no-op, not an error.
    /// Alias snapshots are purged in the same operation either way, so a
    /// record lingering only under a legacy key still disappears.
    fn handle_delete(&mut self, id: T::Id, respond_to: Response<bool>) {
        let before = self.items.len();
        self.items.retain(|item| item.id() != &id);
        let removed = self.items.len() != before;
        if removed {
            self.commit();
        } else {
            debug!(id = %id, "Delete on unknown id ignored");
        }
        self.purge_aliases(&id);
        let _ = respond_to.send(Ok(removed));
    }

    fn handle_action(&mut self, id: T::Id, action: T::Action, respond_to: Response<T::ActionResult>) {
        let Some(item) = self.items.iter_mut().find(|item| *item.id() == id) else {
            let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
            return;
        };
        let before = item.clone();
        match item.handle_action(action) {
            Ok(result) => {
                if *item != before {
                    self.commit();
                }
                let _ = respond_to.send(Ok(result));
            }
            Err(e) => {
                let _ = respond_to.send(Err(e));
            }
        }
    }

    /// One scheduler pass: every record gets its refresh hook, and all
    /// resulting changes land in a single snapshot commit.
    fn handle_refresh(&mut self, now_ms: u64, respond_to: Response<usize>) {
        let mut changed = 0usize;
        for item in &mut self.items {
            if item.refresh(now_ms) {
                changed += 1;
            }
        }
        if changed > 0 {
            self.commit();
        }
        let _ = respond_to.send(Ok(changed));
    }

    /// Persists the full snapshot and notifies other clients. A failed write
    /// is logged and tolerated; the next successful commit rewrites the
    /// whole snapshot anyway.
    fn commit(&self) {
        if let Err(e) = store_collection(self.repo.as_ref(), T::COLLECTION, &self.items) {
            warn!(collection = T::COLLECTION, error = %e, "Snapshot write failed");
        }
        self.sync.publish(T::COLLECTION);
    }

    fn purge_aliases(&self, id: &T::Id) {
        let id = id.to_string();
        for &alias in T::ALIASES {
            let mut raws: Vec<Value> = load_collection(self.repo.as_ref(), alias);
            let before = raws.len();
            raws.retain(|raw| !raw_id_matches(raw, &id));
            if raws.len() != before {
                info!(alias, id = %id, "Purged record from alias snapshot");
                if let Err(e) = store_collection(self.repo.as_ref(), alias, &raws) {
                    warn!(alias, error = %e, "Alias snapshot write failed");
                }
            }
        }
    }
}

/// Ids in legacy snapshots may be stored as strings or numbers.
fn raw_id_matches(raw: &Value, id: &str) -> bool {
    match raw.get("id") {
        Some(Value::String(s)) => s == id,
        Some(Value::Number(n)) => n.to_string() == id,
        _ => false,
    }
}
