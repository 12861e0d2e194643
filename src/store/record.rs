use std::fmt::{Debug, Display};
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

/// Trait that any domain entity must implement to be managed by a
/// [`CollectionActor`](crate::store::CollectionActor).
///
/// Beyond construction and identity, a record knows how to match an admin
/// search query and may define custom domain actions. The `refresh` hook lets
/// a collection participate in scheduler-driven maintenance; most entities
/// keep the no-op default.
pub trait Record:
    Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreatePayload: Send + Sync + Debug;
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;

    /// Storage key of the canonical persisted collection.
    const COLLECTION: &'static str;

    /// Additional persisted keys the same logical collection may still live
    /// under. Deletion purges all of them.
    const ALIASES: &'static [&'static str] = &[];

    /// Get the ID of the record
    fn id(&self) -> &Self::Id;

    /// Construct the full record from the ID and creation payload.
    fn from_create(id: Self::Id, payload: Self::CreatePayload) -> Result<Self, StoreError>;

    /// Case-insensitive substring match over the record's searchable fields.
    fn matches(&self, query: &str) -> bool;

    /// Handle a custom domain-specific action
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, StoreError>;

    /// Scheduler-driven maintenance hook; returns whether the record changed.
    fn refresh(&mut self, _now_ms: u64) -> bool {
        false
    }
}

/// Case-insensitive substring containment, the match primitive every
/// record's search fields go through.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
