use tokio::sync::{mpsc, oneshot};

use crate::error::StoreError;
use crate::store::actor::CollectionRequest;
use crate::store::record::Record;

/// Thin channel wrapper over a [`CollectionActor`](crate::store::CollectionActor).
///
/// Domain clients compose this; they translate `StoreError` into their own
/// error vocabulary and add orchestration where needed.
#[derive(Clone)]
pub struct CollectionClient<T: Record> {
    sender: mpsc::Sender<CollectionRequest<T>>,
}

impl<T: Record> CollectionClient<T> {
    pub fn new(sender: mpsc::Sender<CollectionRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        make: impl FnOnce(oneshot::Sender<Result<R, StoreError>>) -> CollectionRequest<T>,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| StoreError::ChannelClosed)?;
        response.await.map_err(|_| StoreError::ChannelClosed)?
    }

    pub async fn create(&self, payload: T::CreatePayload) -> Result<T::Id, StoreError> {
        self.request(|respond_to| CollectionRequest::Create { payload, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        self.request(|respond_to| CollectionRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self) -> Result<Vec<T>, StoreError> {
        self.request(|respond_to| CollectionRequest::List { respond_to })
            .await
    }

    pub async fn search(&self, query: String) -> Result<Vec<T>, StoreError> {
        self.request(|respond_to| CollectionRequest::Search { query, respond_to })
            .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<bool, StoreError> {
        self.request(|respond_to| CollectionRequest::Delete { id, respond_to })
            .await
    }

    pub async fn action(&self, id: T::Id, action: T::Action) -> Result<T::ActionResult, StoreError> {
        self.request(|respond_to| CollectionRequest::Action { id, action, respond_to })
            .await
    }

    pub async fn refresh(&self, now_ms: u64) -> Result<usize, StoreError> {
        self.request(|respond_to| CollectionRequest::Refresh { now_ms, respond_to })
            .await
    }
}
