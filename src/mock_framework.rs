//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_create`] or [`expect_action`] to assert behavior.

use tokio::sync::{mpsc, oneshot};

use crate::error::StoreError;
use crate::store::{CollectionClient, CollectionRequest, Record};

/// Creates a mock client and a receiver for asserting requests.
///
/// # Testing Strategy
/// When testing client logic (e.g. `OrderClient`), spinning up a full
/// `CollectionActor` drags persistence and the sync channel into the test.
/// A mock client sends messages to a channel the test controls; the test
/// inspects the messages arriving on that channel and plays the actor's
/// side of the conversation deterministically.
pub fn create_mock_client<T: Record>(
    buffer_size: usize,
) -> (CollectionClient<T>, mpsc::Receiver<CollectionRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CollectionClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Record>(
    receiver: &mut mpsc::Receiver<CollectionRequest<T>>,
) -> Option<(T::CreatePayload, oneshot::Sender<Result<T::Id, StoreError>>)> {
    match receiver.recv().await {
        Some(CollectionRequest::Create { payload, respond_to }) => Some((payload, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
#[allow(dead_code)]
pub async fn expect_get<T: Record>(
    receiver: &mut mpsc::Receiver<CollectionRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, StoreError>>)> {
    match receiver.recv().await {
        Some(CollectionRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: Record>(
    receiver: &mut mpsc::Receiver<CollectionRequest<T>>,
) -> Option<(T::Id, T::Action, oneshot::Sender<Result<T::ActionResult, StoreError>>)> {
    match receiver.recv().await {
        Some(CollectionRequest::Action { id, action, respond_to }) => {
            Some((id, action, respond_to))
        }
        _ => None,
    }
}

/// Helper to verify that the next message is a Refresh request
pub async fn expect_refresh<T: Record>(
    receiver: &mut mpsc::Receiver<CollectionRequest<T>>,
) -> Option<(u64, oneshot::Sender<Result<usize, StoreError>>)> {
    match receiver.recv().await {
        Some(CollectionRequest::Refresh { now_ms, respond_to }) => Some((now_ms, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CheckoutForm, Order};

    #[tokio::test]
    async fn mock_client_round_trips_a_create() {
        let (client, mut receiver) = create_mock_client::<Order>(10);

        let create_task = tokio::spawn(async move {
            let form = CheckoutForm {
                buyer_name: "Asha".to_string(),
                buyer_email: "asha@example.com".to_string(),
                title: "Full Vinyl Wrap".to_string(),
                price: 5000.0,
                address: "12 Garage Lane".to_string(),
                payment_method: None,
            };
            client.create(form).await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.buyer_name, "Asha");
        responder.send(Ok("order_1".to_string())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok("order_1".to_string()));
    }
}
