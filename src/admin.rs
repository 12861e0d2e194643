//! Admin console over the four managed collections.
//!
//! Search, cancellation, review moderation, and confirmation-gated deletion.
//! Every operation goes through the collection actors, so the console never
//! holds state of its own.

use tracing::{info, instrument};

use crate::clients::{MessageClient, OrderClient, ReviewClient, UserClient};
use crate::domain::{Message, Order, Review, ReviewStatus, TrackingStage, User};
use crate::error::AdminError;

/// The collections the console manages with one uniform contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminCollection {
    Orders,
    Users,
    Messages,
    Reviews,
}

/// Search hits, one variant per collection.
#[derive(Debug, Clone)]
pub enum AdminMatches {
    Orders(Vec<Order>),
    Users(Vec<User>),
    Messages(Vec<Message>),
    Reviews(Vec<Review>),
}

impl AdminMatches {
    pub fn len(&self) -> usize {
        match self {
            AdminMatches::Orders(hits) => hits.len(),
            AdminMatches::Users(hits) => hits.len(),
            AdminMatches::Messages(hits) => hits.len(),
            AdminMatches::Reviews(hits) => hits.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Proof that a destructive deletion was explicitly requested.
///
/// Issued by [`AdminConsole::request_delete`] and consumed by
/// [`AdminConsole::confirm_delete`]. Dropping the ticket declines the
/// deletion with no state change. Fields are private so a ticket cannot be
/// forged to skip the confirmation step.
#[derive(Debug)]
pub struct DeleteTicket {
    target: AdminCollection,
    id: String,
}

impl DeleteTicket {
    pub fn target(&self) -> AdminCollection {
        self.target
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

pub struct AdminConsole {
    orders: OrderClient,
    users: UserClient,
    messages: MessageClient,
    reviews: ReviewClient,
}

impl AdminConsole {
    pub fn new(
        orders: OrderClient,
        users: UserClient,
        messages: MessageClient,
        reviews: ReviewClient,
    ) -> Self {
        Self {
            orders,
            users,
            messages,
            reviews,
        }
    }

    /// Case-insensitive substring search over the collection's field set.
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        target: AdminCollection,
        query: &str,
    ) -> Result<AdminMatches, AdminError> {
        let query = query.to_string();
        let matches = match target {
            AdminCollection::Orders => AdminMatches::Orders(self.orders.search_orders(query).await?),
            AdminCollection::Users => AdminMatches::Users(self.users.search_users(query).await?),
            AdminCollection::Messages => {
                AdminMatches::Messages(self.messages.search_messages(query).await?)
            }
            AdminCollection::Reviews => {
                AdminMatches::Reviews(self.reviews.search_reviews(query).await?)
            }
        };
        Ok(matches)
    }

    /// First phase of a deletion: records the intent and returns the ticket
    /// the second phase requires. No state changes here.
    pub fn request_delete(&self, target: AdminCollection, id: impl Into<String>) -> DeleteTicket {
        let ticket = DeleteTicket {
            target,
            id: id.into(),
        };
        info!(target = ?ticket.target, id = %ticket.id, "Delete requested, awaiting confirmation");
        ticket
    }

    /// Second phase: executes the deletion the ticket describes. Unknown ids
    /// are silent no-ops; the result says whether anything was removed.
    /// Deleting an order also purges it from every legacy storage alias.
    #[instrument(skip(self, ticket), fields(target = ?ticket.target, id = %ticket.id))]
    pub async fn confirm_delete(&self, ticket: DeleteTicket) -> Result<bool, AdminError> {
        info!("Delete confirmed, executing");
        let DeleteTicket { target, id } = ticket;
        let removed = match target {
            AdminCollection::Orders => self.orders.delete_order(id).await?,
            AdminCollection::Users => self.users.delete_user(id).await?,
            AdminCollection::Messages => self.messages.delete_message(id).await?,
            AdminCollection::Reviews => self.reviews.delete_review(id).await?,
        };
        Ok(removed)
    }

    /// Cancels an order; see [`OrderClient::cancel_order`] for semantics.
    pub async fn cancel_order(&self, id: String) -> Result<Option<TrackingStage>, AdminError> {
        Ok(self.orders.cancel_order(id).await?)
    }

    /// Moves a review between `pending` and `approved`.
    pub async fn set_review_status(
        &self,
        id: String,
        status: ReviewStatus,
    ) -> Result<Option<ReviewStatus>, AdminError> {
        Ok(self.reviews.set_review_status(id, status).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    use crate::domain::{CheckoutForm, MessageCreate, ReviewCreate, UserCreate};
    use crate::store::{CollectionActor, MemoryRepository, Repository};
    use crate::sync::SyncChannel;

    fn spawn_console(repo: Arc<dyn Repository>) -> AdminConsole {
        let sync = SyncChannel::new(16);
        let counter = Arc::new(AtomicU64::new(1));

        macro_rules! spawn_actor {
            ($entity:ty, $prefix:literal) => {{
                let counter = counter.clone();
                let next_id =
                    move || format!("{}_{}", $prefix, counter.fetch_add(1, Ordering::SeqCst));
                let (actor, client) = CollectionActor::<$entity>::new(
                    16,
                    repo.clone(),
                    sync.clone(),
                    Vec::new(),
                    next_id,
                );
                tokio::spawn(actor.run());
                client
            }};
        }

        AdminConsole::new(
            OrderClient::new(spawn_actor!(Order, "order")),
            UserClient::new(spawn_actor!(User, "user")),
            MessageClient::new(spawn_actor!(Message, "message")),
            ReviewClient::new(spawn_actor!(Review, "review")),
        )
    }

    use crate::clients::{MessageClient, OrderClient, ReviewClient, UserClient};

    fn checkout(buyer: &str, title: &str) -> CheckoutForm {
        CheckoutForm {
            buyer_name: buyer.to_string(),
            buyer_email: format!("{}@example.com", buyer.to_lowercase()),
            title: title.to_string(),
            price: 1200.0,
            address: "12 Garage Lane".to_string(),
            payment_method: None,
        }
    }

    #[tokio::test]
    async fn delete_requires_explicit_confirmation() {
        let repo: Arc<dyn Repository> = Arc::new(MemoryRepository::new());
        let console = spawn_console(repo);
        let id = console
            .orders
            .create_order(checkout("Asha", "Full Vinyl Wrap"))
            .await
            .unwrap();

        // Requesting alone changes nothing.
        let ticket = console.request_delete(AdminCollection::Orders, id.clone());
        assert!(console.orders.get_order(id.clone()).await.unwrap().is_some());

        assert!(console.confirm_delete(ticket).await.unwrap());
        assert!(console.orders.get_order(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn dropping_a_ticket_declines_the_delete() {
        let repo: Arc<dyn Repository> = Arc::new(MemoryRepository::new());
        let console = spawn_console(repo);
        let id = console
            .orders
            .create_order(checkout("Asha", "Full Vinyl Wrap"))
            .await
            .unwrap();

        let ticket = console.request_delete(AdminCollection::Orders, id.clone());
        drop(ticket);

        assert!(console.orders.get_order(id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn confirmed_delete_of_unknown_id_is_a_noop() {
        let repo: Arc<dyn Repository> = Arc::new(MemoryRepository::new());
        let console = spawn_console(repo);

        let ticket = console.request_delete(AdminCollection::Users, "user_404");
        assert!(!console.confirm_delete(ticket).await.unwrap());
    }

    #[tokio::test]
    async fn search_is_uniform_across_collections() {
        let repo: Arc<dyn Repository> = Arc::new(MemoryRepository::new());
        let console = spawn_console(repo);

        console
            .orders
            .create_order(checkout("Asha", "Full Vinyl Wrap"))
            .await
            .unwrap();
        console
            .users
            .create_user(UserCreate {
                name: "Asha Rao".to_string(),
                email: "asha@example.com".to_string(),
            })
            .await
            .unwrap();
        console
            .messages
            .create_message(MessageCreate {
                name: "Marcus".to_string(),
                email: "marcus@example.com".to_string(),
                body: "Quote for a vinyl wrap?".to_string(),
            })
            .await
            .unwrap();
        console
            .reviews
            .create_review(ReviewCreate {
                author: "Lena".to_string(),
                vehicle: "2021 Model 3".to_string(),
                body: "Great tint work".to_string(),
                rating: 5,
            })
            .await
            .unwrap();

        assert_eq!(console.search(AdminCollection::Orders, "asha").await.unwrap().len(), 1);
        assert_eq!(console.search(AdminCollection::Users, "ASHA").await.unwrap().len(), 1);
        assert_eq!(console.search(AdminCollection::Messages, "wrap").await.unwrap().len(), 1);
        assert_eq!(console.search(AdminCollection::Reviews, "tint").await.unwrap().len(), 1);
        assert!(console.search(AdminCollection::Orders, "nothing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn review_status_toggles_both_ways() {
        let repo: Arc<dyn Repository> = Arc::new(MemoryRepository::new());
        let console = spawn_console(repo);
        let id = console
            .reviews
            .create_review(ReviewCreate {
                author: "Lena".to_string(),
                vehicle: "2021 Model 3".to_string(),
                body: "Great tint work".to_string(),
                rating: 5,
            })
            .await
            .unwrap();

        let status = console
            .set_review_status(id.clone(), ReviewStatus::Approved)
            .await
            .unwrap();
        assert_eq!(status, Some(ReviewStatus::Approved));

        let status = console
            .set_review_status(id, ReviewStatus::Pending)
            .await
            .unwrap();
        assert_eq!(status, Some(ReviewStatus::Pending));

        // Unknown review: silent no-op.
        let status = console
            .set_review_status("review_404".to_string(), ReviewStatus::Approved)
            .await
            .unwrap();
        assert_eq!(status, None);
    }
}
