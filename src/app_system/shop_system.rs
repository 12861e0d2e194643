use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::admin::AdminConsole;
use crate::app_system::SystemConfig;
use crate::clients::{MessageClient, OrderClient, ReviewClient, UserClient};
use crate::domain::{Message, Order, Review, User};
use crate::normalize::migrate_legacy;
use crate::scheduler::stage_refresh_loop;
use crate::stage::now_ms;
use crate::store::{
    CollectionActor, JsonFileRepository, Record, Repository, RepositoryError,
};
use crate::sync::{ReadView, SyncChannel};

/// The main application system that wires every actor together.
///
/// Responsible for starting up actors, running the one-time legacy repair,
/// arming the stage scheduler, and handling shutdown. Startup order matters:
/// the repository comes up first, migration runs before the order actor
/// loads its snapshot, and the scheduler is armed last.
pub struct ShopSystem {
    pub orders: OrderClient,
    pub users: UserClient,
    pub messages: MessageClient,
    pub reviews: ReviewClient,
    pub admin: AdminConsole,
    pub sync: SyncChannel,
    repo: Arc<dyn Repository>,
    handles: Vec<JoinHandle<()>>,
    scheduler: JoinHandle<()>,
}

fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

impl ShopSystem {
    /// Boots the system against filesystem-backed snapshots.
    pub fn start(config: SystemConfig) -> Result<Self, RepositoryError> {
        let repo = Arc::new(JsonFileRepository::new(&config.data_dir)?);
        Self::start_with_repository(config, repo)
    }

    /// Boots the system against any repository backend.
    #[instrument(name = "shop_system", skip(config, repo))]
    pub fn start_with_repository(
        config: SystemConfig,
        repo: Arc<dyn Repository>,
    ) -> Result<Self, RepositoryError> {
        info!("Starting shop system");

        // One-time repair of historical order records, before the order
        // actor loads its snapshot and before the scheduler is armed.
        migrate_legacy(repo.as_ref(), now_ms(), &mut fresh_id)?;

        let sync = SyncChannel::new(config.sync_capacity);
        let mut handles = Vec::new();

        let (order_actor, order_inner) = CollectionActor::<Order>::new(
            config.channel_buffer,
            repo.clone(),
            sync.clone(),
            config.seed_orders,
            fresh_id,
        );
        handles.push(tokio::spawn(order_actor.run()));

        let (user_actor, user_inner) = CollectionActor::<User>::new(
            config.channel_buffer,
            repo.clone(),
            sync.clone(),
            config.seed_users,
            fresh_id,
        );
        handles.push(tokio::spawn(user_actor.run()));

        let (message_actor, message_inner) = CollectionActor::<Message>::new(
            config.channel_buffer,
            repo.clone(),
            sync.clone(),
            config.seed_messages,
            fresh_id,
        );
        handles.push(tokio::spawn(message_actor.run()));

        let (review_actor, review_inner) = CollectionActor::<Review>::new(
            config.channel_buffer,
            repo.clone(),
            sync.clone(),
            config.seed_reviews,
            fresh_id,
        );
        handles.push(tokio::spawn(review_actor.run()));

        let orders = OrderClient::new(order_inner);
        let users = UserClient::new(user_inner);
        let messages = MessageClient::new(message_inner);
        let reviews = ReviewClient::new(review_inner);

        let admin = AdminConsole::new(
            orders.clone(),
            users.clone(),
            messages.clone(),
            reviews.clone(),
        );

        let scheduler = tokio::spawn(stage_refresh_loop(
            orders.clone(),
            config.refresh_interval,
        ));

        info!("Shop system started successfully");

        Ok(Self {
            orders,
            users,
            messages,
            reviews,
            admin,
            sync,
            repo,
            handles,
            scheduler,
        })
    }

    /// A storefront-side mirror of the order collection; call
    /// [`ReadView::follow`] with [`ShopSystem::sync`] to keep it current.
    pub fn order_view(&self) -> ReadView<Order> {
        ReadView::new(self.repo.clone(), Order::COLLECTION)
    }

    /// Gracefully shuts down the scheduler and every collection actor.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down shop system");

        let Self {
            orders,
            users,
            messages,
            reviews,
            admin,
            sync,
            repo,
            handles,
            scheduler,
        } = self;

        // The scheduler holds an order client; stop it first so the order
        // actor's channel can actually close.
        scheduler.abort();
        let _ = scheduler.await;

        // Drop clients to close channels; actors drain and stop.
        drop(admin);
        drop(orders);
        drop(users);
        drop(messages);
        drop(reviews);
        drop(sync);
        drop(repo);

        for handle in handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Collection actor failed during shutdown");
                return Err(format!("Collection actor failed: {:?}", e));
            }
        }

        info!("Shop system shutdown complete");
        Ok(())
    }
}
