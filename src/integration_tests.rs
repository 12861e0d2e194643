#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use serde_json::Value;

    use crate::admin::AdminCollection;
    use crate::app_system::{default_reviews, ShopSystem, SystemConfig};
    use crate::clients::OrderClient;
    use crate::domain::{
        CheckoutForm, Order, OrderAction, OrderStatus, ReviewCreate, ReviewStatus, TrackingStage,
    };
    use crate::error::StoreError;
    use crate::mock_framework::{create_mock_client, expect_action, expect_refresh};
    use crate::stage::{now_ms, HOUR_MS};
    use crate::store::{load_collection, MemoryRepository, Repository};

    fn test_config() -> SystemConfig {
        SystemConfig {
            data_dir: "unused".into(),
            refresh_interval: Duration::from_secs(3600),
            seed_reviews: Vec::new(),
            ..SystemConfig::default()
        }
    }

    fn checkout(buyer: &str, title: &str) -> CheckoutForm {
        CheckoutForm {
            buyer_name: buyer.to_string(),
            buyer_email: format!("{}@example.com", buyer.to_lowercase()),
            title: title.to_string(),
            price: 5000.0,
            address: "12 Garage Lane".to_string(),
            payment_method: None,
        }
    }

    #[tokio::test]
    async fn checkout_cancel_and_shutdown_flow() {
        let repo: Arc<dyn Repository> = Arc::new(MemoryRepository::new());
        let system = ShopSystem::start_with_repository(test_config(), repo).unwrap();

        let id = system
            .orders
            .create_order(checkout("Asha", "Full Vinyl Wrap"))
            .await
            .unwrap();
        let order = system.orders.get_order(id.clone()).await.unwrap().expect("order");
        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.tracking_stage, TrackingStage::OrderConfirmed);

        // Cancel freezes the stage; a second cancel is a no-op.
        let frozen = system.admin.cancel_order(id.clone()).await.unwrap();
        assert_eq!(frozen, Some(TrackingStage::OrderConfirmed));
        assert_eq!(system.admin.cancel_order(id.clone()).await.unwrap(), None);

        // A refresh pass far in the future leaves the frozen stage alone.
        let later = now_ms() + 500 * HOUR_MS;
        system.orders.refresh_stages(later).await.unwrap();
        let order = system.orders.get_order(id).await.unwrap().expect("order");
        assert_eq!(order.tracking_stage, TrackingStage::OrderConfirmed);
        assert_eq!(order.status, OrderStatus::Cancelled);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn legacy_history_migrates_once_at_boot() {
        let repo: Arc<dyn Repository> = Arc::new(MemoryRepository::new());
        repo.write(
            "orderHistory",
            r#"[{"user": "Asha", "product": "Wrap", "price": null}]"#,
        )
        .unwrap();

        let system = ShopSystem::start_with_repository(test_config(), repo.clone()).unwrap();
        let orders = system.orders.list_orders().await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].buyer_name, "Asha");
        assert_eq!(orders[0].title, "Wrap");
        assert_eq!(orders[0].price, 0.0);
        assert_eq!(orders[0].status, OrderStatus::Confirmed);
        system.shutdown().await.unwrap();

        // Legacy entries that appear after migration never overwrite
        // canonical data on a later boot.
        repo.write("orderHistory", r#"[{"user": "Stale", "product": "Old"}]"#)
            .unwrap();
        let system = ShopSystem::start_with_repository(test_config(), repo).unwrap();
        let orders = system.orders.list_orders().await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].buyer_name, "Asha");
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn admin_delete_purges_canonical_and_alias() {
        let repo: Arc<dyn Repository> = Arc::new(MemoryRepository::new());
        repo.write(
            "orderHistory",
            r#"[{"id": "ord_77", "user": "Asha", "product": "Wrap"}]"#,
        )
        .unwrap();
        let system = ShopSystem::start_with_repository(test_config(), repo.clone()).unwrap();

        // Migration carried the legacy id into the canonical collection.
        assert!(system
            .orders
            .get_order("ord_77".to_string())
            .await
            .unwrap()
            .is_some());

        let ticket = system.admin.request_delete(AdminCollection::Orders, "ord_77");
        assert!(system.admin.confirm_delete(ticket).await.unwrap());

        let canonical: Vec<Order> = load_collection(repo.as_ref(), "orders");
        assert!(canonical.is_empty());
        let legacy: Vec<Value> = load_collection(repo.as_ref(), "orderHistory");
        assert!(legacy.is_empty());

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn reviews_seed_on_first_run_only() {
        let repo: Arc<dyn Repository> = Arc::new(MemoryRepository::new());
        let config = SystemConfig {
            seed_reviews: default_reviews(),
            ..test_config()
        };
        let system = ShopSystem::start_with_repository(config, repo.clone()).unwrap();

        let reviews = system.reviews.list_reviews().await.unwrap();
        assert_eq!(reviews.len(), 2);
        assert!(reviews.iter().all(|r| r.status == ReviewStatus::Approved));

        // A visitor leaves a pending review; moderation approves it.
        let id = system
            .reviews
            .create_review(ReviewCreate {
                author: "Dev".to_string(),
                vehicle: "2018 Civic".to_string(),
                body: "Paint protection film looks invisible".to_string(),
                rating: 4,
            })
            .await
            .unwrap();
        let review = system.reviews.get_review(id.clone()).await.unwrap().expect("review");
        assert_eq!(review.status, ReviewStatus::Pending);
        system
            .admin
            .set_review_status(id, ReviewStatus::Approved)
            .await
            .unwrap();
        system.shutdown().await.unwrap();

        // An emptied collection is respected on the next boot: seeding is
        // first-run only.
        let system = ShopSystem::start_with_repository(
            SystemConfig {
                seed_reviews: default_reviews(),
                ..test_config()
            },
            repo.clone(),
        )
        .unwrap();
        assert_eq!(system.reviews.list_reviews().await.unwrap().len(), 3);

        for review in system.reviews.list_reviews().await.unwrap() {
            let ticket = system.admin.request_delete(AdminCollection::Reviews, review.id);
            system.admin.confirm_delete(ticket).await.unwrap();
        }
        system.shutdown().await.unwrap();

        let system = ShopSystem::start_with_repository(
            SystemConfig {
                seed_reviews: default_reviews(),
                ..test_config()
            },
            repo,
        )
        .unwrap();
        assert!(system.reviews.list_reviews().await.unwrap().is_empty());
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn sync_view_follows_store_mutations() {
        let repo: Arc<dyn Repository> = Arc::new(MemoryRepository::new());
        let system = ShopSystem::start_with_repository(test_config(), repo).unwrap();

        let view = system.order_view();
        let follower = view.follow(&system.sync);
        assert!(view.snapshot().is_empty());

        system
            .orders
            .create_order(checkout("Asha", "Full Vinyl Wrap"))
            .await
            .unwrap();

        let mut synced = false;
        for _ in 0..200 {
            if !view.snapshot().is_empty() {
                synced = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(synced, "view never caught up with the store");
        assert_eq!(view.snapshot()[0].buyer_name, "Asha");

        follower.abort();
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn cancel_on_unknown_id_is_silent_at_the_client() {
        let (inner, mut rx) = create_mock_client::<Order>(8);
        let client = OrderClient::new(inner);

        let task = tokio::spawn(async move { client.cancel_order("order_404".to_string()).await });

        let (id, action, responder) = expect_action(&mut rx).await.expect("Expected Action");
        assert_eq!(id, "order_404");
        assert_eq!(action, OrderAction::Cancel);
        responder.send(Err(StoreError::NotFound(id))).unwrap();

        assert_eq!(task.await.unwrap(), Ok(None));
    }

    #[tokio::test]
    async fn refresh_pass_sends_the_current_wall_clock() {
        let (inner, mut rx) = create_mock_client::<Order>(8);
        let client = OrderClient::new(inner);

        let before = now_ms();
        let task = tokio::spawn(async move { crate::scheduler::run_refresh_pass(&client).await });

        let (sent_now, responder) = expect_refresh(&mut rx).await.expect("Expected Refresh");
        assert!(sent_now >= before);
        responder.send(Ok(0)).unwrap();
        task.await.unwrap();
    }
}
