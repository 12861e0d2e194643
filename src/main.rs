mod admin;
mod app_system;
mod clients;
mod domain;
mod error;
mod normalize;
mod scheduler;
mod stage;
mod store;
mod sync;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
mod mock_framework;

use tracing::{error, info, warn, Instrument};

use crate::admin::AdminCollection;
use crate::app_system::{setup_tracing, ShopSystem, SystemConfig};
use crate::domain::{CheckoutForm, MessageCreate, ReviewCreate, ReviewStatus, UserCreate};
use crate::stage::{now_ms, order_stage};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting trimshop order system");

    let system = ShopSystem::start(SystemConfig::default()).map_err(|e| e.to_string())?;

    // Storefront mirror, kept current by the sync channel.
    let order_view = system.order_view();
    let follower = order_view.follow(&system.sync);

    // Register a customer account.
    let span = tracing::info_span!("user_registration");
    let user_id = async {
        info!("Creating demo user");
        system
            .users
            .create_user(UserCreate {
                name: "Asha Rao".to_string(),
                email: "asha@example.com".to_string(),
            })
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;
    info!(user_id = %user_id, "User created successfully");

    // Place an order.
    let form = CheckoutForm {
        buyer_name: "Asha Rao".to_string(),
        buyer_email: "asha@example.com".to_string(),
        title: "Full Vinyl Wrap".to_string(),
        price: 5000.0,
        address: "12 Garage Lane, Pune".to_string(),
        payment_method: None,
    };

    let span = tracing::info_span!("checkout");
    let order_id = async {
        info!("Placing demo order");
        system
            .orders
            .create_order(form)
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;
    info!(order_id = %order_id, "Order placed");

    if let Some(order) = system
        .orders
        .get_order(order_id.clone())
        .await
        .map_err(|e| e.to_string())?
    {
        info!(stage = %order_stage(&order, now_ms()), "Current fulfillment stage");
    }

    // A visitor leaves an enquiry and a review.
    system
        .messages
        .create_message(MessageCreate {
            name: "Marcus D.".to_string(),
            email: "marcus@example.com".to_string(),
            body: "Do you wrap motorcycles as well?".to_string(),
        })
        .await
        .map_err(|e| e.to_string())?;

    let review_id = system
        .reviews
        .create_review(ReviewCreate {
            author: "Asha Rao".to_string(),
            vehicle: "2020 Swift".to_string(),
            body: "Wrap quality exceeded expectations".to_string(),
            rating: 5,
        })
        .await
        .map_err(|e| e.to_string())?;

    // Admin-side moderation and lookups.
    system
        .admin
        .set_review_status(review_id, ReviewStatus::Approved)
        .await
        .map_err(|e| e.to_string())?;

    let hits = system
        .admin
        .search(AdminCollection::Orders, "asha")
        .await
        .map_err(|e| e.to_string())?;
    if hits.is_empty() {
        warn!("Admin search came back empty");
    } else {
        info!(hits = hits.len(), "Admin search for buyer");
    }

    match system.admin.cancel_order(order_id.clone()).await {
        Ok(Some(stage)) => info!(frozen_stage = %stage, "Order cancelled"),
        Ok(None) => info!("Order was already inactive"),
        Err(e) => error!(error = %e, "Cancellation failed"),
    }

    // Two-phase delete of the demo order.
    let ticket = system
        .admin
        .request_delete(AdminCollection::Orders, order_id);
    info!(target = ?ticket.target(), id = %ticket.id(), "Confirming delete");
    let removed = system
        .admin
        .confirm_delete(ticket)
        .await
        .map_err(|e| e.to_string())?;
    info!(removed, "Demo order deleted");

    info!(mirrored_orders = order_view.snapshot().len(), "Storefront view state");

    follower.abort();
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
