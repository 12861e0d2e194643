use tracing::{debug, info, instrument};

use crate::domain::{CheckoutForm, Order, OrderAction, OrderActionResult, TrackingStage};
use crate::error::{OrderError, StoreError};
use crate::store::CollectionClient;

/// Client for the order collection actor.
///
/// Checkout and cancellation carry order-specific semantics on top of the
/// generic collection operations.
#[derive(Clone)]
pub struct OrderClient {
    inner: CollectionClient<Order>,
}

crate::impl_basic_client!(OrderClient, Order, OrderError, order, orders);

impl OrderClient {
    /// Places an order. The store assigns the id, the creation instant,
    /// `Confirmed` status and the initial tracking stage.
    #[instrument(skip(self, form), fields(buyer = %form.buyer_name, title = %form.title))]
    pub async fn create_order(&self, form: CheckoutForm) -> Result<String, OrderError> {
        info!("Processing create_order request");
        self.inner.create(form).await.map_err(OrderError::from)
    }

    /// Cancels an order, freezing its tracking stage at its current value.
    ///
    /// Unknown ids and already-inactive orders are silent no-ops; returns
    /// the frozen stage only when a cancellation actually happened.
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, id: String) -> Result<Option<TrackingStage>, OrderError> {
        debug!("Sending request");
        match self.inner.action(id, OrderAction::Cancel).await {
            Ok(OrderActionResult::Cancelled(stage)) => Ok(Some(stage)),
            Ok(OrderActionResult::Unchanged) => Ok(None),
            Err(StoreError::NotFound(id)) => {
                debug!(id = %id, "Cancel on unknown order ignored");
                Ok(None)
            }
            Err(e) => Err(OrderError::from(e)),
        }
    }

    /// One stage-refresh pass over the whole collection; returns how many
    /// orders advanced.
    #[instrument(skip(self))]
    pub async fn refresh_stages(&self, now_ms: u64) -> Result<usize, OrderError> {
        debug!("Sending request");
        self.inner.refresh(now_ms).await.map_err(OrderError::from)
    }
}
