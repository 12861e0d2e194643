//! [`Record`] bindings for the four admin-managed collections.

use crate::domain::{
    CheckoutForm, Message, MessageCreate, Order, OrderAction, OrderActionResult, OrderStatus,
    Review, ReviewAction, ReviewActionResult, ReviewCreate, ReviewStatus, TrackingStage, User,
    UserCreate, DEFAULT_PAYMENT_METHOD,
};
use crate::error::StoreError;
use crate::stage::now_ms;
use crate::store::record::{contains_ci, Record};

impl Record for Order {
    type Id = String;
    type CreatePayload = CheckoutForm;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;

    const COLLECTION: &'static str = "orders";
    const ALIASES: &'static [&'static str] = &["orderHistory"];

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a confirmed order from a checkout form. The creation instant
    /// and the initial tracking stage are assigned here, never by the caller.
    fn from_create(id: String, form: CheckoutForm) -> Result<Self, StoreError> {
        if form.buyer_name.trim().is_empty() {
            return Err(StoreError::Validation("buyer name required".to_string()));
        }
        if form.buyer_email.trim().is_empty() {
            return Err(StoreError::Validation("buyer email required".to_string()));
        }
        if form.title.trim().is_empty() {
            return Err(StoreError::Validation("order title required".to_string()));
        }
        if !form.price.is_finite() || form.price < 0.0 {
            return Err(StoreError::Validation(format!(
                "invalid price: {}",
                form.price
            )));
        }
        Ok(Self {
            id,
            buyer_name: form.buyer_name,
            buyer_email: form.buyer_email,
            title: form.title,
            price: form.price,
            address: form.address,
            payment_method: form
                .payment_method
                .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string()),
            created_at_ms: now_ms(),
            status: OrderStatus::Confirmed,
            tracking_stage: TrackingStage::OrderConfirmed,
        })
    }

    fn matches(&self, query: &str) -> bool {
        contains_ci(&self.buyer_name, query)
            || contains_ci(&self.buyer_email, query)
            || contains_ci(&self.title, query)
    }

    fn handle_action(&mut self, action: OrderAction) -> Result<OrderActionResult, StoreError> {
        match action {
            OrderAction::Cancel => Ok(self.cancel()),
        }
    }

    fn refresh(&mut self, now_ms: u64) -> bool {
        self.refresh_stage(now_ms)
    }
}

impl Record for User {
    type Id = String;
    type CreatePayload = UserCreate;
    type Action = ();
    type ActionResult = ();

    const COLLECTION: &'static str = "users";

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create(id: String, payload: UserCreate) -> Result<Self, StoreError> {
        if payload.email.trim().is_empty() {
            return Err(StoreError::Validation("email required".to_string()));
        }
        Ok(Self {
            id,
            name: payload.name,
            email: payload.email,
        })
    }

    fn matches(&self, query: &str) -> bool {
        contains_ci(&self.name, query) || contains_ci(&self.email, query)
    }

    /// No custom actions are defined for users.
    fn handle_action(&mut self, _action: ()) -> Result<(), StoreError> {
        Ok(())
    }
}

impl Record for Message {
    type Id = String;
    type CreatePayload = MessageCreate;
    type Action = ();
    type ActionResult = ();

    const COLLECTION: &'static str = "messages";

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create(id: String, payload: MessageCreate) -> Result<Self, StoreError> {
        if payload.body.trim().is_empty() {
            return Err(StoreError::Validation("message body required".to_string()));
        }
        Ok(Self {
            id,
            name: payload.name,
            email: payload.email,
            body: payload.body,
            sent_at_ms: now_ms(),
        })
    }

    fn matches(&self, query: &str) -> bool {
        contains_ci(&self.name, query)
            || contains_ci(&self.email, query)
            || contains_ci(&self.body, query)
    }

    /// No custom actions are defined for messages.
    fn handle_action(&mut self, _action: ()) -> Result<(), StoreError> {
        Ok(())
    }
}

impl Record for Review {
    type Id = String;
    type CreatePayload = ReviewCreate;
    type Action = ReviewAction;
    type ActionResult = ReviewActionResult;

    const COLLECTION: &'static str = "reviews";

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create(id: String, payload: ReviewCreate) -> Result<Self, StoreError> {
        if !(1..=5).contains(&payload.rating) {
            return Err(StoreError::Validation(format!(
                "rating out of range: {}",
                payload.rating
            )));
        }
        Ok(Self {
            id,
            author: payload.author,
            vehicle: payload.vehicle,
            body: payload.body,
            rating: payload.rating,
            status: ReviewStatus::Pending,
        })
    }

    fn matches(&self, query: &str) -> bool {
        contains_ci(&self.author, query)
            || contains_ci(&self.vehicle, query)
            || contains_ci(&self.body, query)
    }

    fn handle_action(&mut self, action: ReviewAction) -> Result<ReviewActionResult, StoreError> {
        match action {
            ReviewAction::SetStatus(status) => {
                self.status = status;
                Ok(ReviewActionResult::SetStatus(self.status))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkout_form() -> CheckoutForm {
        CheckoutForm {
            buyer_name: "Asha".to_string(),
            buyer_email: "asha@example.com".to_string(),
            title: "Full Vinyl Wrap".to_string(),
            price: 5000.0,
            address: "12 Garage Lane".to_string(),
            payment_method: None,
        }
    }

    #[test]
    fn checkout_assigns_initial_lifecycle_fields() {
        let order = Order::from_create("order_1".to_string(), checkout_form()).expect("create");
        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.tracking_stage, TrackingStage::OrderConfirmed);
        assert_eq!(order.payment_method, DEFAULT_PAYMENT_METHOD);
        assert!(order.created_at_ms > 0);
    }

    #[test]
    fn checkout_rejects_negative_price() {
        let form = CheckoutForm {
            price: -1.0,
            ..checkout_form()
        };
        assert!(matches!(
            Order::from_create("order_1".to_string(), form),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn order_search_covers_buyer_and_title() {
        let order = Order::from_create("order_1".to_string(), checkout_form()).expect("create");
        assert!(order.matches("asha"));
        assert!(order.matches("VINYL"));
        assert!(!order.matches("tint"));
    }

    #[test]
    fn review_rating_is_bounded() {
        let payload = ReviewCreate {
            author: "Marcus".to_string(),
            vehicle: "2019 Mustang GT".to_string(),
            body: "Flawless wrap".to_string(),
            rating: 6,
        };
        assert!(Review::from_create("review_1".to_string(), payload).is_err());
    }

    #[test]
    fn review_status_action_reports_new_state() {
        let mut review = Review::from_create(
            "review_1".to_string(),
            ReviewCreate {
                author: "Marcus".to_string(),
                vehicle: "2019 Mustang GT".to_string(),
                body: "Flawless wrap".to_string(),
                rating: 5,
            },
        )
        .expect("create");
        assert_eq!(review.status, ReviewStatus::Pending);

        let result = review
            .handle_action(ReviewAction::SetStatus(ReviewStatus::Approved))
            .expect("action");
        assert_eq!(result, ReviewActionResult::SetStatus(ReviewStatus::Approved));
        assert_eq!(review.status, ReviewStatus::Approved);
    }
}
