use std::path::PathBuf;
use std::time::Duration;

use crate::domain::{Message, Order, Review, ReviewStatus, User};

/// Tunables and first-run datasets for a shop system.
#[derive(Debug, Clone)]
pub struct SystemConfig {
    /// Directory the JSON snapshots live in.
    pub data_dir: PathBuf,
    /// How often the stage scheduler re-evaluates active orders.
    pub refresh_interval: Duration,
    /// Mailbox size of each collection actor.
    pub channel_buffer: usize,
    /// Capacity of the sync broadcast channel.
    pub sync_capacity: usize,
    /// Seed datasets written once, on the very first run only.
    pub seed_orders: Vec<Order>,
    pub seed_users: Vec<User>,
    pub seed_messages: Vec<Message>,
    pub seed_reviews: Vec<Review>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("trimshop-data"),
            refresh_interval: Duration::from_secs(60),
            channel_buffer: 32,
            sync_capacity: 64,
            seed_orders: Vec::new(),
            seed_users: Vec::new(),
            seed_messages: Vec::new(),
            seed_reviews: default_reviews(),
        }
    }
}

/// Testimonials the storefront shows before any real review lands.
pub fn default_reviews() -> Vec<Review> {
    vec![
        Review {
            id: "review_seed_1".to_string(),
            author: "Marcus D.".to_string(),
            vehicle: "2019 Mustang GT".to_string(),
            body: "Full satin black wrap came out flawless. Three weeks in and it still turns heads."
                .to_string(),
            rating: 5,
            status: ReviewStatus::Approved,
        },
        Review {
            id: "review_seed_2".to_string(),
            author: "Priya K.".to_string(),
            vehicle: "2021 Model 3".to_string(),
            body: "Ceramic tint made summer commutes bearable. Clean install, no bubbles."
                .to_string(),
            rating: 5,
            status: ReviewStatus::Approved,
        },
    ]
}
