use serde::{Deserialize, Serialize};

/// Moderation state of a customer review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Pending,
    Approved,
}

/// A customer review of a completed job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub author: String,
    /// Vehicle the work was done on, e.g. "2019 Mustang GT".
    pub vehicle: String,
    pub body: String,
    pub rating: u8,
    pub status: ReviewStatus,
}

/// Payload for submitting a new review. Reviews start out pending.
#[derive(Debug, Clone)]
pub struct ReviewCreate {
    pub author: String,
    pub vehicle: String,
    pub body: String,
    pub rating: u8,
}

/// Custom actions for Review entities.
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewAction {
    /// Moves the review to the given moderation state.
    SetStatus(ReviewStatus),
}

/// Results from ReviewActions - variants match 1:1 with ReviewAction
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewActionResult {
    /// Result from SetStatus - returns the status now in effect.
    SetStatus(ReviewStatus),
}
