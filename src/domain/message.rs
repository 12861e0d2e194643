use serde::{Deserialize, Serialize};

/// A contact-form message left by a visitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub name: String,
    pub email: String,
    pub body: String,
    #[serde(rename = "sentAt")]
    pub sent_at_ms: u64,
}

/// Payload for recording a new message.
#[derive(Debug, Clone)]
pub struct MessageCreate {
    pub name: String,
    pub email: String,
    pub body: String,
}
