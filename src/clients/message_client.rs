use tracing::{debug, instrument};

use crate::domain::{Message, MessageCreate};
use crate::error::MessageError;
use crate::store::CollectionClient;

#[derive(Clone)]
pub struct MessageClient {
    inner: CollectionClient<Message>,
}

crate::impl_basic_client!(MessageClient, Message, MessageError, message, messages);

impl MessageClient {
    #[instrument(skip(self, payload), fields(sender = %payload.name))]
    pub async fn create_message(&self, payload: MessageCreate) -> Result<String, MessageError> {
        debug!("Sending request");
        self.inner.create(payload).await.map_err(MessageError::from)
    }
}
