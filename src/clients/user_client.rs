use tracing::{debug, instrument};

use crate::domain::{User, UserCreate};
use crate::error::UserError;
use crate::store::CollectionClient;

#[derive(Clone)]
pub struct UserClient {
    inner: CollectionClient<User>,
}

crate::impl_basic_client!(UserClient, User, UserError, user, users);

impl UserClient {
    #[instrument(skip(self, payload), fields(user_name = %payload.name, user_email = %payload.email))]
    pub async fn create_user(&self, payload: UserCreate) -> Result<String, UserError> {
        debug!("Sending request");
        self.inner.create(payload).await.map_err(UserError::from)
    }
}
