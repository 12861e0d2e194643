use tracing::{debug, instrument};

use crate::domain::{Review, ReviewAction, ReviewActionResult, ReviewCreate, ReviewStatus};
use crate::error::{ReviewError, StoreError};
use crate::store::CollectionClient;

#[derive(Clone)]
pub struct ReviewClient {
    inner: CollectionClient<Review>,
}

crate::impl_basic_client!(ReviewClient, Review, ReviewError, review, reviews);

impl ReviewClient {
    #[instrument(skip(self, payload), fields(author = %payload.author))]
    pub async fn create_review(&self, payload: ReviewCreate) -> Result<String, ReviewError> {
        debug!("Sending request");
        self.inner.create(payload).await.map_err(ReviewError::from)
    }

    /// Moves a review between moderation states. Unknown ids are a silent
    /// no-op; returns the status now in effect when the review exists.
    #[instrument(skip(self))]
    pub async fn set_review_status(
        &self,
        id: String,
        status: ReviewStatus,
    ) -> Result<Option<ReviewStatus>, ReviewError> {
        debug!("Sending request");
        match self.inner.action(id, ReviewAction::SetStatus(status)).await {
            Ok(ReviewActionResult::SetStatus(status)) => Ok(Some(status)),
            Err(StoreError::NotFound(id)) => {
                debug!(id = %id, "Status change on unknown review ignored");
                Ok(None)
            }
            Err(e) => Err(ReviewError::from(e)),
        }
    }
}
