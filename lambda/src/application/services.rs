use crate::domain::entities::{Feedback, FeedbackPage};
use crate::domain::repositories::{FeedbackRepository, RepositoryError};
use crate::domain::value_objects::{FeedbackId, FeedbackProbe, Pagination};
use typed_builder::TypedBuilder;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("feedback not found: {0}")]
    NotFound(FeedbackId),

    #[error(transparent)]
    StoreUnavailable(#[from] RepositoryError),
}

/// Untrusted listing parameters as they arrive from the caller.
#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct ListFeedbackParams {
    #[builder(default)]
    pub page: Option<i32>,
    #[builder(default)]
    pub per_page: Option<i32>,
    #[builder(default)]
    pub rating: Option<i32>,
    #[builder(default)]
    pub customer: Option<String>,
    #[builder(default)]
    pub product: Option<String>,
    #[builder(default)]
    pub vendor: Option<String>,
}

#[derive(Clone, TypedBuilder)]
pub struct FeedbackService<R> {
    repo: R,
}

impl<R: FeedbackRepository> FeedbackService<R> {
    /// Persists a new record and returns the id the store assigned. Any id already
    /// present on `feedback` is discarded.
    pub async fn upload_feedback(&self, feedback: Feedback) -> Result<FeedbackId, ServiceError> {
        let id = self.repo.add_feedback(feedback).await?;
        tracing::info!("Stored feedback {}", id);
        Ok(id)
    }

    pub async fn get_feedback(&self, id: &str) -> Result<Feedback, ServiceError> {
        let id = FeedbackId::from(id);
        self.repo
            .get_feedback(&id)
            .await?
            .ok_or(ServiceError::NotFound(id))
    }

    pub async fn list_feedback(&self) -> Result<Vec<Feedback>, ServiceError> {
        Ok(self.repo.list_feedback().await?)
    }

    pub async fn list_feedback_page(
        &self,
        params: ListFeedbackParams,
    ) -> Result<FeedbackPage, ServiceError> {
        let pagination = Pagination::resolve(params.page, params.per_page);
        let probe = FeedbackProbe::new(
            params.rating,
            params.customer,
            params.product,
            params.vendor,
        );

        let (documents, total) = self
            .repo
            .list_feedback_page(&probe, pagination.offset(), pagination.limit())
            .await?;

        Ok(FeedbackPage::new(pagination, total, documents))
    }
}
