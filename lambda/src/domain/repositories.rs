use crate::domain::entities::Feedback;
use crate::domain::value_objects::{FeedbackId, FeedbackProbe};
use std::future::Future;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("document store unavailable: {0}")]
    Unavailable(#[source] BoxError),

    #[error("stored document could not be read: {0}")]
    Corrupted(#[source] BoxError),
}

impl RepositoryError {
    pub fn unavailable(error: impl Into<BoxError>) -> Self {
        Self::Unavailable(error.into())
    }

    pub fn corrupted(error: impl Into<BoxError>) -> Self {
        Self::Corrupted(error.into())
    }
}

/// Access to the feedback collection. Listings are ordered by id, descending.
pub trait FeedbackRepository: Clone + Send + Sync + 'static {
    /// Inserts a new record and returns the id the store assigned to it.
    fn add_feedback(
        &self,
        feedback: Feedback,
    ) -> impl Future<Output = Result<FeedbackId, RepositoryError>> + Send;

    fn get_feedback(
        &self,
        id: &FeedbackId,
    ) -> impl Future<Output = Result<Option<Feedback>, RepositoryError>> + Send;

    fn list_feedback(&self) -> impl Future<Output = Result<Vec<Feedback>, RepositoryError>> + Send;

    /// Returns the `[offset, offset + limit)` slice of the records matching `probe`
    /// together with the number of matching records.
    fn list_feedback_page(
        &self,
        probe: &FeedbackProbe,
        offset: usize,
        limit: usize,
    ) -> impl Future<Output = Result<(Vec<Feedback>, u64), RepositoryError>> + Send;
}
