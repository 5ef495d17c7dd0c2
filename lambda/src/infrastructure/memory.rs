use crate::domain::entities::Feedback;
use crate::domain::repositories::{FeedbackRepository, RepositoryError};
use crate::domain::value_objects::{FeedbackId, FeedbackProbe};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Collection {
    next_sequence: u64,
    documents: BTreeMap<FeedbackId, Feedback>,
}

/// Process-local feedback collection. Ids are 24 hex digits issued from a counter,
/// so they sort in insertion order.
#[derive(Clone, Default)]
pub struct InMemoryFeedbackRepository {
    inner: Arc<RwLock<Collection>>,
}

impl InMemoryFeedbackRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FeedbackRepository for InMemoryFeedbackRepository {
    async fn add_feedback(&self, feedback: Feedback) -> Result<FeedbackId, RepositoryError> {
        let mut collection = self.inner.write().await;
        collection.next_sequence += 1;
        let id = FeedbackId::from(format!("{:024x}", collection.next_sequence));

        collection
            .documents
            .insert(id.clone(), feedback.with_id(id.clone()));

        Ok(id)
    }

    async fn get_feedback(&self, id: &FeedbackId) -> Result<Option<Feedback>, RepositoryError> {
        Ok(self.inner.read().await.documents.get(id).cloned())
    }

    async fn list_feedback(&self) -> Result<Vec<Feedback>, RepositoryError> {
        Ok(self
            .inner
            .read()
            .await
            .documents
            .values()
            .rev()
            .cloned()
            .collect())
    }

    async fn list_feedback_page(
        &self,
        probe: &FeedbackProbe,
        offset: usize,
        limit: usize,
    ) -> Result<(Vec<Feedback>, u64), RepositoryError> {
        let collection = self.inner.read().await;
        let matching: Vec<&Feedback> = collection
            .documents
            .values()
            .rev()
            .filter(|feedback| feedback.matches(probe))
            .collect();

        let total = matching.len() as u64;
        let documents = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        Ok((documents, total))
    }
}
