use crate::domain::value_objects::{FeedbackId, FeedbackProbe, Pagination, ProbeCriterion};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// A persisted feedback entry. `id` is `None` until the store assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
pub struct Feedback {
    #[builder(default)]
    id: Option<FeedbackId>,
    rating: i32,
    #[serde(rename = "feedback")]
    #[builder(default)]
    text: Option<String>,
    #[builder(default)]
    customer: Option<String>,
    #[builder(setter(into))]
    product: String,
    #[builder(setter(into))]
    vendor: String,
}

impl Feedback {
    pub fn id(&self) -> Option<&FeedbackId> {
        self.id.as_ref()
    }

    pub fn rating(&self) -> i32 {
        self.rating
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn customer(&self) -> Option<&str> {
        self.customer.as_deref()
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub(crate) fn with_id(self, id: FeedbackId) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }

    /// True when every supplied probe field equals this record's field exactly.
    pub fn matches(&self, probe: &FeedbackProbe) -> bool {
        probe.criteria().iter().all(|criterion| match criterion {
            ProbeCriterion::Rating(rating) => self.rating == *rating,
            ProbeCriterion::Customer(customer) => self.customer.as_ref() == Some(customer),
            ProbeCriterion::Product(product) => &self.product == product,
            ProbeCriterion::Vendor(vendor) => &self.vendor == vendor,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedbackPage {
    total_documents: u64,
    is_first_page: bool,
    is_last_page: bool,
    documents: Vec<Feedback>,
}

impl FeedbackPage {
    pub fn new(pagination: Pagination, total_documents: u64, documents: Vec<Feedback>) -> Self {
        Self {
            total_documents,
            is_first_page: pagination.is_first(),
            is_last_page: pagination.is_last(total_documents),
            documents,
        }
    }

    pub fn total_documents(&self) -> u64 {
        self.total_documents
    }

    pub fn is_first_page(&self) -> bool {
        self.is_first_page
    }

    pub fn is_last_page(&self) -> bool {
        self.is_last_page
    }

    pub fn documents(&self) -> &[Feedback] {
        &self.documents
    }
}
