use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Formatter;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct FeedbackId(String);

impl fmt::Display for FeedbackId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FeedbackId {
    /// Time-ordered id: later ids compare greater than earlier ones.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for FeedbackId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for FeedbackId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 10;
pub const MIN_PER_PAGE: u32 = 5;
pub const MAX_PER_PAGE: u32 = 20;

/// Page position after defaulting untrusted input. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Pagination {
    /// Never fails: a missing or out-of-range value falls back to its default.
    /// `page` has no upper bound.
    pub fn resolve(page: Option<i32>, per_page: Option<i32>) -> Self {
        let page = match page {
            Some(page) if page >= 1 => page as u32,
            _ => DEFAULT_PAGE,
        };
        let per_page = match per_page {
            Some(per_page) if (MIN_PER_PAGE as i32..=MAX_PER_PAGE as i32).contains(&per_page) => {
                per_page as u32
            }
            _ => DEFAULT_PER_PAGE,
        };

        Self { page, per_page }
    }

    pub fn offset(&self) -> usize {
        (self.page as usize - 1).saturating_mul(self.per_page as usize)
    }

    pub fn limit(&self) -> usize {
        self.per_page as usize
    }

    pub fn is_first(&self) -> bool {
        self.page == DEFAULT_PAGE
    }

    pub fn is_last(&self, total_documents: u64) -> bool {
        u64::from(self.page) * u64::from(self.per_page) >= total_documents
    }
}

/// A value a probe field must equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeValue {
    Number(i32),
    Text(String),
}

/// One supplied probe field together with the value it must equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeCriterion {
    Rating(i32),
    Customer(String),
    Product(String),
    Vendor(String),
}

impl ProbeCriterion {
    /// Stored attribute name of the field.
    pub fn field(&self) -> &'static str {
        match self {
            ProbeCriterion::Rating(_) => "rating",
            ProbeCriterion::Customer(_) => "customer",
            ProbeCriterion::Product(_) => "product",
            ProbeCriterion::Vendor(_) => "vendor",
        }
    }

    pub fn value(&self) -> ProbeValue {
        match self {
            ProbeCriterion::Rating(rating) => ProbeValue::Number(*rating),
            ProbeCriterion::Customer(s) | ProbeCriterion::Product(s) | ProbeCriterion::Vendor(s) => {
                ProbeValue::Text(s.clone())
            }
        }
    }
}

/// Partial record used as an equality filter. Absent fields impose no constraint.
/// The free-text `feedback` field is never part of a probe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackProbe {
    rating: Option<i32>,
    customer: Option<String>,
    product: Option<String>,
    vendor: Option<String>,
}

impl FeedbackProbe {
    pub fn new(
        rating: Option<i32>,
        customer: Option<String>,
        product: Option<String>,
        vendor: Option<String>,
    ) -> Self {
        Self {
            rating,
            customer,
            product,
            vendor,
        }
    }

    /// The supplied fields only, in a fixed order.
    pub fn criteria(&self) -> Vec<ProbeCriterion> {
        let mut criteria = vec![];
        if let Some(rating) = self.rating {
            criteria.push(ProbeCriterion::Rating(rating));
        }
        if let Some(customer) = &self.customer {
            criteria.push(ProbeCriterion::Customer(customer.clone()));
        }
        if let Some(product) = &self.product {
            criteria.push(ProbeCriterion::Product(product.clone()));
        }
        if let Some(vendor) = &self.vendor {
            criteria.push(ProbeCriterion::Vendor(vendor.clone()));
        }
        criteria
    }
}
