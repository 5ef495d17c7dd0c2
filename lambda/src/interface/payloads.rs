use crate::application::services::ListFeedbackParams;
use crate::domain::entities::Feedback;
use crate::util::parse_lenient_i32;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct UploadFeedback {
    rating: i32,
    #[serde(default)]
    feedback: Option<String>,
    #[serde(default)]
    customer: Option<String>,
    product: String,
    vendor: String,
}

impl From<UploadFeedback> for Feedback {
    fn from(value: UploadFeedback) -> Self {
        Feedback::builder()
            .rating(value.rating)
            .text(value.feedback)
            .customer(value.customer)
            .product(value.product)
            .vendor(value.vendor)
            .build()
    }
}

/// Listing parameters taken from raw query pairs. Only the first occurrence of a
/// key counts, unknown keys are ignored and an unparsable number is left unset,
/// so one bad parameter never discards the others.
#[derive(Debug, Default)]
pub(crate) struct ListFeedbackQuery {
    page: Option<i32>,
    per_page: Option<i32>,
    rating: Option<i32>,
    customer: Option<String>,
    product: Option<String>,
    vendor: Option<String>,
}

impl From<Vec<(String, String)>> for ListFeedbackQuery {
    fn from(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        let mut seen: Vec<String> = vec![];

        for (key, value) in pairs {
            if seen.contains(&key) {
                continue;
            }
            match key.as_str() {
                "page" => query.page = parse_lenient_i32(&value),
                "perPage" => query.per_page = parse_lenient_i32(&value),
                "rating" => query.rating = parse_lenient_i32(&value),
                "customer" => query.customer = Some(value),
                "product" => query.product = Some(value),
                "vendor" => query.vendor = Some(value),
                _ => {}
            }
            seen.push(key);
        }

        query
    }
}

impl From<ListFeedbackQuery> for ListFeedbackParams {
    fn from(value: ListFeedbackQuery) -> Self {
        ListFeedbackParams::builder()
            .page(value.page)
            .per_page(value.per_page)
            .rating(value.rating)
            .customer(value.customer)
            .product(value.product)
            .vendor(value.vendor)
            .build()
    }
}
