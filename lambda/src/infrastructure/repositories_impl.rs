use crate::domain::entities::Feedback;
use crate::domain::repositories::{FeedbackRepository, RepositoryError};
use crate::domain::value_objects::{FeedbackId, FeedbackProbe, ProbeValue};
use aws_sdk_dynamodb::client::Waiters;
use aws_sdk_dynamodb::operation::get_item::builders::GetItemFluentBuilder;
use aws_sdk_dynamodb::operation::scan::builders::ScanFluentBuilder;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, BillingMode, KeySchemaElement, KeyType,
    ScalarAttributeType,
};
use aws_sdk_dynamodb::Client;
use serde_dynamo::{from_item, from_items, to_item};
use std::collections::HashMap;
use std::time::Duration;
use typed_builder::TypedBuilder;

const ID_ATTRIBUTE: &str = "id";
const TABLE_READY_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone, TypedBuilder)]
pub struct FeedbackRepositoryImpl {
    client: Client,
    #[builder(setter(into))]
    table_name: String,
}

#[derive(Debug, Default, PartialEq)]
pub(crate) struct FilterExpression {
    expression: String,
    names: HashMap<String, String>,
    values: HashMap<String, AttributeValue>,
}

/// Translates a probe into a `FilterExpression` of `#field = :field` terms.
/// Returns `None` for an empty probe.
pub(crate) fn filter_expression(probe: &FeedbackProbe) -> Option<FilterExpression> {
    let criteria = probe.criteria();
    if criteria.is_empty() {
        return None;
    }

    let mut filter = FilterExpression::default();
    let mut terms = vec![];
    for criterion in criteria {
        let field = criterion.field();
        let name = format!("#{}", field);
        let placeholder = format!(":{}", field);
        let value = match criterion.value() {
            ProbeValue::Number(n) => AttributeValue::N(n.to_string()),
            ProbeValue::Text(s) => AttributeValue::S(s),
        };

        terms.push(format!("{} = {}", name, placeholder));
        filter.names.insert(name, field.to_string());
        filter.values.insert(placeholder, value);
    }
    filter.expression = terms.join(" AND ");

    Some(filter)
}

fn sort_newest_first(feedback: &mut [Feedback]) {
    feedback.sort_by(|a, b| b.id().cmp(&a.id()));
}

impl FeedbackRepositoryImpl {
    /// Creates the table when it does not exist yet. Only meant for local setups.
    pub async fn ensure_table(&self) -> Result<(), RepositoryError> {
        match self
            .client
            .describe_table()
            .table_name(&self.table_name)
            .send()
            .await
        {
            Ok(_) => return Ok(()),
            Err(e)
                if e.as_service_error()
                    .is_some_and(|e| e.is_resource_not_found_exception()) => {}
            Err(e) => return Err(RepositoryError::unavailable(e)),
        }

        tracing::info!("Creating table {}", self.table_name);

        self.client
            .create_table()
            .table_name(&self.table_name)
            .attribute_definitions(
                AttributeDefinition::builder()
                    .attribute_name(ID_ATTRIBUTE)
                    .attribute_type(ScalarAttributeType::S)
                    .build()
                    .map_err(RepositoryError::unavailable)?,
            )
            .key_schema(
                KeySchemaElement::builder()
                    .attribute_name(ID_ATTRIBUTE)
                    .key_type(KeyType::Hash)
                    .build()
                    .map_err(RepositoryError::unavailable)?,
            )
            .billing_mode(BillingMode::PayPerRequest)
            .send()
            .await
            .map_err(RepositoryError::unavailable)?;

        // New tables start out CREATING and reject writes until ACTIVE.
        self.client
            .wait_until_table_exists()
            .table_name(&self.table_name)
            .wait(TABLE_READY_TIMEOUT)
            .await
            .map_err(RepositoryError::unavailable)?;

        Ok(())
    }

    fn get_item_request(&self, id: &FeedbackId) -> GetItemFluentBuilder {
        self.client
            .get_item()
            .table_name(&self.table_name)
            .key(ID_ATTRIBUTE, AttributeValue::S(id.to_string()))
            .consistent_read(true)
    }

    fn scan_request(&self, filter: Option<&FilterExpression>) -> ScanFluentBuilder {
        self.client
            .scan()
            .table_name(&self.table_name)
            .consistent_read(true)
            .set_filter_expression(filter.map(|f| f.expression.clone()))
            .set_expression_attribute_names(filter.map(|f| f.names.clone()))
            .set_expression_attribute_values(filter.map(|f| f.values.clone()))
    }

    async fn scan(&self, filter: Option<FilterExpression>) -> Result<Vec<Feedback>, RepositoryError> {
        let mut results = vec![];
        let mut exclusive_start_key = None;

        loop {
            let resp = self
                .scan_request(filter.as_ref())
                .set_exclusive_start_key(exclusive_start_key)
                .send()
                .await
                .map_err(RepositoryError::unavailable)?;

            if let Some(items) = resp.items {
                let feedback: Vec<Feedback> =
                    from_items(items).map_err(RepositoryError::corrupted)?;
                results.extend(feedback);
            }

            match resp.last_evaluated_key {
                Some(last_evaluated_key) => {
                    exclusive_start_key = Some(last_evaluated_key);
                }
                None => {
                    break;
                }
            }
        }

        sort_newest_first(&mut results);

        Ok(results)
    }
}

impl FeedbackRepository for FeedbackRepositoryImpl {
    async fn add_feedback(&self, feedback: Feedback) -> Result<FeedbackId, RepositoryError> {
        let id = FeedbackId::generate();
        let item = to_item(feedback.with_id(id.clone())).map_err(RepositoryError::corrupted)?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(#id)")
            .expression_attribute_names("#id", ID_ATTRIBUTE)
            .send()
            .await
            .map_err(RepositoryError::unavailable)?;

        Ok(id)
    }

    async fn get_feedback(&self, id: &FeedbackId) -> Result<Option<Feedback>, RepositoryError> {
        let resp = self
            .get_item_request(id)
            .send()
            .await
            .map_err(RepositoryError::unavailable)?;

        resp.item
            .map(from_item)
            .transpose()
            .map_err(RepositoryError::corrupted)
    }

    async fn list_feedback(&self) -> Result<Vec<Feedback>, RepositoryError> {
        self.scan(None).await
    }

    async fn list_feedback_page(
        &self,
        probe: &FeedbackProbe,
        offset: usize,
        limit: usize,
    ) -> Result<(Vec<Feedback>, u64), RepositoryError> {
        let matching = self.scan(filter_expression(probe)).await?;
        let total = matching.len() as u64;
        let documents = matching.into_iter().skip(offset).take(limit).collect();

        Ok((documents, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::config::{BehaviorVersion, Region};

    fn repo() -> FeedbackRepositoryImpl {
        let config = aws_sdk_dynamodb::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .build();

        FeedbackRepositoryImpl::builder()
            .client(Client::from_conf(config))
            .table_name("feedback")
            .build()
    }

    #[test]
    fn test_get_item_reads_are_strongly_consistent() {
        let request = repo().get_item_request(&FeedbackId::from("id-1"));

        assert_eq!(request.get_consistent_read(), &Some(true));
        assert_eq!(request.get_table_name().as_deref(), Some("feedback"));
    }

    #[test]
    fn test_scan_reads_are_strongly_consistent() {
        let repo = repo();

        let unfiltered = repo.scan_request(None);
        assert_eq!(unfiltered.get_consistent_read(), &Some(true));
        assert_eq!(unfiltered.get_filter_expression(), &None);

        let probe = FeedbackProbe::new(Some(5), None, None, None);
        let filter = filter_expression(&probe).unwrap();
        let filtered = repo.scan_request(Some(&filter));
        assert_eq!(filtered.get_consistent_read(), &Some(true));
        assert_eq!(
            filtered.get_filter_expression().as_deref(),
            Some("#rating = :rating")
        );
    }

    #[test]
    fn test_filter_expression_empty_probe() {
        assert_eq!(filter_expression(&FeedbackProbe::default()), None);
    }

    #[test]
    fn test_filter_expression_supplied_fields() {
        let probe = FeedbackProbe::new(
            Some(5),
            Some("alice".to_string()),
            None,
            Some("v1".to_string()),
        );
        let filter = filter_expression(&probe).unwrap();

        assert_eq!(
            filter.expression,
            "#rating = :rating AND #customer = :customer AND #vendor = :vendor"
        );
        assert_eq!(filter.names.len(), 3);
        assert_eq!(filter.names["#customer"], "customer");
        assert_eq!(filter.values[":rating"], AttributeValue::N("5".to_string()));
        assert_eq!(
            filter.values[":vendor"],
            AttributeValue::S("v1".to_string())
        );
        assert!(!filter.values.contains_key(":product"));
    }

    #[test]
    fn test_feedback_item_layout() {
        let feedback = Feedback::builder()
            .rating(4)
            .customer(Some("alice".to_string()))
            .product("p1")
            .vendor("v1")
            .build()
            .with_id(FeedbackId::from("id-1"));

        let item: HashMap<String, AttributeValue> = to_item(feedback.clone()).unwrap();
        assert_eq!(item["id"], AttributeValue::S("id-1".to_string()));
        assert_eq!(item["rating"], AttributeValue::N("4".to_string()));
        assert_eq!(item["product"], AttributeValue::S("p1".to_string()));

        let back: Feedback = from_item(item).unwrap();
        assert_eq!(back, feedback);
    }

    #[test]
    fn test_sort_newest_first() {
        let mut feedback: Vec<Feedback> = ["a", "c", "b"]
            .into_iter()
            .map(|id| {
                Feedback::builder()
                    .rating(1)
                    .product("p")
                    .vendor("v")
                    .build()
                    .with_id(FeedbackId::from(id))
            })
            .collect();

        sort_newest_first(&mut feedback);

        let ids: Vec<_> = feedback.iter().map(|f| f.id().unwrap().as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }
}
