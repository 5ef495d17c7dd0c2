use aws_config::BehaviorVersion;
use feedback_service::infrastructure::repositories_impl::FeedbackRepositoryImpl;
use feedback_service::interface::routers::create_app;
use lambda_http::{run, tracing, Error};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let table_name = std::env::var("TABLE_NAME").expect("TABLE_NAME is not set");
    let endpoint = std::env::var("DYNAMODB_ENDPOINT").ok();
    let create_table = std::env::var("CREATE_TABLE")
        .map(|v| v == "true")
        .unwrap_or(false);

    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let mut dynamodb_config = aws_sdk_dynamodb::config::Builder::from(&config);
    if let Some(endpoint) = endpoint {
        tracing::info!("Using DynamoDB endpoint {}", endpoint);
        dynamodb_config = dynamodb_config.endpoint_url(endpoint);
    }
    let dynamodb_client = aws_sdk_dynamodb::Client::from_conf(dynamodb_config.build());

    let repo = FeedbackRepositoryImpl::builder()
        .client(dynamodb_client)
        .table_name(table_name)
        .build();

    if create_table {
        repo.ensure_table().await?;
    }

    run(create_app(repo)).await
}
