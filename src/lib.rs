/// S3 upload gateway - two Lambda functions that hand out S3 upload and download access.
///
/// This crate backs two API Gateway Lambdas:
/// 1. A multipart Lambda that starts a multipart upload and presigns its part URLs,
///    then completes or aborts the upload on request
/// 2. A presign Lambda that returns a short-lived GET, PUT or DELETE URL for one object
///
/// # Architecture
///
/// The system uses:
/// - AWS Lambda for serverless execution
/// - aws-sdk-s3 for multipart uploads and request presigning
/// - Tokio for async runtime
///
/// Handlers take their [`core::config::AppConfig`] and an [`storage::ObjectStorage`]
/// at construction, so tests can swap in an in-memory store.
///
/// # Example
///
/// ```no_run
/// use s3_upload_gateway::api::{ApiRequest, PresignHandler};
/// use s3_upload_gateway::core::config::AppConfig;
/// use s3_upload_gateway::storage::S3Storage;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     s3_upload_gateway::setup_logging();
///
///     let config = AppConfig::from_env()?;
///     let storage = S3Storage::from_config(&config).await;
///     let handler = PresignHandler::new(config, storage);
///
///     let event = serde_json::json!({
///         "httpMethod": "GET",
///         "path": "/",
///         "queryStringParameters": { "key": "reports/2024.pdf" }
///     });
///     let response = handler.handle(&ApiRequest::from_event(&event)).await;
///     println!("{}: {}", response.status_code, response.body);
///
///     Ok(())
/// }
/// ```
pub mod api;
pub mod core;
pub mod errors;
pub mod storage;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration. It should be called once at Lambda startup;
/// repeated calls are ignored.
///
/// # Example
///
/// ```
/// s3_upload_gateway::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}
