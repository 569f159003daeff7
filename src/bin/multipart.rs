use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use s3_upload_gateway::api::{ApiRequest, MultipartHandler};
use s3_upload_gateway::core::config::AppConfig;
use s3_upload_gateway::storage::S3Storage;
use serde_json::Value;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Error> {
    s3_upload_gateway::setup_logging();

    // Missing configuration is fatal: fail before the runtime accepts any event
    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;
    info!(bucket = %config.bucket_name, region = %config.region, "Starting multipart Lambda");

    let storage = S3Storage::from_config(&config).await;
    let handler = MultipartHandler::new(config, storage);
    let handler = &handler;

    run(service_fn(move |event: LambdaEvent<Value>| async move {
        info!(request_id = %event.context.request_id, "Multipart Lambda received request");
        let request = ApiRequest::from_event(&event.payload);
        Ok::<_, Error>(handler.handle(&request).await)
    }))
    .await
}
