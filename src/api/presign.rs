//! Presigned URL Lambda: `GET|PUT|DELETE /?key=` returns a 15 minute URL for that operation.

use std::time::Duration;
use tracing::{error, info};

use super::helpers;
use super::parsing::ApiRequest;
use crate::core::config::AppConfig;
use crate::core::models::ApiResponse;
use crate::errors::RequestError;
use crate::storage::{ObjectStorage, PresignMethod};

pub const OBJECT_URL_EXPIRY: Duration = Duration::from_secs(15 * 60);

pub struct PresignHandler<S> {
    config: AppConfig,
    storage: S,
}

impl<S: ObjectStorage> PresignHandler<S> {
    pub fn new(config: AppConfig, storage: S) -> Self {
        Self { config, storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    #[tracing::instrument(level = "info", skip_all, fields(method = %request.method))]
    pub async fn handle(&self, request: &ApiRequest) -> ApiResponse {
        let response = match self.presign(request).await {
            Ok(response) => response,
            Err(e) => {
                error!(status = e.status_code(), "Rejected request: {}", e);
                helpers::request_error_response(&e)
            }
        };
        helpers::with_cors(response, self.config.cors_allow_origin.as_deref())
    }

    async fn presign(&self, request: &ApiRequest) -> Result<ApiResponse, RequestError> {
        let key = request.require_param("key")?;
        let method = PresignMethod::from_http_method(&request.method)
            .ok_or_else(|| RequestError::MethodNotAllowed(request.method.clone()))?;

        let response = match self
            .storage
            .presign_object(method, &self.config.bucket_name, key, OBJECT_URL_EXPIRY)
            .await
        {
            Ok(presigned) => {
                info!(%method, "Generated presigned url");
                helpers::create_response(200, &presigned)
            }
            Err(e) => {
                error!(%method, "Failed to generate presigned url: {}", e);
                helpers::err_response(500, "Failed to generate presigned url")
            }
        };
        Ok(response)
    }
}
