//! Multipart upload Lambda.
//!
//! - `POST /getpresignedurls?key=` starts an upload and presigns its part URLs
//! - `POST /completeupload?key=&uploadId=` completes it
//! - `POST /abortupload?key=&uploadId=` aborts it

use std::time::Duration;
use tracing::{error, info, warn};

use super::helpers;
use super::parsing::ApiRequest;
use crate::core::config::AppConfig;
use crate::core::models::{ApiResponse, CompleteUploadBody};
use crate::errors::RequestError;
use crate::storage::ObjectStorage;

pub const PART_COUNT: i32 = 10;
pub const PART_URL_EXPIRY: Duration = Duration::from_secs(15 * 60 * 60);
pub const UPLOAD_ID_HEADER: &str = "X-Upload-Id";
pub const ABORT_SUCCESS_MESSAGE: &str = "Multipart upload aborted successfully";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultipartRoute {
    PresignParts,
    Complete,
    Abort,
}

impl MultipartRoute {
    /// Exact path match; anything else is a 404.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/getpresignedurls" => Some(Self::PresignParts),
            "/completeupload" => Some(Self::Complete),
            "/abortupload" => Some(Self::Abort),
            _ => None,
        }
    }
}

pub struct MultipartHandler<S> {
    config: AppConfig,
    storage: S,
}

impl<S: ObjectStorage> MultipartHandler<S> {
    pub fn new(config: AppConfig, storage: S) -> Self {
        Self { config, storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Handles one API Gateway request. Never fails: every error becomes a response.
    #[tracing::instrument(level = "info", skip_all, fields(method = %request.method, path = %request.path))]
    pub async fn handle(&self, request: &ApiRequest) -> ApiResponse {
        let response = match self.route(request).await {
            Ok(response) => response,
            Err(e) => {
                error!(status = e.status_code(), "Rejected request: {}", e);
                helpers::request_error_response(&e)
            }
        };
        helpers::with_cors(response, self.config.cors_allow_origin.as_deref())
    }

    async fn route(&self, request: &ApiRequest) -> Result<ApiResponse, RequestError> {
        if !request.method.eq_ignore_ascii_case("POST") {
            return Err(RequestError::MethodNotAllowed(request.method.clone()));
        }

        let key = request.require_param("key")?;

        match MultipartRoute::from_path(&request.path) {
            Some(MultipartRoute::PresignParts) => Ok(self.presign_parts(key).await),
            Some(MultipartRoute::Complete) => {
                let upload_id = request.require_param("uploadId")?;
                let body = parse_complete_body(request)?;
                Ok(self.complete_upload(key, upload_id, &body).await)
            }
            Some(MultipartRoute::Abort) => {
                let upload_id = request.require_param("uploadId")?;
                Ok(self.abort_upload(key, upload_id).await)
            }
            None => Err(RequestError::NotFound(request.path.clone())),
        }
    }

    async fn presign_parts(&self, key: &str) -> ApiResponse {
        let bucket = &self.config.bucket_name;

        let upload_id = match self.storage.create_multipart_upload(bucket, key).await {
            Ok(id) => id,
            Err(e) => {
                error!("Failed to create multipart upload: {}", e);
                return helpers::err_response(500, "Failed to create multipart upload");
            }
        };
        info!(upload_id = %upload_id, "Created multipart upload");

        let mut urls = Vec::with_capacity(PART_COUNT as usize);
        for part_number in 1..=PART_COUNT {
            match self
                .storage
                .presign_upload_part(bucket, key, &upload_id, part_number, PART_URL_EXPIRY)
                .await
            {
                Ok(url) => urls.push(url),
                Err(e) => {
                    error!(part_number, "Failed to create presign url: {}", e);
                    self.abandon_upload(key, &upload_id).await;
                    return helpers::err_response(500, "Failed to create presign url");
                }
            }
        }

        let response =
            helpers::create_response(200, &urls).with_header(UPLOAD_ID_HEADER, &upload_id);
        helpers::expose_header(
            response,
            self.config.cors_allow_origin.as_deref(),
            UPLOAD_ID_HEADER,
        )
    }

    // Best effort: the caller already gets a 500 whatever happens here.
    async fn abandon_upload(&self, key: &str, upload_id: &str) {
        match self
            .storage
            .abort_multipart_upload(&self.config.bucket_name, key, upload_id)
            .await
        {
            Ok(()) => info!(upload_id = %upload_id, "Aborted dangling multipart upload"),
            Err(e) => warn!(upload_id = %upload_id, "Failed to abort dangling multipart upload: {}", e),
        }
    }

    async fn complete_upload(
        &self,
        key: &str,
        upload_id: &str,
        body: &CompleteUploadBody,
    ) -> ApiResponse {
        match self
            .storage
            .complete_multipart_upload(&self.config.bucket_name, key, upload_id, &body.parts)
            .await
        {
            Ok(completed) => {
                info!(upload_id = %upload_id, "Completed multipart upload");
                helpers::create_response(200, &completed)
            }
            Err(e) => {
                error!("Failed to complete multipart upload: {}", e);
                helpers::err_response(500, "Failed to complete multipart upload")
            }
        }
    }

    async fn abort_upload(&self, key: &str, upload_id: &str) -> ApiResponse {
        match self
            .storage
            .abort_multipart_upload(&self.config.bucket_name, key, upload_id)
            .await
        {
            Ok(()) => {
                info!(upload_id = %upload_id, "Aborted multipart upload");
                helpers::create_response(200, ABORT_SUCCESS_MESSAGE)
            }
            Err(e) => {
                error!("Failed to abort multipart upload: {}", e);
                helpers::err_response(500, "Failed to abort multipart upload")
            }
        }
    }
}

fn parse_complete_body(request: &ApiRequest) -> Result<CompleteUploadBody, RequestError> {
    match request.body_text()? {
        Some(text) if !text.trim().is_empty() => serde_json::from_str(&text)
            .map_err(|e| RequestError::InvalidBody(e.to_string())),
        _ => Ok(CompleteUploadBody::default()),
    }
}
