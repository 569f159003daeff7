use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::presigning::{PresignedRequest, PresigningConfig};
use aws_sdk_s3::types::{CompletedMultipartUpload, CompletedPart};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

use super::{ObjectStorage, PresignMethod};
use crate::core::config::AppConfig;
use crate::core::models::{CompletedPartInput, CompletedUpload, PresignedUrl};
use crate::errors::StorageError;

/// [`ObjectStorage`] backed by the AWS S3 SDK.
#[derive(Debug, Clone)]
pub struct S3Storage {
    client: Client,
}

impl S3Storage {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Loads shared AWS settings from the environment, pinned to the configured region.
    pub async fn from_config(config: &AppConfig) -> Self {
        let shared_config = aws_config::from_env()
            .region(Region::new(config.region.clone()))
            .load()
            .await;
        Self::new(Client::new(&shared_config))
    }
}

fn into_presigned_url(request: &PresignedRequest) -> PresignedUrl {
    let mut headers: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in request.headers() {
        headers
            .entry(name.to_string())
            .or_default()
            .push(value.to_string());
    }

    PresignedUrl {
        url: request.uri().to_string(),
        headers,
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn create_multipart_upload(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<String, StorageError> {
        let output = self
            .client
            .create_multipart_upload()
            .bucket(bucket)
            .key(key)
            .send()
            .await?;

        output
            .upload_id()
            .map(ToString::to_string)
            .ok_or(StorageError::MissingField("UploadId"))
    }

    async fn presign_upload_part(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
        part_number: i32,
        expires_in: Duration,
    ) -> Result<String, StorageError> {
        let presigning = PresigningConfig::expires_in(expires_in)?;
        let request = self
            .client
            .upload_part()
            .bucket(bucket)
            .key(key)
            .upload_id(upload_id)
            .part_number(part_number)
            .presigned(presigning)
            .await?;

        Ok(request.uri().to_string())
    }

    async fn complete_multipart_upload(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
        parts: &[CompletedPartInput],
    ) -> Result<CompletedUpload, StorageError> {
        let mut request = self
            .client
            .complete_multipart_upload()
            .bucket(bucket)
            .key(key)
            .upload_id(upload_id);

        if !parts.is_empty() {
            let completed: Vec<CompletedPart> = parts
                .iter()
                .map(|part| {
                    CompletedPart::builder()
                        .e_tag(&part.etag)
                        .part_number(part.part_number)
                        .build()
                })
                .collect();
            debug!(part_count = completed.len(), "Completing upload with explicit parts");
            request = request.multipart_upload(
                CompletedMultipartUpload::builder()
                    .set_parts(Some(completed))
                    .build(),
            );
        }

        let output = request.send().await?;

        Ok(CompletedUpload {
            location: output.location().map(ToString::to_string),
            bucket: output.bucket().map(ToString::to_string),
            key: output.key().map(ToString::to_string),
            e_tag: output.e_tag().map(ToString::to_string),
            version_id: output.version_id().map(ToString::to_string),
            expiration: output.expiration().map(ToString::to_string),
            server_side_encryption: output
                .server_side_encryption()
                .map(|sse| sse.as_str().to_string()),
            ssekms_key_id: output.ssekms_key_id().map(ToString::to_string),
            bucket_key_enabled: output.bucket_key_enabled(),
            checksum_crc32: output.checksum_crc32().map(ToString::to_string),
            checksum_crc32_c: output.checksum_crc32_c().map(ToString::to_string),
            checksum_crc64_nvme: output.checksum_crc64_nvme().map(ToString::to_string),
            checksum_sha1: output.checksum_sha1().map(ToString::to_string),
            checksum_sha256: output.checksum_sha256().map(ToString::to_string),
            checksum_type: output.checksum_type().map(|t| t.as_str().to_string()),
            request_charged: output
                .request_charged()
                .map(|charged| charged.as_str().to_string()),
        })
    }

    async fn abort_multipart_upload(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
    ) -> Result<(), StorageError> {
        self.client
            .abort_multipart_upload()
            .bucket(bucket)
            .key(key)
            .upload_id(upload_id)
            .send()
            .await?;
        Ok(())
    }

    async fn presign_object(
        &self,
        method: PresignMethod,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> Result<PresignedUrl, StorageError> {
        let presigning = PresigningConfig::expires_in(expires_in)?;

        let request = match method {
            PresignMethod::Get => {
                self.client
                    .get_object()
                    .bucket(bucket)
                    .key(key)
                    .presigned(presigning)
                    .await?
            }
            PresignMethod::Put => {
                self.client
                    .put_object()
                    .bucket(bucket)
                    .key(key)
                    .presigned(presigning)
                    .await?
            }
            PresignMethod::Delete => {
                self.client
                    .delete_object()
                    .bucket(bucket)
                    .key(key)
                    .presigned(presigning)
                    .await?
            }
        };

        Ok(into_presigned_url(&request))
    }
}
