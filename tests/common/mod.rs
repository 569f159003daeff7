#![allow(dead_code)]

use async_trait::async_trait;
use s3_upload_gateway::core::config::AppConfig;
use s3_upload_gateway::core::models::{CompletedPartInput, CompletedUpload, PresignedUrl};
use s3_upload_gateway::errors::StorageError;
use s3_upload_gateway::storage::{ObjectStorage, PresignMethod};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Duration;

pub const BUCKET: &str = "test-bucket";
pub const UPLOAD_ID: &str = "upload-123";

pub fn test_config() -> AppConfig {
    AppConfig {
        bucket_name: BUCKET.to_string(),
        region: "us-east-1".to_string(),
        cors_allow_origin: None,
    }
}

/// One recorded storage call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create { bucket: String, key: String },
    PresignPart { upload_id: String, part_number: i32, expires_in: Duration },
    Complete { key: String, upload_id: String, parts: Vec<CompletedPartInput> },
    Abort { key: String, upload_id: String },
    PresignObject { method: PresignMethod, key: String, expires_in: Duration },
}

/// In-memory object store that records calls and fails on demand.
#[derive(Debug, Default)]
pub struct FakeStorage {
    pub calls: Mutex<Vec<Call>>,
    pub fail_create: bool,
    pub fail_on_part: Option<i32>,
    pub fail_complete: bool,
    pub fail_abort: bool,
    pub fail_presign: bool,
}

impl FakeStorage {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn failure() -> StorageError {
        StorageError::Sdk("dispatch failure: secret-internal-detail".to_string())
    }
}

#[async_trait]
impl ObjectStorage for FakeStorage {
    async fn create_multipart_upload(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<String, StorageError> {
        self.record(Call::Create {
            bucket: bucket.to_string(),
            key: key.to_string(),
        });
        if self.fail_create {
            return Err(Self::failure());
        }
        Ok(UPLOAD_ID.to_string())
    }

    async fn presign_upload_part(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
        part_number: i32,
        expires_in: Duration,
    ) -> Result<String, StorageError> {
        self.record(Call::PresignPart {
            upload_id: upload_id.to_string(),
            part_number,
            expires_in,
        });
        if self.fail_on_part == Some(part_number) {
            return Err(Self::failure());
        }
        Ok(format!(
            "https://{bucket}.s3.amazonaws.com/{key}?partNumber={part_number}&uploadId={upload_id}&X-Amz-Signature=sig"
        ))
    }

    async fn complete_multipart_upload(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
        parts: &[CompletedPartInput],
    ) -> Result<CompletedUpload, StorageError> {
        self.record(Call::Complete {
            key: key.to_string(),
            upload_id: upload_id.to_string(),
            parts: parts.to_vec(),
        });
        if self.fail_complete {
            return Err(Self::failure());
        }
        Ok(CompletedUpload {
            location: Some(format!("https://{bucket}.s3.amazonaws.com/{key}")),
            bucket: Some(bucket.to_string()),
            key: Some(key.to_string()),
            e_tag: Some("\"etag-final-3\"".to_string()),
            ..CompletedUpload::default()
        })
    }

    async fn abort_multipart_upload(
        &self,
        _bucket: &str,
        key: &str,
        upload_id: &str,
    ) -> Result<(), StorageError> {
        self.record(Call::Abort {
            key: key.to_string(),
            upload_id: upload_id.to_string(),
        });
        if self.fail_abort {
            return Err(Self::failure());
        }
        Ok(())
    }

    async fn presign_object(
        &self,
        method: PresignMethod,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> Result<PresignedUrl, StorageError> {
        self.record(Call::PresignObject {
            method,
            key: key.to_string(),
            expires_in,
        });
        if self.fail_presign {
            return Err(Self::failure());
        }
        Ok(PresignedUrl {
            url: format!(
                "https://{bucket}.s3.us-east-1.amazonaws.com/{key}?X-Amz-Expires={}&X-Amz-Signature=sig",
                expires_in.as_secs()
            ),
            headers: BTreeMap::from([(
                "host".to_string(),
                vec![format!("{bucket}.s3.us-east-1.amazonaws.com")],
            )]),
        })
    }
}

/// Builds a REST API (v1) proxy event.
pub fn rest_event(method: &str, path: &str, query: &[(&str, &str)]) -> Value {
    let params: serde_json::Map<String, Value> = query
        .iter()
        .map(|(k, v)| ((*k).to_string(), Value::String((*v).to_string())))
        .collect();
    json!({
        "httpMethod": method,
        "path": path,
        "queryStringParameters": if params.is_empty() { Value::Null } else { Value::Object(params) },
        "headers": {},
        "body": null,
        "isBase64Encoded": false
    })
}

pub fn body_json(body: &str) -> Value {
    serde_json::from_str(body).expect("response body should be JSON")
}
