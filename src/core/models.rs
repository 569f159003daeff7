use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Envelope returned to API Gateway for every invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl ApiResponse {
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A presigned request: the URL plus headers the caller must send with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresignedUrl {
    pub url: String,
    pub headers: BTreeMap<String, Vec<String>>,
}

/// Result of completing a multipart upload, as reported by S3.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CompletedUpload {
    pub location: Option<String>,
    pub bucket: Option<String>,
    pub key: Option<String>,
    #[serde(rename = "ETag")]
    pub e_tag: Option<String>,
    pub version_id: Option<String>,
    pub expiration: Option<String>,
    pub server_side_encryption: Option<String>,
    #[serde(rename = "SSEKMSKeyId")]
    pub ssekms_key_id: Option<String>,
    pub bucket_key_enabled: Option<bool>,
    #[serde(rename = "ChecksumCRC32")]
    pub checksum_crc32: Option<String>,
    #[serde(rename = "ChecksumCRC32C")]
    pub checksum_crc32_c: Option<String>,
    #[serde(rename = "ChecksumCRC64NVME")]
    pub checksum_crc64_nvme: Option<String>,
    #[serde(rename = "ChecksumSHA1")]
    pub checksum_sha1: Option<String>,
    #[serde(rename = "ChecksumSHA256")]
    pub checksum_sha256: Option<String>,
    pub checksum_type: Option<String>,
    pub request_charged: Option<String>,
}

/// One uploaded part, echoed back by the client when completing an upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedPartInput {
    pub etag: String,
    pub part_number: i32,
}

#[derive(Debug, Default, Deserialize)]
pub struct CompleteUploadBody {
    #[serde(default)]
    pub parts: Vec<CompletedPartInput>,
}
