//! Object storage seam.
//!
//! Handlers only ever see [`ObjectStorage`]; the production implementation
//! lives in [`s3`] and tests plug in an in-memory double.

pub mod s3;

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

use crate::core::models::{CompletedPartInput, CompletedUpload, PresignedUrl};
use crate::errors::StorageError;

pub use s3::S3Storage;

/// Object operation a presigned URL can grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresignMethod {
    Get,
    Put,
    Delete,
}

impl PresignMethod {
    /// Maps an HTTP method onto a presignable operation, case-insensitively.
    #[must_use]
    pub fn from_http_method(method: &str) -> Option<Self> {
        if method.eq_ignore_ascii_case("GET") {
            Some(Self::Get)
        } else if method.eq_ignore_ascii_case("PUT") {
            Some(Self::Put)
        } else if method.eq_ignore_ascii_case("DELETE") {
            Some(Self::Delete)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for PresignMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The storage operations the upload Lambdas depend on.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Starts a multipart upload and returns its upload id.
    async fn create_multipart_upload(&self, bucket: &str, key: &str)
    -> Result<String, StorageError>;

    /// Presigns an `UploadPart` request for one part of an upload.
    async fn presign_upload_part(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
        part_number: i32,
        expires_in: Duration,
    ) -> Result<String, StorageError>;

    /// Completes a multipart upload. An empty `parts` slice sends no part list.
    async fn complete_multipart_upload(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
        parts: &[CompletedPartInput],
    ) -> Result<CompletedUpload, StorageError>;

    async fn abort_multipart_upload(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
    ) -> Result<(), StorageError>;

    /// Presigns a single-object GET, PUT or DELETE.
    async fn presign_object(
        &self,
        method: PresignMethod,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> Result<PresignedUrl, StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presign_method_parses_known_methods() {
        assert_eq!(PresignMethod::from_http_method("GET"), Some(PresignMethod::Get));
        assert_eq!(PresignMethod::from_http_method("put"), Some(PresignMethod::Put));
        assert_eq!(
            PresignMethod::from_http_method("Delete"),
            Some(PresignMethod::Delete)
        );
    }

    #[test]
    fn test_presign_method_rejects_others() {
        for method in ["POST", "PATCH", "HEAD", "OPTIONS", ""] {
            assert_eq!(PresignMethod::from_http_method(method), None, "{method}");
        }
    }

    #[test]
    fn test_presign_method_display() {
        assert_eq!(PresignMethod::Delete.to_string(), "DELETE");
    }
}
