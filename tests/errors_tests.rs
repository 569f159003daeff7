use s3_upload_gateway::errors::{RequestError, StorageError};
use std::error::Error;

#[test]
fn test_errors_implement_error_trait() {
    fn assert_error<T: Error + Send + Sync + 'static>(_: &T) {}

    assert_error(&RequestError::MissingParameter("key"));
    assert_error(&StorageError::MissingField("UploadId"));
}

#[test]
fn test_request_error_display() {
    assert_eq!(
        RequestError::MissingParameter("uploadId").to_string(),
        "uploadId parameter is missing"
    );
    assert_eq!(
        RequestError::NotFound("/nope".to_string()).to_string(),
        "Invalid endpoint: /nope"
    );
}

#[test]
fn test_request_error_status_codes() {
    assert_eq!(RequestError::MissingParameter("key").status_code(), 400);
    assert_eq!(RequestError::InvalidBody("x".to_string()).status_code(), 400);
    assert_eq!(RequestError::MethodNotAllowed("GET".to_string()).status_code(), 405);
    assert_eq!(RequestError::NotFound("/x".to_string()).status_code(), 404);
}

#[test]
fn test_storage_error_display() {
    let error = StorageError::Sdk("service error".to_string());
    assert_eq!(format!("{error}"), "Failed to interact with S3: service error");
}

#[test]
fn test_storage_error_from_presigning_config() {
    // Presigned URLs cannot outlive one week
    let err = aws_sdk_s3::presigning::PresigningConfig::expires_in(
        std::time::Duration::from_secs(8 * 24 * 60 * 60),
    )
    .unwrap_err();

    let storage_err: StorageError = err.into();
    assert!(matches!(storage_err, StorageError::Presigning(_)));
}
