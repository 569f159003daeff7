use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use aws_sdk_s3::presigning::PresigningConfigError;
use thiserror::Error;

/// Client-side problems with an incoming request. Every variant maps to a 4xx.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("{0} parameter is missing")]
    MissingParameter(&'static str),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Invalid endpoint: {0}")]
    NotFound(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

impl RequestError {
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            RequestError::MissingParameter(_) | RequestError::InvalidBody(_) => 400,
            RequestError::MethodNotAllowed(_) => 405,
            RequestError::NotFound(_) => 404,
        }
    }
}

/// Failures talking to the object store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to interact with S3: {0}")]
    Sdk(String),

    #[error("Invalid presigning configuration: {0}")]
    Presigning(String),

    #[error("S3 response is missing {0}")]
    MissingField(&'static str),
}

// Generic implementation for every S3 operation error
impl<E, R> From<SdkError<E, R>> for StorageError
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    fn from(error: SdkError<E, R>) -> Self {
        StorageError::Sdk(DisplayErrorContext(&error).to_string())
    }
}

impl From<PresigningConfigError> for StorageError {
    fn from(error: PresigningConfigError) -> Self {
        StorageError::Presigning(error.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} env var must be set")]
    Missing(&'static str),
}
