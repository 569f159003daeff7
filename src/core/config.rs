use std::env;

use crate::errors::ConfigError;

pub const BUCKET_NAME_VAR: &str = "BUCKET_NAME";
pub const REGION_VAR: &str = "AWS_REGION";
pub const CORS_ALLOW_ORIGIN_VAR: &str = "CORS_ALLOW_ORIGIN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bucket_name: String,
    pub region: String,
    pub cors_allow_origin: Option<String>,
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `BUCKET_NAME` or `AWS_REGION` is unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is absent or empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Ok(Self {
            bucket_name: non_empty(BUCKET_NAME_VAR).ok_or(ConfigError::Missing(BUCKET_NAME_VAR))?,
            region: non_empty(REGION_VAR).ok_or(ConfigError::Missing(REGION_VAR))?,
            cors_allow_origin: non_empty(CORS_ALLOW_ORIGIN_VAR),
        })
    }
}
