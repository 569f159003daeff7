//! Response builders shared by both handlers.
//!
//! Every response carries `Content-Type: application/json`, including errors.

use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use tracing::error;

use crate::core::models::ApiResponse;
use crate::errors::RequestError;

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const INTERNAL_ERROR_BODY: &str = r#"{"error":"Internal Server Error"}"#;

fn json_headers() -> BTreeMap<String, String> {
    BTreeMap::from([("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string())])
}

/// Serializes `body` as JSON and wraps it in a response envelope.
///
/// Falls back to a fixed 500 body if serialization fails.
#[must_use]
pub fn create_response<T>(status_code: u16, body: &T) -> ApiResponse
where
    T: Serialize + ?Sized,
{
    match serde_json::to_string(body) {
        Ok(body) => ApiResponse {
            status_code,
            headers: json_headers(),
            body,
            is_base64_encoded: false,
        },
        Err(e) => {
            error!("Failed to marshal response body: {}", e);
            ApiResponse {
                status_code: 500,
                headers: json_headers(),
                body: INTERNAL_ERROR_BODY.to_string(),
                is_base64_encoded: false,
            }
        }
    }
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> ApiResponse {
    create_response(status_code, &json!({ "error": message }))
}

#[must_use]
pub fn request_error_response(err: &RequestError) -> ApiResponse {
    err_response(err.status_code(), &err.to_string())
}

/// Lets browsers read a custom response header, but only when CORS is configured.
#[must_use]
pub fn expose_header(
    response: ApiResponse,
    allow_origin: Option<&str>,
    name: &str,
) -> ApiResponse {
    match allow_origin {
        Some(_) => response.with_header("Access-Control-Expose-Headers", name),
        None => response,
    }
}

/// Adds the CORS origin header when one is configured.
#[must_use]
pub fn with_cors(response: ApiResponse, allow_origin: Option<&str>) -> ApiResponse {
    match allow_origin {
        Some(origin) => response.with_header("Access-Control-Allow-Origin", origin),
        None => response,
    }
}
