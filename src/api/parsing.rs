use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;
use std::collections::HashMap;

use crate::errors::RequestError;

/// The parts of an API Gateway proxy event the handlers read.
///
/// Accepts both REST API (`httpMethod`/`path`) and HTTP API
/// (`requestContext.http.method`/`rawPath`) payloads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: String,
    /// Resource path, with the HTTP API stage prefix removed from `rawPath`.
    pub path: String,
    pub query: HashMap<String, String>,
    pub body: Option<String>,
    pub is_base64_encoded: bool,
}

impl ApiRequest {
    #[must_use]
    pub fn from_event(payload: &Value) -> Self {
        let method = v_str(payload, &["httpMethod"])
            .or_else(|| v_str(payload, &["requestContext", "http", "method"]))
            .unwrap_or_default()
            .to_string();

        // REST API `path` never carries the stage; HTTP API `rawPath` does
        // unless the stage is `$default`.
        let path = match v_str(payload, &["rawPath"]) {
            Some(raw) => strip_stage(raw, v_str(payload, &["requestContext", "stage"])),
            None => v_str(payload, &["path"]).unwrap_or_default(),
        }
        .to_string();

        // API Gateway sends `null` rather than `{}` when there is no query string
        let query = payload
            .get("queryStringParameters")
            .and_then(Value::as_object)
            .map(|params| {
                params
                    .iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            method,
            path,
            query,
            body: v_str(payload, &["body"]).map(ToString::to_string),
            is_base64_encoded: payload
                .get("isBase64Encoded")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        }
    }

    /// Returns a query parameter, treating an empty value as absent.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// # Errors
    ///
    /// Returns [`RequestError::MissingParameter`] if the parameter is absent or empty.
    pub fn require_param(&self, name: &'static str) -> Result<&str, RequestError> {
        self.query_param(name)
            .ok_or(RequestError::MissingParameter(name))
    }

    /// The request body as text, decoding it first if the gateway base64-encoded it.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidBody`] if decoding fails.
    pub fn body_text(&self) -> Result<Option<String>, RequestError> {
        let Some(body) = self.body.as_deref() else {
            return Ok(None);
        };

        if !self.is_base64_encoded {
            return Ok(Some(body.to_string()));
        }

        let bytes = STANDARD
            .decode(body)
            .map_err(|e| RequestError::InvalidBody(format!("Failed to decode body: {e}")))?;
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| RequestError::InvalidBody(format!("Body is not UTF-8: {e}")))
    }
}

fn strip_stage<'a>(raw_path: &'a str, stage: Option<&str>) -> &'a str {
    let Some(stage) = stage.filter(|s| !s.is_empty() && *s != "$default") else {
        return raw_path;
    };
    match raw_path
        .strip_prefix('/')
        .and_then(|rest| rest.strip_prefix(stage))
    {
        Some("") => "/",
        Some(rest) if rest.starts_with('/') => rest,
        _ => raw_path,
    }
}

pub fn v_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = root;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

pub fn v_str<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    v_path(root, path).and_then(|v| v.as_str())
}
