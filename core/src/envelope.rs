//! Normalized response envelope returned to every caller.
//!
//! # Design
//! API Gateway expects `body` to be a JSON string, so the envelope serializes
//! `{code, message, data}` once at construction time and keeps the result.
//! Envelopes are immutable; fields are only reachable through accessors.

use serde::Serialize;
use serde_json::{json, Value};

/// Code carried by every success envelope.
pub const SUCCESS_CODE: &str = "0";

/// Code carried by every error envelope.
pub const GENERIC_ERROR_CODE: &str = "100";

/// Status codes the envelope can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Success,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    ServerError,
}

impl StatusCode {
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Success => 200,
            StatusCode::BadRequest => 400,
            StatusCode::Unauthorized => 401,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::ServerError => 500,
        }
    }
}

/// The `{code, message, statusCode}` tuple describing an outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDescriptor {
    pub code: String,
    pub message: String,
    pub status_code: StatusCode,
}

impl ErrorDescriptor {
    pub fn new(code: &str, message: &str, status_code: StatusCode) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            status_code,
        }
    }

    /// Descriptor with the default status of 400.
    pub fn bad_request(code: &str, message: &str) -> Self {
        Self::new(code, message, StatusCode::BadRequest)
    }

    /// Fallback used whenever no specific descriptor is available.
    pub fn unknown() -> Self {
        Self::bad_request(GENERIC_ERROR_CODE, "Something went wrong")
    }

    pub fn success(message: &str) -> Self {
        Self::new(SUCCESS_CODE, message, StatusCode::Success)
    }
}

/// Fixed CORS header set attached to every envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorsHeaders {
    #[serde(rename = "Access-Control-Allow-Headers")]
    pub allow_headers: &'static str,
    #[serde(rename = "Access-Control-Allow-Origin")]
    pub allow_origin: &'static str,
    #[serde(rename = "Access-Control-Allow-Methods")]
    pub allow_methods: &'static str,
}

impl Default for CorsHeaders {
    fn default() -> Self {
        Self {
            allow_headers: "Content-Type",
            allow_origin: "*",
            allow_methods: "OPTIONS,POST,GET",
        }
    }
}

/// `{statusCode, headers, body}` as handed back to API Gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEnvelope {
    status_code: u16,
    headers: CorsHeaders,
    body: String,
}

impl ResultEnvelope {
    fn new(descriptor: ErrorDescriptor, data: Option<Value>) -> Self {
        let mut body = json!({
            "code": descriptor.code,
            "message": descriptor.message,
        });
        if let Some(data) = data {
            body["data"] = data;
        }
        Self {
            status_code: descriptor.status_code.as_u16(),
            headers: CorsHeaders::default(),
            body: body.to_string(),
        }
    }

    /// Status 200, code `"0"`. `message` falls back to `"Success"` when absent
    /// or empty; `data` is passed through unchanged.
    pub fn success(message: Option<&str>, data: Option<Value>) -> Self {
        let message = message.filter(|m| !m.is_empty()).unwrap_or("Success");
        Self::new(ErrorDescriptor::success(message), data)
    }

    /// Envelope for `descriptor`, or for `ErrorDescriptor::unknown()` when none
    /// is supplied. Error envelopes never carry data.
    pub fn error(descriptor: Option<ErrorDescriptor>) -> Self {
        Self::new(descriptor.unwrap_or_else(ErrorDescriptor::unknown), None)
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn headers(&self) -> &CorsHeaders {
        &self.headers
    }

    /// The serialized `{code, message, data}` body.
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn body_value(&self) -> Value {
        // The body is always produced from a `Value` in `new`.
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}
