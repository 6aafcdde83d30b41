//! Generic request executor shared by every service.
//!
//! # Design
//! `HttpsClient` owns a `Transport` and nothing else, so one instance can be
//! shared by concurrent invocations. A call settles exactly once: a non-200
//! status is an error and the body is not parsed, otherwise the body is decoded
//! as UTF-8 and parsed as JSON. An empty body yields the fallback object
//! `{"error": "Could not parse string"}` instead of failing.

use serde_json::{json, Value};

use crate::error::ApiError;
use crate::http::RequestOptions;
use crate::transport::{Transport, UreqTransport};

/// Message placed in the fallback object for an empty body.
pub const EMPTY_BODY_FALLBACK: &str = "Could not parse string";

#[derive(Debug, Clone)]
pub struct HttpsClient<T = UreqTransport> {
    transport: T,
}

impl HttpsClient<UreqTransport> {
    pub fn new() -> Self {
        Self::with_transport(UreqTransport::new())
    }
}

impl Default for HttpsClient<UreqTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> HttpsClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// Issue one request, writing `body` when present, and return the parsed
    /// JSON reply.
    pub fn execute_request(&self, body: Option<&str>, options: &RequestOptions) -> Result<Value, ApiError> {
        let response = self.transport.send(body, options)?;

        if response.status != 200 {
            tracing::warn!(
                hostname = %options.hostname,
                status = response.status,
                "upstream request failed"
            );
            return Err(ApiError::RequestFailed {
                status: response.status,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            });
        }

        let body = String::from_utf8(response.body)
            .map_err(|e| ApiError::ParseError(format!("body is not valid UTF-8: {e}")))?;
        parse_response(&body)
    }
}

/// Parse a response body, substituting the fallback object for an empty body.
pub fn parse_response(body: &str) -> Result<Value, ApiError> {
    if body.is_empty() {
        return Ok(json!({ "error": EMPTY_BODY_FALLBACK }));
    }
    serde_json::from_str(body).map_err(|e| ApiError::ParseError(e.to_string()))
}
