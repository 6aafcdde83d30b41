//! Error types for the outbound client and the controller.
//!
//! # Design
//! `ApiError` covers everything that can go wrong between dispatching a
//! request and holding a typed upstream reply. `HandlerError` is the
//! caller-facing taxonomy: each variant knows the `ErrorDescriptor` it is
//! surfaced as, so every failure leaves the crate as a normalized envelope
//! with code `"100"`.

use thiserror::Error;

use crate::envelope::{ErrorDescriptor, StatusCode, GENERIC_ERROR_CODE};

/// Errors produced while executing a request or interpreting its reply.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a status other than 200.
    #[error("request failed with status code: {status}")]
    RequestFailed { status: u16, body: String },

    /// The request never produced a response.
    #[error("Something went wrong connecting to {hostname}: {detail}")]
    ConnectionFailed { hostname: String, detail: String },

    /// The response body was not valid JSON.
    #[error("could not parse response body: {0}")]
    ParseError(String),

    /// The body was JSON but not one of the expected reply shapes.
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),

    /// The supplied client certificate or key could not be loaded.
    #[error("invalid TLS materials: {0}")]
    InvalidTls(String),
}

/// Failures surfaced to the caller of the controller.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// A required input field is missing.
    #[error("{0}")]
    Validation(String),

    /// The service completed but returned nothing usable.
    #[error("could not get data")]
    UpstreamEmptyResponse,

    /// The service call itself failed.
    #[error("Something went wrong")]
    UpstreamCallFailure(#[source] ApiError),
}

impl HandlerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            HandlerError::Validation(_) => StatusCode::BadRequest,
            HandlerError::UpstreamEmptyResponse | HandlerError::UpstreamCallFailure(_) => {
                StatusCode::ServerError
            }
        }
    }

    /// The descriptor this failure is reported as. The message never leaks
    /// upstream detail.
    pub fn descriptor(&self) -> ErrorDescriptor {
        ErrorDescriptor::new(GENERIC_ERROR_CODE, &self.to_string(), self.status_code())
    }
}

/// Invalid upstream configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported scheme {0:?}, expected \"https\" or \"http\"")]
    Scheme(String),

    #[error("invalid port {0:?}")]
    Port(String),

    #[error("hostname must not be empty")]
    EmptyHostname,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let descriptor = HandlerError::Validation("No something provided".to_string()).descriptor();
        assert_eq!(descriptor.code, "100");
        assert_eq!(descriptor.message, "No something provided");
        assert_eq!(descriptor.status_code, StatusCode::BadRequest);
    }

    #[test]
    fn call_failure_hides_upstream_detail() {
        let err = HandlerError::UpstreamCallFailure(ApiError::ConnectionFailed {
            hostname: "postman-echo.com".to_string(),
            detail: "dns error".to_string(),
        });
        let descriptor = err.descriptor();
        assert_eq!(descriptor.message, "Something went wrong");
        assert_eq!(descriptor.status_code, StatusCode::ServerError);
    }

    #[test]
    fn empty_response_maps_to_server_error() {
        let descriptor = HandlerError::UpstreamEmptyResponse.descriptor();
        assert_eq!(descriptor.message, "could not get data");
        assert_eq!(descriptor.status_code, StatusCode::ServerError);
    }

    #[test]
    fn api_error_messages() {
        let err = ApiError::RequestFailed {
            status: 503,
            body: String::new(),
        };
        assert_eq!(err.to_string(), "request failed with status code: 503");

        let err = ApiError::ConnectionFailed {
            hostname: "example.com".to_string(),
            detail: "refused".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Something went wrong connecting to example.com: refused"
        );
    }
}
