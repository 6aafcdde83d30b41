//! Service binding the fixed echo request to the generic client.

use std::collections::BTreeMap;

use crate::client::{HttpsClient, EMPTY_BODY_FALLBACK};
use crate::config::UpstreamConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, RequestOptions};
use crate::transport::{Transport, UreqTransport};
use crate::types::{FooResponse, UpstreamReply};

pub const ECHO_PATH: &str = "/get?foo1=bar1&foo2=bar2";

/// Domain operation the controller depends on.
///
/// `Ok(None)` means the upstream answered but had nothing to give.
pub trait StuffService: Send + Sync {
    fn get_stuff_from_api(&self) -> Result<Option<FooResponse>, ApiError>;
}

#[derive(Debug, Clone)]
pub struct EchoService<T = UreqTransport> {
    client: HttpsClient<T>,
    config: UpstreamConfig,
}

impl EchoService<UreqTransport> {
    pub fn new(config: UpstreamConfig) -> Self {
        Self::with_client(HttpsClient::new(), config)
    }
}

impl<T: Transport> EchoService<T> {
    pub fn with_client(client: HttpsClient<T>, config: UpstreamConfig) -> Self {
        Self { client, config }
    }

    /// Fresh options for every call.
    pub fn request_options(&self) -> RequestOptions {
        let mut headers = BTreeMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        RequestOptions {
            scheme: self.config.scheme,
            hostname: self.config.hostname.clone(),
            port: self.config.port,
            path: ECHO_PATH.to_string(),
            method: HttpMethod::Get,
            headers,
            tls: None,
        }
    }
}

impl<T: Transport> StuffService for EchoService<T> {
    fn get_stuff_from_api(&self) -> Result<Option<FooResponse>, ApiError> {
        let value = self.client.execute_request(None, &self.request_options())?;
        match serde_json::from_value::<UpstreamReply>(value) {
            Ok(UpstreamReply::Echo(response)) => Ok(Some(response)),
            Ok(UpstreamReply::Fallback { error }) if error == EMPTY_BODY_FALLBACK => {
                tracing::warn!("upstream returned an empty body");
                Ok(None)
            }
            Ok(UpstreamReply::Fallback { error }) => {
                Err(ApiError::UnexpectedShape(format!("upstream error object: {error}")))
            }
            Err(e) => Err(ApiError::UnexpectedShape(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpResponse, Scheme};

    struct StaticTransport(u16, &'static str);

    impl Transport for StaticTransport {
        fn send(&self, _body: Option<&str>, _options: &RequestOptions) -> Result<HttpResponse, ApiError> {
            Ok(HttpResponse {
                status: self.0,
                headers: Vec::new(),
                body: self.1.as_bytes().to_vec(),
            })
        }
    }

    fn service(status: u16, body: &'static str) -> EchoService<StaticTransport> {
        EchoService::with_client(
            HttpsClient::with_transport(StaticTransport(status, body)),
            UpstreamConfig::default(),
        )
    }

    #[test]
    fn request_options_have_fixed_shape() {
        let options = service(200, "").request_options();
        assert_eq!(options.method, HttpMethod::Get);
        assert_eq!(options.scheme, Scheme::Https);
        assert_eq!(options.url(), "https://postman-echo.com/get?foo1=bar1&foo2=bar2");
        assert_eq!(options.headers.len(), 1);
        assert_eq!(options.headers["Accept"], "application/json");
        assert!(options.tls.is_none());
    }

    #[test]
    fn echo_reply_is_returned() {
        let svc = service(200, r#"{"args":{"foo1":"bar1","foo2":"bar2"}}"#);
        let response = svc.get_stuff_from_api().unwrap().unwrap();
        assert_eq!(response.args.foo1, "bar1");
        assert_eq!(response.args.foo2, "bar2");
    }

    #[test]
    fn empty_body_is_none() {
        assert!(service(200, "").get_stuff_from_api().unwrap().is_none());
    }

    #[test]
    fn upstream_error_object_is_not_treated_as_empty() {
        let err = service(200, r#"{"error":"rate limited"}"#)
            .get_stuff_from_api()
            .unwrap_err();
        match err {
            ApiError::UnexpectedShape(detail) => assert!(detail.contains("rate limited")),
            other => panic!("expected UnexpectedShape, got {other:?}"),
        }
    }

    #[test]
    fn unknown_shape_is_rejected() {
        let err = service(200, r#"{"unexpected":true}"#).get_stuff_from_api().unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedShape(_)));
    }

    #[test]
    fn upstream_status_error_propagates() {
        let err = service(404, "not found").get_stuff_from_api().unwrap_err();
        assert!(matches!(err, ApiError::RequestFailed { status: 404, .. }));
    }
}
