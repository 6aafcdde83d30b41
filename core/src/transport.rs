//! Network round-trip behind the `Transport` seam.
//!
//! `UreqTransport` opens a fresh agent for every call, so nothing is pooled or
//! reused between invocations. HTTP status codes and bodies are returned as
//! raw data; only failures to obtain a response become errors.

use ureq::tls::{Certificate, ClientCert, PrivateKey, TlsConfig};
use ureq::{Agent, RequestBuilder};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpResponse, RequestOptions, TlsMaterials};

/// Executes one request and buffers the full response.
pub trait Transport: Send + Sync {
    fn send(&self, body: Option<&str>, options: &RequestOptions) -> Result<HttpResponse, ApiError>;
}

/// Blocking transport backed by `ureq`.
#[derive(Debug, Clone, Default)]
pub struct UreqTransport;

impl UreqTransport {
    pub fn new() -> Self {
        Self
    }

    fn agent(&self, tls: Option<&TlsMaterials>) -> Result<Agent, ApiError> {
        let mut config = Agent::config_builder().http_status_as_error(false);
        if let Some(tls) = tls {
            config = config.tls_config(client_tls_config(tls)?);
        }
        Ok(config.build().new_agent())
    }
}

fn client_tls_config(tls: &TlsMaterials) -> Result<TlsConfig, ApiError> {
    let cert = Certificate::from_pem(&tls.cert_pem)
        .map_err(|e| ApiError::InvalidTls(format!("certificate: {e}")))?;
    let key = PrivateKey::from_pem(&tls.key_pem)
        .map_err(|e| ApiError::InvalidTls(format!("private key: {e}")))?;
    Ok(TlsConfig::builder()
        .client_cert(Some(ClientCert::new_with_certs(&[cert], key)))
        .build())
}

fn with_headers<B>(mut request: RequestBuilder<B>, options: &RequestOptions) -> RequestBuilder<B> {
    for (name, value) in &options.headers {
        request = request.header(name.as_str(), value.as_str());
    }
    request
}

impl Transport for UreqTransport {
    fn send(&self, body: Option<&str>, options: &RequestOptions) -> Result<HttpResponse, ApiError> {
        let agent = self.agent(options.tls.as_ref())?;
        let url = options.url();

        tracing::debug!(method = %options.method, url = %url, has_body = body.is_some(), "dispatching request");

        let result = match (options.method, body) {
            (HttpMethod::Get, None) => with_headers(agent.get(&url), options).call(),
            (HttpMethod::Get, Some(body)) => with_headers(agent.get(&url), options)
                .force_send_body()
                .send(body.as_bytes()),
            (HttpMethod::Delete, None) => with_headers(agent.delete(&url), options).call(),
            (HttpMethod::Delete, Some(body)) => with_headers(agent.delete(&url), options)
                .force_send_body()
                .send(body.as_bytes()),
            (HttpMethod::Post, Some(body)) => {
                with_headers(agent.post(&url), options).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => with_headers(agent.post(&url), options).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                with_headers(agent.put(&url), options).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => with_headers(agent.put(&url), options).send_empty(),
        };

        let connection_failed = |detail: String| ApiError::ConnectionFailed {
            hostname: options.hostname.clone(),
            detail,
        };

        let mut response = result.map_err(|e| connection_failed(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(|e| connection_failed(e.to_string()))?;

        let response = HttpResponse {
            status,
            headers,
            body,
        };

        tracing::debug!(
            status,
            bytes = response.body.len(),
            content_type = response.header("content-type").unwrap_or("-"),
            "response received"
        );

        Ok(response)
    }
}
