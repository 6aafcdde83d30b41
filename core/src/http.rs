//! HTTP transport types for a single outbound call.
//!
//! # Design
//! These types describe one request and its buffered response as plain data.
//! `RequestOptions` is built fresh by a service for every invocation and is
//! never mutated afterwards; a `Transport` turns it into an `HttpResponse`.
//!
//! All fields use owned types (`String`, `BTreeMap`) so options can be moved
//! onto a blocking worker without lifetime concerns.

use std::collections::BTreeMap;
use std::fmt;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// URL scheme. Plain `Http` is only meant for local test servers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    #[default]
    Https,
    Http,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Https => "https",
            Scheme::Http => "http",
        }
    }
}

/// Client certificate chain and private key, both PEM encoded.
#[derive(Clone, PartialEq, Eq)]
pub struct TlsMaterials {
    pub cert_pem: Vec<u8>,
    pub key_pem: Vec<u8>,
}

// Key material stays out of logs.
impl fmt::Debug for TlsMaterials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TlsMaterials")
            .field("cert_pem", &format_args!("{} bytes", self.cert_pem.len()))
            .field("key_pem", &"<redacted>")
            .finish()
    }
}

/// Everything needed to issue one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    pub scheme: Scheme,
    pub hostname: String,
    pub port: Option<u16>,
    /// Path including any query string, starting with `/`.
    pub path: String,
    pub method: HttpMethod,
    pub headers: BTreeMap<String, String>,
    pub tls: Option<TlsMaterials>,
}

impl RequestOptions {
    /// Options for an HTTPS request with no headers and no TLS materials.
    pub fn new(hostname: &str, path: &str, method: HttpMethod) -> Self {
        Self {
            scheme: Scheme::Https,
            hostname: hostname.to_string(),
            port: None,
            path: path.to_string(),
            method,
            headers: BTreeMap::new(),
            tls: None,
        }
    }

    pub fn url(&self) -> String {
        let path = if self.path.starts_with('/') {
            self.path.clone()
        } else {
            format!("/{}", self.path)
        };
        match self.port {
            Some(port) => format!("{}://{}:{port}{path}", self.scheme.as_str(), self.hostname),
            None => format!("{}://{}{path}", self.scheme.as_str(), self.hostname),
        }
    }
}

/// A fully buffered HTTP response. The body is kept as raw bytes; decoding is
/// left to the caller once the status is known.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// First value of header `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}
