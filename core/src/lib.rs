//! Core of the get-some-stuff-from-api Lambda.
//!
//! # Overview
//! Receives a trigger event, performs one outbound GET against a fixed echo
//! endpoint, and answers with a normalized `{statusCode, headers, body}`
//! envelope whatever happens.
//!
//! # Design
//! - `HttpsClient` executes a request through a `Transport` and parses the
//!   JSON reply; a non-200 status is rejected without parsing the body.
//! - `EchoService` binds the fixed request shape to the client.
//! - `Controller` validates input, calls the service and maps every outcome
//!   to a `ResultEnvelope`.
//! - The object graph is built once by the caller and passed by reference;
//!   nothing holds per-request state.

pub mod client;
pub mod config;
pub mod controller;
pub mod envelope;
pub mod error;
pub mod handler;
pub mod http;
pub mod service;
pub mod transport;
pub mod types;

pub use client::HttpsClient;
pub use config::UpstreamConfig;
pub use controller::Controller;
pub use envelope::{ErrorDescriptor, ResultEnvelope, StatusCode};
pub use error::{ApiError, ConfigError, HandlerError};
pub use handler::handle_event;
pub use http::{HttpMethod, HttpResponse, RequestOptions, Scheme, TlsMaterials};
pub use service::{EchoService, StuffService};
pub use transport::{Transport, UreqTransport};
pub use types::{Args, FooResponse, TriggerEvent};
