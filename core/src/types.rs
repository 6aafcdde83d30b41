//! Trigger payload and upstream reply DTOs.
//!
//! # Design
//! The upstream reply is modelled as a closed set of shapes rather than an
//! untyped value: either the echo of our query string, or the fallback object
//! produced for an empty body. Anything else is rejected by the service.

use serde::{Deserialize, Serialize};

/// Event delivered to the entrypoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TriggerEvent {
    #[serde(default)]
    pub something: Option<String>,
}

impl TriggerEvent {
    /// The `something` field, treating an empty string as absent.
    pub fn something(&self) -> Option<&str> {
        self.something.as_deref().filter(|s| !s.is_empty())
    }
}

/// Query arguments echoed back by the upstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Args {
    pub foo1: String,
    pub foo2: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FooResponse {
    pub args: Args,
}

/// Every reply shape the service recognises. `Fallback` is only accepted when
/// it carries the empty-body sentinel.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum UpstreamReply {
    Echo(FooResponse),
    Fallback { error: String },
}

/// Payload of a successful envelope.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Stuff {
    pub stuff: String,
}
