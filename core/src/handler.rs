//! Adapts a raw trigger payload into a controller call.

use serde_json::Value;

use crate::controller::Controller;
use crate::envelope::{ErrorDescriptor, ResultEnvelope, GENERIC_ERROR_CODE};
use crate::service::StuffService;
use crate::types::TriggerEvent;

/// A null payload yields the unknown-error envelope. A payload that does not
/// decode as a `TriggerEvent` is a bad request.
pub fn handle_event<S: StuffService>(controller: &Controller<S>, payload: Value) -> ResultEnvelope {
    if payload.is_null() {
        return ResultEnvelope::error(None);
    }

    match serde_json::from_value::<TriggerEvent>(payload) {
        Ok(event) => controller.handle_some_cool_control_flow(Some(&event)),
        Err(e) => {
            tracing::warn!(error = %e, "could not decode event payload");
            ResultEnvelope::error(Some(ErrorDescriptor::bad_request(
                GENERIC_ERROR_CODE,
                "Invalid event payload",
            )))
        }
    }
}
