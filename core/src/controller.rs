//! Maps one trigger event to exactly one envelope.
//!
//! # Design
//! The controller holds only its service and no per-request state, so a single
//! instance built at process start serves every invocation. The flow is
//! linear: validate, call the service, then report the first failure or the
//! projected success payload.

use serde_json::json;

use crate::envelope::ResultEnvelope;
use crate::error::HandlerError;
use crate::service::StuffService;
use crate::types::{FooResponse, Stuff, TriggerEvent};

#[derive(Debug)]
pub struct Controller<S> {
    service: S,
}

impl<S: StuffService> Controller<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn handle_some_cool_control_flow(&self, event: Option<&TriggerEvent>) -> ResultEnvelope {
        tracing::info!(?event, "handling event");

        match self.run(event) {
            Ok(stuff) => ResultEnvelope::success(Some("success"), Some(json!(stuff))),
            Err(err) => {
                match &err {
                    HandlerError::UpstreamCallFailure(source) => {
                        tracing::error!(error = %source, "service call failed");
                    }
                    other => tracing::warn!(error = %other, "request rejected"),
                }
                ResultEnvelope::error(Some(err.descriptor()))
            }
        }
    }

    fn run(&self, event: Option<&TriggerEvent>) -> Result<Stuff, HandlerError> {
        if event.and_then(TriggerEvent::something).is_none() {
            return Err(HandlerError::Validation("No something provided".to_string()));
        }

        let response = self
            .service
            .get_stuff_from_api()
            .map_err(HandlerError::UpstreamCallFailure)?
            .ok_or(HandlerError::UpstreamEmptyResponse)?;

        Ok(project(response))
    }
}

fn project(response: FooResponse) -> Stuff {
    Stuff {
        stuff: response.args.foo1,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::Value;

    use super::*;
    use crate::error::ApiError;
    use crate::types::Args;

    enum Reply {
        Echo,
        Empty,
        Fail,
    }

    struct FakeService {
        reply: Reply,
        calls: AtomicUsize,
    }

    impl FakeService {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl StuffService for FakeService {
        fn get_stuff_from_api(&self) -> Result<Option<FooResponse>, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.reply {
                Reply::Echo => Ok(Some(FooResponse {
                    args: Args {
                        foo1: "bar1".to_string(),
                        foo2: "x".to_string(),
                    },
                })),
                Reply::Empty => Ok(None),
                Reply::Fail => Err(ApiError::RequestFailed {
                    status: 502,
                    body: "bad gateway".to_string(),
                }),
            }
        }
    }

    fn event(something: Option<&str>) -> TriggerEvent {
        TriggerEvent {
            something: something.map(str::to_string),
        }
    }

    fn body(envelope: &ResultEnvelope) -> Value {
        envelope.body_value()
    }

    #[test]
    fn success_projects_foo1() {
        let controller = Controller::new(FakeService::new(Reply::Echo));
        let envelope = controller.handle_some_cool_control_flow(Some(&event(Some("blah"))));

        assert_eq!(envelope.status_code(), 200);
        let body = body(&envelope);
        assert_eq!(body["code"], "0");
        assert_eq!(body["message"], "success");
        assert_eq!(body["data"], json!({"stuff": "bar1"}));
        assert_eq!(controller.service().calls(), 1);
    }

    #[test]
    fn missing_something_is_rejected_without_calling_service() {
        let controller = Controller::new(FakeService::new(Reply::Echo));

        for input in [None, Some(event(None)), Some(event(Some("")))] {
            let envelope = controller.handle_some_cool_control_flow(input.as_ref());
            assert_eq!(envelope.status_code(), 400);
            let body = body(&envelope);
            assert_eq!(body["code"], "100");
            assert_eq!(body["message"], "No something provided");
        }

        assert_eq!(controller.service().calls(), 0);
    }

    #[test]
    fn service_failure_is_generic_server_error() {
        let controller = Controller::new(FakeService::new(Reply::Fail));
        let envelope = controller.handle_some_cool_control_flow(Some(&event(Some("blah"))));

        assert_eq!(envelope.status_code(), 500);
        let body = body(&envelope);
        assert_eq!(body["code"], "100");
        assert_eq!(body["message"], "Something went wrong");
        assert!(body.get("data").is_none());
    }

    #[test]
    fn empty_service_reply_is_server_error() {
        let controller = Controller::new(FakeService::new(Reply::Empty));
        let envelope = controller.handle_some_cool_control_flow(Some(&event(Some("blah"))));

        assert_eq!(envelope.status_code(), 500);
        let body = body(&envelope);
        assert_eq!(body["code"], "100");
        assert_eq!(body["message"], "could not get data");
    }
}
