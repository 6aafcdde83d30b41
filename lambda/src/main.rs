use std::sync::Arc;

use lambda_runtime::{run, service_fn, tracing, Error, LambdaEvent};
use serde_json::Value;
use stuff_core::{handle_event, Controller, EchoService, ResultEnvelope, UpstreamConfig};

type AppController = Controller<EchoService>;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let config = UpstreamConfig::from_env()?;
    tracing::info!(hostname = %config.hostname, port = ?config.port, "upstream configured");

    let controller = Arc::new(Controller::new(EchoService::new(config)));

    run(service_fn(move |event: LambdaEvent<Value>| {
        let controller = Arc::clone(&controller);
        async move { get_some_stuff_from_api(controller, event).await }
    }))
    .await
}

async fn get_some_stuff_from_api(
    controller: Arc<AppController>,
    event: LambdaEvent<Value>,
) -> Result<ResultEnvelope, Error> {
    tracing::info!(request_id = %event.context.request_id, "invocation received");

    // The outbound call blocks; keep it off the runtime's worker.
    let envelope =
        tokio::task::spawn_blocking(move || handle_event(&controller, event.payload)).await?;

    Ok(envelope)
}
