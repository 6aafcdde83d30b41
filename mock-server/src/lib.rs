use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query},
    http::{HeaderMap, Method, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// Reply of `GET /get`, shaped like the public echo service.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Echo {
    pub args: BTreeMap<String, String>,
    pub headers: BTreeMap<String, String>,
}

/// Reply of the `/anything` routes: the method and raw body as received.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Received {
    pub method: String,
    pub body: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/get", get(echo))
        .route("/anything", post(anything).put(anything).delete(anything))
        .route("/status/{code}", get(status))
        .route("/empty", get(empty))
        .route("/malformed", get(malformed))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn echo(Query(args): Query<BTreeMap<String, String>>, headers: HeaderMap) -> Json<Echo> {
    let headers = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    Json(Echo { args, headers })
}

async fn anything(method: Method, body: String) -> Json<Received> {
    Json(Received {
        method: method.to_string(),
        body,
    })
}

async fn status(Path(code): Path<u16>) -> (StatusCode, Json<serde_json::Value>) {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST);
    (status, Json(serde_json::json!({ "status": status.as_u16() })))
}

async fn empty() -> StatusCode {
    StatusCode::OK
}

async fn malformed() -> &'static str {
    "<html>not json</html>"
}
