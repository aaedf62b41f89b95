//! Approval API and webhook stand-in that records every JSON body posted to it.

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::{Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct Request {
    pub path: String,
    pub body: Value,
}

#[derive(Clone)]
struct Recorder {
    status: StatusCode,
    requests: Arc<Mutex<Vec<Request>>>,
}

pub struct FakeApi {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<Request>>>,
}

/// Answers every request, on any path, with `status`.
pub async fn spawn(status: StatusCode) -> FakeApi {
    let requests: Arc<Mutex<Vec<Request>>> = Arc::default();
    let app = Router::new().fallback(record).with_state(Recorder {
        status,
        requests: requests.clone(),
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeApi { base_url, requests }
}

async fn record(State(recorder): State<Recorder>, uri: Uri, Json(body): Json<Value>) -> StatusCode {
    recorder.requests.lock().unwrap().push(Request {
        path: uri.path().to_string(),
        body,
    });
    recorder.status
}
