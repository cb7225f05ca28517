#![allow(dead_code)]

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// Response served for one path
#[derive(Debug, Clone)]
pub struct Canned {
    status: StatusCode,
    content_type: &'static str,
    body: String,
    delay: Option<Duration>,
}

impl Canned {
    pub fn json(value: Value) -> Self {
        Self::raw_json(&value.to_string())
    }

    /// JSON content type with an arbitrary, possibly malformed, body
    pub fn raw_json(body: &str) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: "application/json",
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn text(body: &str) -> Self {
        Self {
            content_type: "text/plain; charset=utf-8",
            ..Self::raw_json(body)
        }
    }

    pub fn status(mut self, status: u16) -> Self {
        self.status = StatusCode::from_u16(status).unwrap();
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Debug, Clone)]
pub struct Recorded {
    pub uri: String,
    pub headers: HeaderMap,
}

/// In-process stand-in for the stats API, recording every request it sees
#[derive(Debug, Default)]
pub struct FakeApi {
    routes: HashMap<String, Canned>,
    requests: Mutex<Vec<Recorded>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, path: &str, canned: Canned) -> Self {
        self.routes.insert(path.to_string(), canned);
        self
    }

    /// Serve on an ephemeral port, returning the base URL
    pub async fn start(self) -> (String, Arc<FakeApi>) {
        let api = Arc::new(self);
        let router = Router::new().fallback(respond).with_state(api.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        (format!("http://{}", address), api)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn hits(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

async fn respond(State(api): State<Arc<FakeApi>>, uri: Uri, headers: HeaderMap) -> Response {
    api.requests.lock().unwrap().push(Recorded {
        uri: uri.to_string(),
        headers,
    });

    let Some(canned) = api.routes.get(uri.path()).cloned() else {
        let body = json!({ "detail": "Not Found" }).to_string();
        return (StatusCode::NOT_FOUND, [(header::CONTENT_TYPE, "application/json")], body).into_response();
    };

    if let Some(delay) = canned.delay {
        tokio::time::sleep(delay).await;
    }
    (canned.status, [(header::CONTENT_TYPE, canned.content_type)], canned.body).into_response()
}

pub fn history_entry(match_id: i64, datetime: &str, mu: f64, sigma: f64) -> Value {
    json!({
        "club_id": 1,
        "match_id": match_id,
        "date": &datetime[..10],
        "start_time": &datetime[11..],
        "datetime": datetime,
        "winner": match_id % 2 == 1,
        "mu": mu,
        "sigma": sigma,
    })
}

pub fn rank_history(player_id: i64, entries: Vec<Value>) -> Value {
    json!({ "player_id": player_id, "history": entries })
}
