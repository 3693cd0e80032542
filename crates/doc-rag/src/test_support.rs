//! In-process mock of a chat-completion endpoint for tests

use axum::{
    body::Bytes,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Router,
};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;

/// Canned response returned for every request
#[derive(Clone)]
pub struct MockReply {
    status: u16,
    body: String,
}

impl MockReply {
    /// A successful completion with `content`
    pub fn answer(content: &str) -> Self {
        Self {
            status: 200,
            body: json!({
                "id": "chatcmpl-test",
                "object": "chat.completion",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": content},
                    "finish_reason": "stop"
                }]
            })
            .to_string(),
        }
    }

    /// Any status with a raw body
    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

type Recorded = Arc<Mutex<Vec<(Option<String>, Value)>>>;

#[derive(Clone)]
struct MockState {
    reply: MockReply,
    requests: Recorded,
}

/// Handle to a running mock server
pub struct MockLlm {
    addr: SocketAddr,
    requests: Recorded,
}

impl MockLlm {
    /// Chat-completion URL of the mock
    pub fn endpoint(&self) -> String {
        format!("http://{}/openai/v1/chat/completions", self.addr)
    }

    /// Requests received so far: (authorization header, JSON body)
    pub fn requests(&self) -> Vec<(Option<String>, Value)> {
        self.requests.lock().clone()
    }
}

async fn handle(State(state): State<MockState>, headers: HeaderMap, body: Bytes) -> impl IntoResponse {
    let auth = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    state.requests.lock().push((auth, body));

    let status = StatusCode::from_u16(state.reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, state.reply.body.clone())
}

/// Start a mock endpoint on an ephemeral local port
pub async fn spawn_mock_llm(reply: MockReply) -> MockLlm {
    let requests: Recorded = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        reply,
        requests: Arc::clone(&requests),
    };

    let router = Router::new()
        .route("/openai/v1/chat/completions", post(handle))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    MockLlm { addr, requests }
}
