use std::sync::{Arc, Mutex};

use agent::{
    AgentProfile, AgentRuntime, AgentSettings, InvocationRequest, RemoteAgentRuntime, assemble,
};
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
};
use proto::{InvocationError, SessionId, SessionIdentity};
use serde_json::{Value, json};

#[derive(Clone)]
struct MockRuntime {
    status: StatusCode,
    body: String,
    requests: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

async fn handle_invoke(
    State(state): State<MockRuntime>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.requests.lock().unwrap().push((auth, body));
    (state.status, state.body.clone())
}

async fn spawn_mock(status: StatusCode, body: &str) -> (String, MockRuntime) {
    let state = MockRuntime {
        status,
        body: body.to_string(),
        requests: Arc::new(Mutex::new(Vec::new())),
    };
    let app = Router::new()
        .route("/invoke", post(handle_invoke))
        .with_state(state.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock runtime serve");
    });
    (format!("http://{addr}"), state)
}

fn request(memory_id: Option<&str>) -> InvocationRequest {
    let settings = AgentSettings::new(
        Some("anthropic.claude-3-5-haiku-20241022-v1:0".to_string()),
        Some("us-west-2".to_string()),
        memory_id.map(str::to_string),
    );
    let identity = SessionIdentity::new(
        SessionId::from("local-test-session"),
        AgentProfile::General.actor_id(),
    );
    let config = assemble(&settings, AgentProfile::General, &identity).expect("assemble");
    InvocationRequest::new(config, "Hello, world")
}

#[tokio::test]
async fn remote_runtime_posts_request_and_normalizes_reply() {
    let (url, mock) = spawn_mock(
        StatusCode::OK,
        r#"{"message":{"role":"assistant","content":[{"text":"Hi there!"}]}}"#,
    )
    .await;
    let runtime = RemoteAgentRuntime::new(url).with_token("secret");

    let result = runtime.invoke(request(Some("mem-1"))).await.expect("invoke");
    assert_eq!(result.text().as_str(), "Hi there!");

    let requests = mock.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let (auth, body) = &requests[0];
    assert_eq!(auth.as_deref(), Some("Bearer secret"));
    assert_eq!(body["prompt"], "Hello, world");
    assert_eq!(body["model_id"], "anthropic.claude-3-5-haiku-20241022-v1:0");
    assert_eq!(body["code_interpreter"]["session_name"], "local-test-session");
    assert_eq!(body["code_interpreter"]["auto_create"], true);
    assert_eq!(body["session_manager"]["memory_id"], "mem-1");
    assert_eq!(body["session_manager"]["session_id"], "local-test-session");
}

#[tokio::test]
async fn remote_runtime_omits_session_manager_when_memoryless() {
    let (url, mock) = spawn_mock(StatusCode::OK, r#"{"message":{"content":[]}}"#).await;
    let runtime = RemoteAgentRuntime::new(url);

    let result = runtime.invoke(request(None)).await.expect("invoke");
    assert!(result.text().is_fallback());

    let requests = mock.requests.lock().unwrap();
    let (auth, body) = &requests[0];
    assert_eq!(auth, &None);
    assert!(body.get("session_manager").is_none());
}

#[tokio::test]
async fn remote_runtime_maps_auth_failure() {
    let (url, _mock) = spawn_mock(StatusCode::FORBIDDEN, "invalid credentials").await;
    let runtime = RemoteAgentRuntime::new(url);

    let err = runtime.invoke(request(None)).await.expect_err("should fail");
    assert!(matches!(err, InvocationError::Auth(ref msg) if msg.contains("invalid credentials")));
}

#[tokio::test]
async fn remote_runtime_rejects_non_json_body() {
    let (url, _mock) = spawn_mock(StatusCode::OK, "<html>oops</html>").await;
    let runtime = RemoteAgentRuntime::new(url);

    let err = runtime.invoke(request(None)).await.expect_err("should fail");
    assert!(matches!(err, InvocationError::InvalidResponse(_)));
}

#[tokio::test]
async fn remote_runtime_reports_transport_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();
    drop(listener);
    let runtime = RemoteAgentRuntime::new(format!("http://127.0.0.1:{port}"));

    let err = runtime.invoke(request(None)).await.expect_err("should fail");
    assert!(matches!(err, InvocationError::Transport(_)));
}
