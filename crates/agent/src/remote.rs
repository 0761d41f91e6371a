//! HTTP client for a hosted agent runtime.

use async_trait::async_trait;
use proto::InvocationError;
use serde_json::Value;
use tracing::debug;

use crate::result::AgentResult;
use crate::runtime::{AgentRuntime, InvocationRequest};

const INVOKE_PATH: &str = "/invoke";
const BODY_PREVIEW_CHARS: usize = 500;

/// Agent runtime reached over HTTP (`POST {base_url}/invoke`).
pub struct RemoteAgentRuntime {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl RemoteAgentRuntime {
    /// Creates a client for the runtime at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Sends `Authorization: Bearer <token>` with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = (!token.trim().is_empty()).then_some(token);
        self
    }

    pub fn endpoint(&self) -> String {
        format!("{}{INVOKE_PATH}", self.base_url)
    }
}

#[async_trait]
impl AgentRuntime for RemoteAgentRuntime {
    async fn invoke(&self, req: InvocationRequest) -> Result<AgentResult, InvocationError> {
        let url = self.endpoint();
        debug!(
            url = %url,
            model = %req.model_id,
            tools = req.tools.len(),
            memory = req.session_manager.is_some(),
            "Sending request to agent runtime"
        );

        let body =
            serde_json::to_vec(&req).map_err(|e| InvocationError::Serialization(e.to_string()))?;

        let mut builder = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .body(body);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| InvocationError::Transport(e.to_string()))?;

        let status = response.status();
        debug!(status = %status.as_u16(), "Agent runtime response received");

        let body = response
            .text()
            .await
            .map_err(|e| InvocationError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(status_error(status.as_u16(), &body));
        }

        let raw: Value = serde_json::from_str(&body).map_err(|e| {
            InvocationError::InvalidResponse(format!(
                "Deserialization error: {e}; body: {}",
                preview(&body, 200)
            ))
        })?;

        Ok(AgentResult::from_raw(raw))
    }
}

/// Maps a non-success HTTP status to an invocation error.
fn status_error(status: u16, body: &str) -> InvocationError {
    let detail = format!("HTTP {status}: {}", preview(body, BODY_PREVIEW_CHARS));
    match status {
        401 | 403 => InvocationError::Auth(detail),
        408 | 504 => InvocationError::Timeout(detail),
        429 => InvocationError::RateLimit,
        _ => InvocationError::Api(detail),
    }
}

fn preview(body: &str, max_chars: usize) -> String {
    body.chars().take(max_chars).collect()
}
