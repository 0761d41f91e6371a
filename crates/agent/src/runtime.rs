//! Agent runtime seam and the invocation adapter.

use std::collections::BTreeSet;

use async_trait::async_trait;
use proto::InvocationError;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::config::{AgentConfig, CodeInterpreterConfig, ToolId};
use crate::memory::MemorySessionManager;
use crate::result::AgentResult;

/// One request to the agent runtime.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvocationRequest {
    /// User-facing text.
    pub prompt: String,
    pub model_id: String,
    pub system_prompt: String,
    pub tools: BTreeSet<ToolId>,
    pub code_interpreter: CodeInterpreterConfig,
    /// Omitted entirely in memoryless mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_manager: Option<MemorySessionManager>,
}

impl InvocationRequest {
    /// Binds a prompt to an assembled configuration.
    pub fn new(config: AgentConfig, prompt: impl Into<String>) -> Self {
        let session_manager = MemorySessionManager::for_config(&config);
        let AgentConfig {
            model_id,
            system_prompt,
            tools,
            code_interpreter,
            memory: _,
        } = config;
        Self {
            prompt: prompt.into(),
            model_id,
            system_prompt,
            tools,
            code_interpreter,
            session_manager,
        }
    }
}

/// Hosted agent runtime (model inference plus its internal tool loop).
///
/// Implementations perform a single attempt; retries belong to the runtime.
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    /// Submits one request and returns the normalized result.
    async fn invoke(&self, req: InvocationRequest) -> Result<AgentResult, InvocationError>;
}

/// Sends `prompt` with `config` to the runtime and returns its result.
pub async fn invoke_agent(
    runtime: &dyn AgentRuntime,
    config: AgentConfig,
    prompt: impl Into<String>,
) -> Result<AgentResult, InvocationError> {
    let req = InvocationRequest::new(config, prompt);
    let session = req.code_interpreter.session_name.clone();
    info!(
        model = %req.model_id,
        session = %session,
        memory = req.session_manager.is_some(),
        prompt_chars = req.prompt.chars().count(),
        "Invoking agent runtime"
    );

    let t0 = std::time::Instant::now();
    match runtime.invoke(req).await {
        Ok(result) => {
            debug!(
                elapsed_ms = %t0.elapsed().as_millis(),
                fallback = result.text().is_fallback(),
                "Agent runtime responded"
            );
            Ok(result)
        }
        Err(e) => {
            error!(session = %session, "Agent runtime invocation failed: {e}");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use proto::{SessionId, SessionIdentity};
    use serde_json::json;

    use super::*;
    use crate::config::{AgentProfile, AgentSettings, assemble};

    struct Recording {
        seen: Mutex<Vec<InvocationRequest>>,
        reply: Result<serde_json::Value, ()>,
    }

    #[async_trait]
    impl AgentRuntime for Recording {
        async fn invoke(&self, req: InvocationRequest) -> Result<AgentResult, InvocationError> {
            self.seen.lock().unwrap().push(req);
            match &self.reply {
                Ok(raw) => Ok(AgentResult::from_raw(raw.clone())),
                Err(()) => Err(InvocationError::Timeout("sandbox start".to_string())),
            }
        }
    }

    fn config(memory_id: Option<&str>) -> AgentConfig {
        let settings = AgentSettings::new(
            Some("model-x".to_string()),
            Some("us-west-2".to_string()),
            memory_id.map(str::to_string),
        );
        let identity = SessionIdentity::new(
            SessionId::from("s-1"),
            AgentProfile::General.actor_id(),
        );
        assemble(&settings, AgentProfile::General, &identity).expect("assemble")
    }

    #[test]
    fn request_without_memory_has_no_session_manager() {
        let req = InvocationRequest::new(config(None), "hi");
        assert!(req.session_manager.is_none());
        let value = serde_json::to_value(&req).expect("serialize");
        assert!(value.get("session_manager").is_none());
        assert_eq!(value["tools"], json!(["code_interpreter"]));
        assert_eq!(value["code_interpreter"]["session_name"], "s-1");
    }

    #[test]
    fn request_with_memory_carries_session_manager() {
        let req = InvocationRequest::new(config(Some("mem-1")), "hi");
        let manager = req.session_manager.as_ref().expect("manager");
        assert_eq!(manager.memory_id(), "mem-1");
        let value = serde_json::to_value(&req).expect("serialize");
        assert_eq!(value["session_manager"]["memory_id"], "mem-1");
    }

    #[tokio::test]
    async fn invoke_agent_passes_request_and_returns_result() {
        let runtime = Recording {
            seen: Mutex::new(Vec::new()),
            reply: Ok(json!({"message": {"content": [{"text": "pong"}]}})),
        };
        let result = invoke_agent(&runtime, config(None), "ping")
            .await
            .expect("invoke");
        assert_eq!(result.text().as_str(), "pong");

        let seen = runtime.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].prompt, "ping");
        assert_eq!(seen[0].model_id, "model-x");
    }

    #[tokio::test]
    async fn invoke_agent_propagates_runtime_error_without_retry() {
        let runtime = Recording {
            seen: Mutex::new(Vec::new()),
            reply: Err(()),
        };
        let err = invoke_agent(&runtime, config(None), "ping")
            .await
            .expect_err("should fail");
        assert!(matches!(err, InvocationError::Timeout(_)));
        assert_eq!(runtime.seen.lock().unwrap().len(), 1);
    }
}
