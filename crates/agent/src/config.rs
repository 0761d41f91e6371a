//! Static agent settings and per-request configuration assembly.

use std::collections::{BTreeMap, BTreeSet};

use proto::{ActorId, ConfigError, SessionId, SessionIdentity};
use serde::Serialize;
use tracing::debug;

use crate::prompts::{GENERAL_ASSISTANT_PROMPT, PR_REVIEWER_PROMPT};

/// Process-wide settings, read once at startup and never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentSettings {
    /// Model identifier passed to the agent runtime.
    pub model_id: Option<String>,
    /// Cloud region for the memory store and sandbox.
    pub region: Option<String>,
    /// Memory store id. `None` disables memory entirely.
    pub memory_id: Option<String>,
}

impl AgentSettings {
    /// Builds settings, treating blank values as unset.
    pub fn new(
        model_id: Option<String>,
        region: Option<String>,
        memory_id: Option<String>,
    ) -> Self {
        Self {
            model_id: non_blank(model_id),
            region: non_blank(region),
            memory_id: non_blank(memory_id),
        }
    }

    /// Returns `true` when a memory store is configured.
    pub fn memory_enabled(&self) -> bool {
        configured(&self.memory_id).is_some()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| configured_str(v).is_some())
}

/// Set and non-blank. Fields are public, so reads re-check.
fn configured(value: &Option<String>) -> Option<&str> {
    value.as_deref().and_then(configured_str)
}

fn configured_str(value: &str) -> Option<&str> {
    (!value.trim().is_empty()).then_some(value)
}

/// Deployment role, selected by the entrypoint being served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentProfile {
    /// General-purpose assistant.
    General,
    /// Pull-request review specialist.
    PrReviewer,
}

impl AgentProfile {
    /// Actor id under which this role's memory is kept.
    pub fn actor_id(self) -> ActorId {
        match self {
            Self::General => ActorId::from("default_user"),
            Self::PrReviewer => ActorId::from("pr_reviewer"),
        }
    }

    pub fn system_prompt(self) -> &'static str {
        match self {
            Self::General => GENERAL_ASSISTANT_PROMPT,
            Self::PrReviewer => PR_REVIEWER_PROMPT,
        }
    }

    /// Retrieval namespaces and their policies for the given actor.
    pub fn retrieval_namespaces(
        self,
        actor: &ActorId,
    ) -> Result<BTreeMap<String, RetrievalPolicy>, ConfigError> {
        let entries = match self {
            Self::General => vec![
                (format!("/users/{actor}/facts"), RetrievalPolicy::new(3, 0.5)?),
                (
                    format!("/users/{actor}/preferences"),
                    RetrievalPolicy::new(3, 0.5)?,
                ),
            ],
            Self::PrReviewer => vec![
                ("/reviews/patterns".to_string(), RetrievalPolicy::new(5, 0.7)?),
                ("/reviews/standards".to_string(), RetrievalPolicy::new(3, 0.8)?),
            ],
        };
        Ok(entries.into_iter().collect())
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::PrReviewer => "review",
        }
    }
}

/// How many memory records, and how relevant, are injected per namespace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RetrievalPolicy {
    top_k: u32,
    #[serde(rename = "relevance_score")]
    relevance_threshold: f32,
}

impl RetrievalPolicy {
    /// Validates `top_k >= 1` and `relevance_threshold` in `[0, 1]`.
    pub fn new(top_k: u32, relevance_threshold: f32) -> Result<Self, ConfigError> {
        if top_k == 0 {
            return Err(ConfigError::InvalidValue {
                field: "top_k".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&relevance_threshold) {
            return Err(ConfigError::InvalidValue {
                field: "relevance_threshold".to_string(),
                reason: format!("{relevance_threshold} is outside [0, 1]"),
            });
        }
        Ok(Self {
            top_k,
            relevance_threshold,
        })
    }

    pub fn top_k(&self) -> u32 {
        self.top_k
    }

    pub fn relevance_threshold(&self) -> f32 {
        self.relevance_threshold
    }
}

/// Memory store binding for one (session, actor).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryConfig {
    pub memory_id: String,
    pub session_id: SessionId,
    pub actor_id: ActorId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Namespace path → retrieval policy.
    #[serde(rename = "retrieval_config")]
    pub retrieval: BTreeMap<String, RetrievalPolicy>,
}

/// Identifiers of tools the agent may call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolId {
    /// Remote code-execution sandbox.
    CodeInterpreter,
}

/// Code-interpreter sandbox binding, keyed by session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeInterpreterConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Sandbox name; one sandbox per session.
    pub session_name: SessionId,
    /// Create the sandbox on first use when it does not exist.
    pub auto_create: bool,
}

/// Fully assembled configuration for a single invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentConfig {
    pub model_id: String,
    pub system_prompt: String,
    pub tools: BTreeSet<ToolId>,
    pub code_interpreter: CodeInterpreterConfig,
    /// `None` means memoryless mode.
    pub memory: Option<MemoryConfig>,
}

/// Builds the agent configuration for one request.
///
/// Fails with [`ConfigError::MissingField`] when no model id is configured,
/// before anything is sent to the runtime.
pub fn assemble(
    settings: &AgentSettings,
    profile: AgentProfile,
    identity: &SessionIdentity,
) -> Result<AgentConfig, ConfigError> {
    let model_id = configured(&settings.model_id)
        .ok_or_else(|| ConfigError::MissingField("MODEL_ID".to_string()))?
        .to_string();

    let memory = match configured(&settings.memory_id) {
        Some(memory_id) => Some(MemoryConfig {
            memory_id: memory_id.to_string(),
            session_id: identity.session_id.clone(),
            actor_id: identity.actor_id.clone(),
            region: settings.region.clone(),
            retrieval: profile.retrieval_namespaces(&identity.actor_id)?,
        }),
        None => None,
    };

    let code_interpreter = CodeInterpreterConfig {
        region: settings.region.clone(),
        session_name: identity.session_id.clone(),
        auto_create: true,
    };

    debug!(
        profile = profile.name(),
        model = %model_id,
        session = %identity.session_id,
        actor = %identity.actor_id,
        memory = memory.is_some(),
        "Agent configuration assembled"
    );

    Ok(AgentConfig {
        model_id,
        system_prompt: profile.system_prompt().to_string(),
        tools: BTreeSet::from([ToolId::CodeInterpreter]),
        code_interpreter,
        memory,
    })
}
