use proto::{ActorId, SessionId};
use serde::Serialize;
use tracing::debug;

use crate::config::{AgentConfig, MemoryConfig, RetrievalPolicy};

/// Session manager handed to the agent runtime for memory continuity.
///
/// Only exists when a memory store is configured; memoryless invocations carry
/// no manager at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MemorySessionManager {
    config: MemoryConfig,
}

impl MemorySessionManager {
    /// Wraps a complete memory configuration.
    pub fn new(config: MemoryConfig) -> Self {
        debug!(
            memory_id = %config.memory_id,
            session = %config.session_id,
            actor = %config.actor_id,
            namespaces = config.retrieval.len(),
            "Memory session manager created"
        );
        Self { config }
    }

    /// Builds the manager for an assembled configuration, or `None` in
    /// memoryless mode.
    pub fn for_config(config: &AgentConfig) -> Option<Self> {
        config.memory.clone().map(Self::new)
    }

    pub fn memory_id(&self) -> &str {
        &self.config.memory_id
    }

    pub fn session_id(&self) -> &SessionId {
        &self.config.session_id
    }

    pub fn actor_id(&self) -> &ActorId {
        &self.config.actor_id
    }

    pub fn region(&self) -> Option<&str> {
        self.config.region.as_deref()
    }

    /// Retrieval namespaces in lexical order.
    pub fn namespaces(&self) -> impl Iterator<Item = (&str, &RetrievalPolicy)> {
        self.config
            .retrieval
            .iter()
            .map(|(namespace, policy)| (namespace.as_str(), policy))
    }

    /// Policy for one namespace, if configured.
    pub fn retrieval_for(&self, namespace: &str) -> Option<&RetrievalPolicy> {
        self.config.retrieval.get(namespace)
    }
}
