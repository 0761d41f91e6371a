use serde::{Deserialize, Serialize};

/// Session id used when the transport does not supply one.
pub const DEFAULT_SESSION_ID: &str = "default";

/// Identifier under which memory and sandbox state are scoped
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    /// Returns the raw session identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for the fallback id.
    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_SESSION_ID
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self(DEFAULT_SESSION_ID.to_string())
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Identifier of the memory owner (constant per deployment role)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(pub String);

impl ActorId {
    /// Returns the raw actor identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ActorId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Resolved (session, actor) pair for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    /// Session id from the request context, or the default.
    pub session_id: SessionId,
    /// Role-specific actor id.
    pub actor_id: ActorId,
}

impl SessionIdentity {
    /// Pairs a session with an actor.
    pub fn new(session_id: SessionId, actor_id: ActorId) -> Self {
        Self {
            session_id,
            actor_id,
        }
    }
}
