//! Session resolution from the inbound request context.

use agent::AgentProfile;
use proto::{RequestContext, SessionId, SessionIdentity};

/// Returns the context's session id when present and non-empty, otherwise
/// the literal `"default"`.
pub fn resolve_session(ctx: &RequestContext) -> SessionId {
    ctx.session_id()
        .filter(|id| !id.is_empty())
        .map(SessionId::from)
        .unwrap_or_default()
}

/// Resolves the session and pairs it with the profile's actor id.
pub fn resolve_identity(ctx: &RequestContext, profile: AgentProfile) -> SessionIdentity {
    SessionIdentity::new(resolve_session(ctx), profile.actor_id())
}
