//! Agent gateway entrypoints: resolve session, assemble config, invoke.

use std::sync::Arc;

use agent::{AgentProfile, AgentRuntime, AgentSettings, assemble, invoke_agent};
use proto::{
    PromptRequest, PromptResponse, RequestContext, ReviewRequest, ReviewResponse,
};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::review::build_review_prompt;
use crate::session::resolve_identity;

/// Which entrypoint a deployment serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entrypoint {
    /// `{"prompt"}` → `{"response"}`.
    General,
    /// `{"pr_data"}` → `{"review", "pr_title", "files_reviewed"}`.
    Review,
}

impl Entrypoint {
    /// Role profile used for this entrypoint.
    pub fn profile(self) -> AgentProfile {
        match self {
            Self::General => AgentProfile::General,
            Self::Review => AgentProfile::PrReviewer,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Review => "review",
        }
    }
}

impl std::fmt::Display for Entrypoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Entrypoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(Self::General),
            "review" => Ok(Self::Review),
            other => Err(format!("unknown entrypoint: {other}")),
        }
    }
}

/// Response mapping of either entrypoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GatewayResponse {
    Prompt(PromptResponse),
    Review(ReviewResponse),
}

/// Maps inbound requests to agent invocations.
///
/// Holds only immutable settings and the runtime handle; cloning is cheap and
/// concurrent requests do not share mutable state.
#[derive(Clone)]
pub struct AgentGateway {
    settings: Arc<AgentSettings>,
    runtime: Arc<dyn AgentRuntime>,
}

impl AgentGateway {
    /// Creates a gateway over process-wide settings and a runtime client.
    pub fn new(settings: AgentSettings, runtime: Arc<dyn AgentRuntime>) -> Self {
        Self {
            settings: Arc::new(settings),
            runtime,
        }
    }

    pub fn settings(&self) -> &AgentSettings {
        &self.settings
    }

    /// General entrypoint: forwards the prompt as-is.
    pub async fn invoke(
        &self,
        req: &PromptRequest,
        ctx: &RequestContext,
    ) -> Result<PromptResponse, proto::Error> {
        let profile = AgentProfile::General;
        let identity = resolve_identity(ctx, profile);
        let config = assemble(&self.settings, profile, &identity)?;

        info!(
            request_id = ctx.request_id().unwrap_or("-"),
            session = %identity.session_id,
            actor = %identity.actor_id,
            "Handling prompt request"
        );
        let result = invoke_agent(self.runtime.as_ref(), config, req.prompt.as_str()).await?;
        Ok(PromptResponse {
            response: result.into_text(),
        })
    }

    /// Review entrypoint: synthesizes a review prompt from the PR payload.
    pub async fn review_pr(
        &self,
        req: &ReviewRequest,
        ctx: &RequestContext,
    ) -> Result<ReviewResponse, proto::Error> {
        let profile = AgentProfile::PrReviewer;
        let identity = resolve_identity(ctx, profile);
        let config = assemble(&self.settings, profile, &identity)?;

        let pr = &req.pr_data;
        let prompt = build_review_prompt(pr);
        info!(
            request_id = ctx.request_id().unwrap_or("-"),
            session = %identity.session_id,
            actor = %identity.actor_id,
            files = pr.files.len(),
            "Handling review request"
        );
        let result = invoke_agent(self.runtime.as_ref(), config, prompt).await?;
        Ok(ReviewResponse {
            review: result.into_text(),
            pr_title: pr.title.clone(),
            files_reviewed: pr.files.len(),
        })
    }

    /// Parses a raw JSON payload for `entrypoint` and handles it.
    ///
    /// Malformed payloads are rejected before any configuration or runtime
    /// work happens.
    pub async fn dispatch(
        &self,
        entrypoint: Entrypoint,
        payload: Value,
        ctx: &RequestContext,
    ) -> Result<GatewayResponse, proto::Error> {
        match entrypoint {
            Entrypoint::General => {
                let req = PromptRequest::from_value(payload)?;
                self.invoke(&req, ctx).await.map(GatewayResponse::Prompt)
            }
            Entrypoint::Review => {
                let req = ReviewRequest::from_value(payload)?;
                self.review_pr(&req, ctx).await.map(GatewayResponse::Review)
            }
        }
    }
}
