//! Shared protocol types for the gateway, agent configuration, and CLI.
//!
//! This crate defines identity types, the request context, the payload and
//! response mappings of both entrypoints, and strongly-typed error enums
//! shared across the workspace.

pub mod context;
pub mod error;
pub mod message;
pub mod payload;

/// Re-export of all protocol error types.
pub use error::*;
/// Re-export of the transport request context.
pub use context::RequestContext;
/// Re-export of session/actor identity types.
pub use message::{ActorId, DEFAULT_SESSION_ID, SessionId, SessionIdentity};
/// Re-export of inbound payloads and outbound responses.
pub use payload::{
    PrData, PrFile, PromptRequest, PromptResponse, ReviewRequest, ReviewResponse,
};
