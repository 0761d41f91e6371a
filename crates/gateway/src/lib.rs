//! Session-scoped agent gateway: entrypoints and HTTP hosting.

pub mod entrypoint;
pub mod review;
pub mod server;
pub mod session;

/// Gateway entrypoints and their response mapping.
pub use entrypoint::{AgentGateway, Entrypoint, GatewayResponse};
/// Review prompt synthesis.
pub use review::build_review_prompt;
/// HTTP server for a single entrypoint.
pub use server::{SESSION_HEADER, router, serve, serve_listener};
/// Session resolver.
pub use session::{resolve_identity, resolve_session};
