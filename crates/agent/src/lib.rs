//! Agent configuration assembly, memory binding, and runtime adapters.

pub mod config;
pub mod memory;
pub mod prompts;
pub mod remote;
pub mod result;
pub mod runtime;

/// Static settings, role profiles, and the configuration assembler.
pub use config::{
    AgentConfig, AgentProfile, AgentSettings, CodeInterpreterConfig, MemoryConfig,
    RetrievalPolicy, ToolId, assemble,
};
/// Memory session manager passed to the runtime.
pub use memory::MemorySessionManager;
/// HTTP agent runtime client.
pub use remote::RemoteAgentRuntime;
/// Normalized runtime results.
pub use result::{AgentResult, ResponseText, extract_text};
/// Runtime trait and invocation adapter.
pub use runtime::{AgentRuntime, InvocationRequest, invoke_agent};
