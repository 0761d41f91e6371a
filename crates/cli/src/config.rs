use agent::AgentSettings;
use proto::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Application configuration, read once at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Model / region / memory settings.
    pub agent: AgentSection,
    /// Agent runtime endpoint.
    pub runtime: RuntimeConfig,
    /// HTTP hosting.
    pub server: ServerConfig,
}

/// `[agent]` section. Empty strings mean "unset".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSection {
    /// Model identifier (`MODEL_ID`).
    pub model_id: String,
    /// Cloud region (`REGION_ID`).
    pub region: String,
    /// Memory store id (`MEMORY_ID`). Empty disables memory.
    pub memory_id: String,
}

/// `[runtime]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Base URL of the agent runtime (`AGENT_RUNTIME_URL`).
    pub url: String,
    /// Optional bearer token (`AGENT_RUNTIME_TOKEN`).
    pub token: String,
}

/// `[server]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Config {
    /// Loads configuration from explicit path, fallback locations, and env overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = path.map(|p| p.to_path_buf()).or_else(|| {
            // Look in current dir, then home dir
            let cwd = std::env::current_dir().ok()?.join("config.toml");
            if cwd.exists() {
                return Some(cwd);
            }
            let home = std::env::var("HOME").ok()?;
            let home_config = PathBuf::from(home)
                .join(".agent-gateway")
                .join("config.toml");
            if home_config.exists() {
                return Some(home_config);
            }
            None
        });
        debug!(path = ?config_path, "Config file resolved");

        let mut config = if let Some(path) = config_path {
            let content = std::fs::read_to_string(&path).map_err(ConfigError::Io)?;
            toml::from_str(&content).map_err(|e| ConfigError::Toml(e.to_string()))?
        } else {
            Config::default()
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Environment variables win over file values.
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(model) = std::env::var("MODEL_ID") {
            self.agent.model_id = model;
        }
        if let Ok(region) = std::env::var("REGION_ID") {
            self.agent.region = region;
        }
        if let Ok(memory) = std::env::var("MEMORY_ID") {
            self.agent.memory_id = memory;
        }
        if let Ok(url) = std::env::var("AGENT_RUNTIME_URL") {
            self.runtime.url = url;
        }
        if let Ok(token) = std::env::var("AGENT_RUNTIME_TOKEN") {
            self.runtime.token = token;
        }
        if let Ok(host) = std::env::var("GATEWAY_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("GATEWAY_PORT") {
            self.server.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: "GATEWAY_PORT".to_string(),
                reason: format!("'{port}' is not a valid port"),
            })?;
        }
        Ok(())
    }

    /// Immutable settings handed to the gateway.
    pub fn agent_settings(&self) -> AgentSettings {
        AgentSettings::new(
            Some(self.agent.model_id.clone()),
            Some(self.agent.region.clone()),
            Some(self.agent.memory_id.clone()),
        )
    }

    /// Agent runtime base URL; required by every command that invokes the agent.
    pub fn runtime_url(&self) -> Result<&str, ConfigError> {
        let url = self.runtime.url.trim();
        if url.is_empty() {
            return Err(ConfigError::MissingField("AGENT_RUNTIME_URL".to_string()));
        }
        Ok(url)
    }

    /// Logs which settings are present, never their secret values.
    pub fn log_presence(&self) {
        let settings = self.agent_settings();
        info!(
            model_id = settings.model_id.as_deref().unwrap_or("<unset>"),
            region = settings.region.as_deref().unwrap_or("<unset>"),
            memory = settings.memory_enabled(),
            runtime_url = !self.runtime.url.trim().is_empty(),
            runtime_token = !self.runtime.token.trim().is_empty(),
            "Settings loaded"
        );
    }
}
