//! CLI entrypoint and subcommand orchestration.

mod config;
#[cfg(test)]
mod test_support;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use agent::RemoteAgentRuntime;
use anyhow::Context;
use clap::{Parser, Subcommand};
use config::Config;
use gateway::{AgentGateway, Entrypoint};
use proto::{PromptRequest, RequestContext, ReviewRequest};
use tracing::info;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Top-level command-line arguments.
#[derive(Parser)]
#[command(name = "agent-gateway")]
#[command(about = "Session-scoped gateway to a hosted agent runtime", version = "0.1.0")]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Also write debug logs to ~/.agent-gateway/logs/debug.log
    #[arg(long, default_value_t = false, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve one entrypoint over HTTP (`POST /invocations`, `GET /ping`)
    Serve {
        /// Entrypoint to host: general | review
        #[arg(short, long, default_value = "general")]
        entrypoint: Entrypoint,
        /// Bind host (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Bind port (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Send a single prompt to the general entrypoint and print the response
    Invoke {
        /// Prompt text
        #[arg(short, long)]
        prompt: String,
        /// Session id (defaults to "default")
        #[arg(short, long)]
        session_id: Option<String>,
    },
    /// Review a pull request described by a JSON payload file
    Review {
        /// File containing `{"pr_data": {...}}`
        #[arg(long)]
        pr_file: PathBuf,
        /// Session id (defaults to "default")
        #[arg(short, long)]
        session_id: Option<String>,
    },
}

#[tokio::main]
/// Program entrypoint.
async fn main() -> anyhow::Result<()> {
    // A missing .env file is not an error.
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // WorkerGuard must outlive main() so buffered file writes are flushed on exit.
    let _file_guard = init_tracing(&cli.log_level, cli.debug);

    let config = Config::load(cli.config.as_deref())?;
    config.log_presence();

    match cli.command {
        Commands::Serve {
            entrypoint,
            host,
            port,
        } => {
            let gateway = build_gateway(&config)?;
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            info!(entrypoint = %entrypoint, %host, port, "Starting agent gateway");
            gateway::serve(gateway, entrypoint, &host, port).await?;
        }
        Commands::Invoke { prompt, session_id } => {
            let gateway = build_gateway(&config)?;
            let ctx = request_context(session_id);
            let response = gateway.invoke(&PromptRequest::new(prompt), &ctx).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::Review {
            pr_file,
            session_id,
        } => {
            let request = read_review_request(&pr_file)?;
            let gateway = build_gateway(&config)?;
            let ctx = request_context(session_id);
            let response = gateway.review_pr(&request, &ctx).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

/// Installs the console subscriber and, with `debug`, a daily-rolling file layer.
fn init_tracing(
    log_level: &str,
    debug: bool,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    // stdout carries command output; logs go to stderr.
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(console_filter);

    if !debug {
        tracing_subscriber::registry().with(console).init();
        return None;
    }

    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let log_dir = PathBuf::from(home).join(".agent-gateway").join("logs");
    std::fs::create_dir_all(&log_dir).ok();
    let appender = tracing_appender::rolling::daily(&log_dir, "debug.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let file = fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_ansi(false)
        .with_filter(EnvFilter::new("debug,hyper_util=info,reqwest=info"));
    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .init();
    Some(guard)
}

/// Wires the configured runtime client into a gateway.
fn build_gateway(config: &Config) -> Result<AgentGateway, proto::ConfigError> {
    let runtime = RemoteAgentRuntime::new(config.runtime_url()?).with_token(&config.runtime.token);
    Ok(AgentGateway::new(config.agent_settings(), Arc::new(runtime)))
}

fn request_context(session_id: Option<String>) -> RequestContext {
    match session_id {
        Some(id) => RequestContext::new().with_session_id(id),
        None => RequestContext::new(),
    }
}

/// Reads a review payload file.
fn read_review_request(path: &Path) -> anyhow::Result<ReviewRequest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read PR payload '{}'", path.display()))?;
    let payload: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse PR payload '{}'", path.display()))?;
    Ok(ReviewRequest::from_value(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_serve_with_entrypoint() {
        let cli = Cli::try_parse_from(["agent-gateway", "serve", "--entrypoint", "review", "-p", "9000"])
            .expect("parse");
        match cli.command {
            Commands::Serve {
                entrypoint, port, ..
            } => {
                assert_eq!(entrypoint, Entrypoint::Review);
                assert_eq!(port, Some(9000));
            }
            _ => panic!("expected serve command"),
        }
    }

    #[test]
    fn cli_rejects_unknown_entrypoint() {
        assert!(Cli::try_parse_from(["agent-gateway", "serve", "--entrypoint", "chat"]).is_err());
    }

    #[test]
    fn cli_parses_invoke_with_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "agent-gateway",
            "invoke",
            "--prompt",
            "Hello, world",
            "--session-id",
            "local-test-session",
            "--debug",
        ])
        .expect("parse");
        assert!(cli.debug);
        match cli.command {
            Commands::Invoke { prompt, session_id } => {
                assert_eq!(prompt, "Hello, world");
                assert_eq!(session_id.as_deref(), Some("local-test-session"));
            }
            _ => panic!("expected invoke command"),
        }
    }

    #[test]
    fn request_context_carries_optional_session() {
        assert_eq!(request_context(None).session_id(), None);
        assert_eq!(
            request_context(Some("s1".to_string())).session_id(),
            Some("s1")
        );
    }

    #[test]
    fn build_gateway_requires_runtime_url() {
        let mut config = Config::default();
        assert!(matches!(
            build_gateway(&config),
            Err(proto::ConfigError::MissingField(_))
        ));

        config.runtime.url = "http://localhost:9000".to_string();
        config.agent.model_id = "model-x".to_string();
        let gateway = build_gateway(&config).expect("gateway");
        assert_eq!(gateway.settings().model_id.as_deref(), Some("model-x"));
    }

    #[test]
    fn read_review_request_parses_payload_file() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("pr.json");
        std::fs::write(
            &path,
            r#"{"pr_data": {"title": "Add user authentication endpoint", "author": "developer123",
                "files": [{"filename": "auth.py", "patch": "+import jwt"}]}}"#,
        )
        .expect("write");

        let request = read_review_request(&path).expect("parse");
        assert_eq!(
            request.pr_data.title.as_deref(),
            Some("Add user authentication endpoint")
        );
        assert_eq!(request.pr_data.files.len(), 1);
    }

    #[test]
    fn read_review_request_rejects_payload_without_pr_data() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("pr.json");
        std::fs::write(&path, r#"{"prompt": "hi"}"#).expect("write");

        let err = read_review_request(&path).expect_err("should fail");
        assert!(err.to_string().contains("pr_data"));
    }
}
