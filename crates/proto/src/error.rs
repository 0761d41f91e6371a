use thiserror::Error;

/// Top-level error type
#[derive(Debug, Error)]
pub enum Error {
    /// Static configuration is missing or invalid.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// The agent runtime call failed.
    #[error("Invocation error: {0}")]
    Invocation(#[from] InvocationError),

    /// The inbound payload could not be used.
    #[error("Malformed request: {0}")]
    MalformedRequest(#[from] RequestError),

    /// Hosting server failure.
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required field was not provided.
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// A field has an invalid value and reason.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    /// Filesystem read error.
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error.
    #[error("TOML parse error: {0}")]
    Toml(String),
}

/// Agent runtime invocation errors
#[derive(Debug, Error)]
pub enum InvocationError {
    /// The request never reached the runtime or the connection dropped.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Runtime rejected the credentials.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Runtime gave up waiting on the model or sandbox.
    #[error("Runtime timed out: {0}")]
    Timeout(String),

    /// Runtime throttled the request.
    #[error("Rate limit exceeded")]
    RateLimit,

    /// Any other non-success response from the runtime.
    #[error("{0}")]
    Api(String),

    /// Runtime answered with a body that is not a result document.
    #[error("Invalid response from agent runtime: {0}")]
    InvalidResponse(String),

    /// Request body could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Malformed inbound payload errors
#[derive(Debug, Error)]
pub enum RequestError {
    /// A required key is absent.
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// The payload is present but has the wrong shape.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

/// Gateway hosting errors
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Listener could not be bound.
    #[error("Bind error: {0}")]
    Bind(String),

    /// Server loop terminated with an error.
    #[error("Serve error: {0}")]
    Serve(String),
}
