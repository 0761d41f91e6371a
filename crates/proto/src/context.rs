/// Per-request context handed over by the hosting transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    session_id: Option<String>,
    request_id: Option<String>,
}

impl RequestContext {
    /// Creates an empty context (no session, no request id).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the transport-provided session id.
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Sets the request id used for log correlation.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Declared session id, exactly as the transport supplied it.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }
}
