use std::fmt;

/// Resource families served by the API, for error messages and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Project,
    Module,
    Phase,
    Dashboard,
}

impl Resource {
    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Project => "project",
            Resource::Module => "module",
            Resource::Phase => "phase",
            Resource::Dashboard => "dashboard",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from the gateway layer.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The request never produced a response (unreachable host, DNS, TLS,
    /// timeout).
    #[error("Request failed: {0}")]
    Transport(String),

    /// The API answered with a non-2xx status.
    #[error("Error: {status} {status_text}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Canonical reason phrase, e.g. `Not Found`.
        status_text: String,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response body did not have the expected structure.
    #[error("Unexpected {resource} response: {message}")]
    ShapeMismatch { resource: Resource, message: String },
}

/// Convenience alias for gateway return values.
pub type GatewayResult<T> = Result<T, GatewayError>;

impl GatewayError {
    pub fn shape(resource: Resource, message: impl Into<String>) -> Self {
        GatewayError::ShapeMismatch {
            resource,
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, GatewayError::Http { status: 404, .. })
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::Transport(format!("request timed out: {err}"))
        } else {
            GatewayError::Transport(err.to_string())
        }
    }
}
