use thiserror::Error;

/// Errors that can occur when interacting with the Text Analytics API.
#[derive(Error, Debug)]
pub enum TextAnalyticsError {
    /// The requested API version is not one this SDK ships.
    #[error("API version {0} is not available")]
    UnsupportedVersion(String),

    /// The bound API version does not offer the requested operation.
    #[error("operation `{operation}` is not available in API version {api_version}")]
    UnsupportedOperation {
        operation: &'static str,
        api_version: String,
    },

    /// An operation was invoked on a client that is not active.
    #[error("cannot call `{operation}` on a {state} client")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    /// The request failed due to an HTTP error.
    #[error("HTTP error: {status} - {message}")]
    Http { status: u16, message: String },

    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The request payload could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The HTTP request failed at the transport level.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint URL is invalid.
    #[error("Invalid endpoint URL: {message}")]
    InvalidEndpoint {
        message: String,
        #[source]
        source: Option<url::ParseError>,
    },

    /// A required configuration value is missing.
    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    /// The API returned an error response.
    #[error("API error ({code}): {message}")]
    Api { code: String, message: String },

    /// A request builder was given invalid input.
    #[error("Invalid request: {0}")]
    Builder(String),
}

impl TextAnalyticsError {
    /// Create an [`Http`](Self::Http) error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Create an [`InvalidEndpoint`](Self::InvalidEndpoint) error without an underlying cause.
    pub fn invalid_endpoint(message: impl Into<String>) -> Self {
        Self::InvalidEndpoint {
            message: message.into(),
            source: None,
        }
    }

    /// Create an [`InvalidEndpoint`](Self::InvalidEndpoint) error wrapping a URL parse failure.
    pub fn invalid_endpoint_with_source(message: impl Into<String>, source: url::ParseError) -> Self {
        Self::InvalidEndpoint {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Returns `true` if retrying the same call could succeed.
    ///
    /// Version and state errors are deterministic and never retriable.
    pub fn is_retriable(&self) -> bool {
        match self {
            Self::Http { status, .. } => crate::pipeline::is_retriable_status(*status),
            Self::Request(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}

/// Result type alias for Text Analytics operations.
pub type TextAnalyticsResult<T> = std::result::Result<T, TextAnalyticsError>;
