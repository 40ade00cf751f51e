use parley_format::FormatError;

/// Client-specific result type
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors from asking a provider
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Named provider is not configured or is disabled
    #[error("provider not found: {0}")]
    ProviderNotFound(String),

    /// Named application is not configured or is disabled
    #[error("application not found: {0}")]
    ApplicationNotFound(String),

    /// Every provider the application lists is disabled
    #[error("no providers are available for application: {0}")]
    NoProvidersForApplication(String),

    /// Provider configures an API format with no handler
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Question is empty or only whitespace
    #[error("question is empty")]
    EmptyQuestion,

    /// Question exceeds the configured length limit
    #[error("question is too long, maximum {max_length} characters allowed")]
    QuestionTooLong {
        /// Configured limit in characters
        max_length: usize,
    },

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("provider returned {status}: {body}")]
    Upstream {
        /// HTTP status code
        status: u16,
        /// Response body, truncated to a bounded length
        body: String,
    },

    /// Response body was not valid JSON
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Invalid client configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}
