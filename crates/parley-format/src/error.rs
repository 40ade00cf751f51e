use thiserror::Error;

/// Errors raised while selecting a format handler
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Configured API format has no registered handler
    #[error("unknown API format '{format}', available formats: {available}")]
    UnknownFormat {
        /// The identifier as it was configured
        format: String,
        /// Comma-separated list of registered identifiers
        available: String,
    },
}
