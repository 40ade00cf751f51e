use std::time::Duration;

use serde::Deserialize;

/// Default request timeout
pub const DEFAULT_TIMEOUT: &str = "30s";

/// Default cap on question length, in characters
pub const DEFAULT_MAX_QUESTION_LENGTH: usize = 4000;

/// HTTP client settings
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Request timeout (e.g. "30s", "2m")
    #[serde(default = "default_timeout")]
    pub timeout: String,
    /// Verify provider TLS certificates
    #[serde(default = "default_true")]
    pub verify_tls: bool,
    /// Longest question accepted, in characters
    #[serde(default = "default_max_question_length")]
    pub max_question_length: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            verify_tls: true,
            max_question_length: DEFAULT_MAX_QUESTION_LENGTH,
        }
    }
}

impl ClientConfig {
    /// Parsed request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if `timeout` is not a valid duration string
    pub fn timeout(&self) -> anyhow::Result<Duration> {
        duration_str::parse(&self.timeout).map_err(|e| anyhow::anyhow!("invalid client timeout '{}': {e}", self.timeout))
    }
}

fn default_timeout() -> String {
    DEFAULT_TIMEOUT.to_owned()
}

const fn default_true() -> bool {
    true
}

const fn default_max_question_length() -> usize {
    DEFAULT_MAX_QUESTION_LENGTH
}
