use http::HeaderName;
use parley_format::{ApiFormat, FormatError};
use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Configuration for a single LLM provider
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Wire protocol name; absent or empty means `openai`
    #[serde(default)]
    pub api_format: Option<String>,
    /// Endpoint URL, optionally containing a `{model}` placeholder
    #[serde(default)]
    pub url: String,
    /// Model identifier
    #[serde(default)]
    pub model: String,
    /// API key for authentication
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Header carrying the raw API key instead of `Authorization: Bearer`
    #[serde(default)]
    pub auth_header: Option<String>,
    /// Whether the provider takes part in requests
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

const fn default_enabled() -> bool {
    true
}

impl ProviderConfig {
    /// Resolved wire protocol
    pub fn api_format(&self) -> Result<ApiFormat, FormatError> {
        ApiFormat::resolve(self.api_format.as_deref())
    }

    /// Names of required fields left empty
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.url.trim().is_empty() {
            missing.push("url");
        }
        if self.model.trim().is_empty() {
            missing.push("model");
        }
        missing
    }

    /// Check the provider is usable, reporting the first problem found
    ///
    /// # Errors
    ///
    /// Returns an error naming the provider when required fields are empty,
    /// the API format is unknown, the resolved URL is not absolute http(s),
    /// or `auth_header` is not a valid header name
    pub fn validate(&self, name: &str) -> anyhow::Result<()> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            anyhow::bail!("provider '{name}' is missing required fields: {}", missing.join(", "));
        }

        let format = self.api_format().map_err(|e| anyhow::anyhow!("provider '{name}': {e}"))?;

        let resolved = format.handler().build_url(&self.url, &self.model);
        let url = Url::parse(&resolved).map_err(|e| anyhow::anyhow!("provider '{name}' has an invalid url '{resolved}': {e}"))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("provider '{name}' url must use http or https, got '{}'", url.scheme());
        }

        if let Some(header) = &self.auth_header {
            HeaderName::try_from(header.as_str())
                .map_err(|e| anyhow::anyhow!("provider '{name}' has an invalid auth_header '{header}': {e}"))?;
        }

        Ok(())
    }
}
