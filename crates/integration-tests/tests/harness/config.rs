//! Programmatic configuration builder for integration tests

use parley_config::{ApplicationConfig, ClientConfig, Config, ProviderConfig};
use secrecy::SecretString;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default client settings and no providers
    pub fn new() -> Self {
        Self {
            config: Config {
                client: ClientConfig {
                    timeout: "5s".to_owned(),
                    ..ClientConfig::default()
                },
                ..Config::default()
            },
        }
    }

    /// Add an OpenAI-compatible provider using bearer auth
    pub fn with_openai_provider(self, name: &str, url: &str, model: &str) -> Self {
        self.with_provider(
            name,
            ProviderConfig {
                api_format: None,
                url: url.to_owned(),
                model: model.to_owned(),
                api_key: Some(SecretString::from("sk-test")),
                auth_header: None,
                enabled: true,
            },
        )
    }

    /// Add a Gemini provider sending its key in `x-goog-api-key`
    pub fn with_gemini_provider(self, name: &str, url: &str, model: &str) -> Self {
        self.with_provider(
            name,
            ProviderConfig {
                api_format: Some("gemini".to_owned()),
                url: url.to_owned(),
                model: model.to_owned(),
                api_key: Some(SecretString::from("g-test")),
                auth_header: Some("x-goog-api-key".to_owned()),
                enabled: true,
            },
        )
    }

    /// Add an arbitrary provider
    pub fn with_provider(mut self, name: &str, provider: ProviderConfig) -> Self {
        self.config.providers.insert(name.to_owned(), provider);
        self
    }

    /// Add an application asking the named providers
    pub fn with_application(mut self, name: &str, providers: &[&str]) -> Self {
        self.config.applications.insert(
            name.to_owned(),
            ApplicationConfig {
                providers: providers.iter().map(|p| (*p).to_owned()).collect(),
                enabled: true,
            },
        );
        self
    }

    /// Disable a previously added provider
    pub fn disable(mut self, name: &str) -> Self {
        if let Some(provider) = self.config.providers.get_mut(name) {
            provider.enabled = false;
        }
        self
    }

    /// Limit accepted question length
    pub fn with_max_question_length(mut self, max: usize) -> Self {
        self.config.client.max_question_length = max;
        self
    }

    /// Validate and return the configuration
    pub fn build(self) -> Config {
        self.config.validate().expect("test config must be valid");
        self.config
    }
}
