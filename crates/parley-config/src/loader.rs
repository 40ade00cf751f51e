use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse and validate configuration text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, TOML parsing, or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if no provider is configured, a provider or
    /// application is misconfigured, or client settings are invalid
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.providers.is_empty() {
            anyhow::bail!("at least one provider must be configured");
        }

        for (name, provider) in &self.providers {
            provider.validate(name)?;
        }

        if self.enabled_providers().next().is_none() {
            tracing::warn!("all configured providers are disabled");
        }

        for (name, app) in &self.applications {
            app.validate(name, &self.providers)?;

            if app.enabled && app.enabled_providers(&self.providers).next().is_none() {
                tracing::warn!(application = %name, "application has no enabled providers");
            }
        }

        self.client.timeout()?;

        if self.client.max_question_length == 0 {
            anyhow::bail!("client.max_question_length must be greater than zero");
        }

        Ok(())
    }
}
