use indexmap::IndexMap;
use serde::Deserialize;

use crate::ProviderConfig;

/// A calling application and the providers it may ask
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplicationConfig {
    /// Provider names, in the order answers are reported
    #[serde(default)]
    pub providers: Vec<String>,
    /// Whether the application can send questions
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

const fn default_enabled() -> bool {
    true
}

impl ApplicationConfig {
    /// Listed providers that are also enabled, in listed order
    pub fn enabled_providers<'a>(
        &'a self,
        providers: &'a IndexMap<String, ProviderConfig>,
    ) -> impl Iterator<Item = &'a str> {
        self.providers
            .iter()
            .filter(|name| providers.get(name.as_str()).is_some_and(|p| p.enabled))
            .map(String::as_str)
    }

    /// Check every listed provider is configured, listed once
    ///
    /// # Errors
    ///
    /// Returns an error naming the application when its provider list is
    /// empty, names an unknown provider, or repeats a provider
    pub fn validate(&self, name: &str, providers: &IndexMap<String, ProviderConfig>) -> anyhow::Result<()> {
        if self.providers.is_empty() {
            anyhow::bail!("application '{name}' must list at least one provider");
        }

        for (i, provider) in self.providers.iter().enumerate() {
            if !providers.contains_key(provider) {
                anyhow::bail!("application '{name}' references unknown provider '{provider}'");
            }
            if self.providers[..i].contains(provider) {
                anyhow::bail!("application '{name}' lists provider '{provider}' more than once");
            }
        }

        Ok(())
    }
}
