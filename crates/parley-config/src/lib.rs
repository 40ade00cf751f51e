//! Configuration for Parley
//!
//! Loaded from a TOML file whose values may reference environment variables
//! with `{{ env.VAR }}` placeholders.

#![allow(clippy::must_use_candidate)]

pub mod application;
pub mod client;
mod env;
mod loader;
pub mod provider;

use indexmap::IndexMap;
use serde::Deserialize;

pub use application::ApplicationConfig;
pub use client::ClientConfig;
pub use env::ExpandError;
pub use provider::ProviderConfig;

/// Top-level Parley configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP client settings shared by all providers
    #[serde(default)]
    pub client: ClientConfig,
    /// Provider configurations keyed by name, in file order
    #[serde(default)]
    pub providers: IndexMap<String, ProviderConfig>,
    /// Calling applications keyed by name, in file order
    #[serde(default)]
    pub applications: IndexMap<String, ApplicationConfig>,
}

impl Config {
    /// Providers with `enabled = true`, in file order
    pub fn enabled_providers(&self) -> impl Iterator<Item = (&str, &ProviderConfig)> {
        self.providers
            .iter()
            .filter(|(_, provider)| provider.enabled)
            .map(|(name, provider)| (name.as_str(), provider))
    }

    /// Applications with `enabled = true`, in file order
    pub fn enabled_applications(&self) -> impl Iterator<Item = (&str, &ApplicationConfig)> {
        self.applications
            .iter()
            .filter(|(_, app)| app.enabled)
            .map(|(name, app)| (name.as_str(), app))
    }
}
