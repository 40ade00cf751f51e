use std::fmt;

use parley_config::Config;
use parley_format::{ApiFormat, FormatHandler, resolve_handler};
use reqwest::header::HeaderName;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use crate::error::{ClientError, Result};
use crate::stats::{CallStats, StatsTable};
use crate::tokens::count_prompt_tokens;

/// Longest upstream error body kept in [`ClientError::Upstream`], in characters
const MAX_ERROR_BODY_CHARS: usize = 2048;

/// Normalized answer from one provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    /// Configured provider name
    pub provider: String,
    /// Wire protocol used for the call
    pub format: ApiFormat,
    /// Extracted answer, `None` when the response had no recognizable answer
    pub text: Option<String>,
    /// Tokens in the question as sent
    pub prompt_tokens: usize,
}

/// An enabled provider with its handler resolved
struct ProviderHandle {
    name: String,
    handler: &'static dyn FormatHandler,
    url: String,
    model: String,
    api_key: Option<SecretString>,
    auth_header: Option<HeaderName>,
}

impl fmt::Debug for ProviderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderHandle")
            .field("name", &self.name)
            .field("format", &self.handler.format())
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

/// An enabled application and its enabled providers
#[derive(Debug)]
struct ApplicationHandle {
    name: String,
    providers: Vec<String>,
}

/// Asks configured LLM providers a question and normalizes their answers
#[derive(Debug)]
pub struct ParleyClient {
    http: reqwest::Client,
    providers: Vec<ProviderHandle>,
    applications: Vec<ApplicationHandle>,
    max_question_length: usize,
    stats: StatsTable,
}

impl ParleyClient {
    /// Build a client for every enabled provider and application in the
    /// configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a provider's API format is unknown, its auth
    /// header name is invalid, or the HTTP client cannot be built
    pub fn new(config: &Config) -> Result<Self> {
        let timeout = config
            .client
            .timeout()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        if !config.client.verify_tls {
            tracing::warn!("TLS certificate verification is disabled, connections are not secure");
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(!config.client.verify_tls)
            .build()?;

        let providers = config
            .enabled_providers()
            .map(|(name, provider)| -> Result<ProviderHandle> {
                let handler = resolve_handler(provider.api_format.as_deref())?;

                let auth_header = provider
                    .auth_header
                    .as_deref()
                    .map(|header| {
                        HeaderName::try_from(header)
                            .map_err(|e| ClientError::Config(format!("provider '{name}' auth_header: {e}")))
                    })
                    .transpose()?;

                // `{{ env.KEY | default("") }}` leaves an empty key behind
                let api_key = provider
                    .api_key
                    .clone()
                    .filter(|key| !key.expose_secret().is_empty());

                tracing::debug!(provider = %name, format = %handler.format(), model = %provider.model, "provider ready");

                Ok(ProviderHandle {
                    name: name.to_owned(),
                    handler,
                    url: provider.url.clone(),
                    model: provider.model.clone(),
                    api_key,
                    auth_header,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let applications = config
            .enabled_applications()
            .map(|(name, app)| ApplicationHandle {
                name: name.to_owned(),
                providers: app
                    .enabled_providers(&config.providers)
                    .map(ToOwned::to_owned)
                    .collect(),
            })
            .collect();

        Ok(Self {
            http,
            providers,
            applications,
            max_question_length: config.client.max_question_length,
            stats: StatsTable::default(),
        })
    }

    /// Enabled provider names, in configuration order
    pub fn providers(&self) -> impl Iterator<Item = &str> {
        self.providers.iter().map(|p| p.name.as_str())
    }

    /// Enabled application names, in configuration order
    pub fn applications(&self) -> impl Iterator<Item = &str> {
        self.applications.iter().map(|a| a.name.as_str())
    }

    /// Reject empty questions and questions over the length limit
    pub fn validate_question(&self, question: &str) -> Result<()> {
        if question.trim().is_empty() {
            return Err(ClientError::EmptyQuestion);
        }

        if question.chars().count() > self.max_question_length {
            return Err(ClientError::QuestionTooLong {
                max_length: self.max_question_length,
            });
        }

        Ok(())
    }

    /// Ask one provider a question
    ///
    /// A response without a recognizable answer is not an error: the
    /// returned [`Answer::text`] is `None`. Once a request has been
    /// attempted, the outcome is counted in [`ParleyClient::stats`].
    pub async fn ask(&self, provider: &str, question: &str) -> Result<Answer> {
        self.ask_as(None, provider, question).await
    }

    /// Ask several providers the same question concurrently
    ///
    /// Results are returned in the order the providers were given.
    pub async fn ask_many<'a, I>(&self, providers: I, question: &str) -> Vec<(String, Result<Answer>)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.fan_out(None, providers, question).await
    }

    /// Ask every enabled provider the same question concurrently
    pub async fn ask_all(&self, question: &str) -> Vec<(String, Result<Answer>)> {
        self.ask_many(self.providers(), question).await
    }

    /// Ask every enabled provider of an application, on its behalf
    ///
    /// Outcomes are counted per application in [`ParleyClient::app_stats`]
    /// as well as in the provider totals.
    ///
    /// # Errors
    ///
    /// Returns an error if the question is invalid, the application is
    /// unknown or disabled, or none of its providers is enabled
    pub async fn ask_app(&self, app: &str, question: &str) -> Result<Vec<(String, Result<Answer>)>> {
        self.validate_question(question)?;

        let handle = self
            .applications
            .iter()
            .find(|a| a.name == app)
            .ok_or_else(|| ClientError::ApplicationNotFound(app.to_owned()))?;

        if handle.providers.is_empty() {
            return Err(ClientError::NoProvidersForApplication(app.to_owned()));
        }

        tracing::debug!(application = %app, providers = handle.providers.len(), "asking application providers");

        Ok(self
            .fan_out(Some(handle.name.as_str()), handle.providers.iter().map(String::as_str), question)
            .await)
    }

    /// Outcome counters for one provider, over every caller
    pub fn stats(&self, provider: &str) -> CallStats {
        self.stats.provider_total(provider)
    }

    /// Outcome counters for every enabled provider, in configuration order
    pub fn all_stats(&self) -> Vec<(String, CallStats)> {
        self.providers
            .iter()
            .map(|p| (p.name.clone(), self.stats.provider_total(&p.name)))
            .collect()
    }

    /// Outcome counters for one provider as called by one application
    pub fn app_stats(&self, app: &str, provider: &str) -> CallStats {
        self.stats.get(Some(app), provider)
    }

    /// `(application, provider, counters)` for every enabled application's
    /// enabled providers, in configuration order
    pub fn all_app_stats(&self) -> Vec<(String, String, CallStats)> {
        self.applications
            .iter()
            .flat_map(|app| {
                app.providers.iter().map(|provider| {
                    (
                        app.name.clone(),
                        provider.clone(),
                        self.stats.get(Some(app.name.as_str()), provider),
                    )
                })
            })
            .collect()
    }

    async fn fan_out<'a, I>(&self, app: Option<&str>, providers: I, question: &str) -> Vec<(String, Result<Answer>)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let calls = providers.into_iter().map(|name| async move {
            let result = self.ask_as(app, name, question).await;
            (name.to_owned(), result)
        });

        futures::future::join_all(calls).await
    }

    async fn ask_as(&self, app: Option<&str>, provider: &str, question: &str) -> Result<Answer> {
        self.validate_question(question)?;

        let handle = self
            .providers
            .iter()
            .find(|p| p.name == provider)
            .ok_or_else(|| ClientError::ProviderNotFound(provider.to_owned()))?;

        let result = self.send(handle, question).await;

        let answered = matches!(&result, Ok(Answer { text: Some(_), .. }));
        self.stats.record(app, &handle.name, answered);

        result
    }

    async fn send(&self, handle: &ProviderHandle, question: &str) -> Result<Answer> {
        let format = handle.handler.format();
        let spec = handle.handler.request_spec(&handle.url, &handle.model, question);
        let prompt_tokens = count_prompt_tokens(question);

        tracing::debug!(provider = %handle.name, format = %format, prompt_tokens, "sending question");

        let mut builder = self.http.post(&spec.url).json(&spec.payload);

        builder = match (&handle.api_key, &handle.auth_header) {
            (Some(key), Some(header)) => builder.header(header.clone(), key.expose_secret()),
            (Some(key), None) => builder.bearer_auth(key.expose_secret()),
            (None, _) => builder,
        };

        let response = builder.send().await.map_err(|e| {
            tracing::error!(provider = %handle.name, error = %e, "upstream request failed");
            ClientError::Http(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => truncate_body(body),
                Err(e) => {
                    tracing::debug!(provider = %handle.name, error = %e, "failed to read error body");
                    String::new()
                }
            };
            tracing::warn!(provider = %handle.name, status = %status, "upstream returned error");
            return Err(ClientError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let envelope: Value = serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!(provider = %handle.name, error = %e, "response is not valid JSON");
            ClientError::Decode(e.to_string())
        })?;

        let text = handle.handler.parse_response(&envelope);
        if text.is_none() {
            tracing::debug!(provider = %handle.name, format = %format, "no answer found in response");
        }

        Ok(Answer {
            provider: handle.name.clone(),
            format,
            text,
            prompt_tokens,
        })
    }
}

/// Keep at most [`MAX_ERROR_BODY_CHARS`] characters of an error body
fn truncate_body(mut body: String) -> String {
    if let Some((end, _)) = body.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        body.truncate(end);
        body.push_str("...");
    }
    body
}
