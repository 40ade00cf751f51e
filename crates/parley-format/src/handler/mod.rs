//! Format handler trait and the outbound request description

pub mod gemini;
pub mod openai;

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::registry::ApiFormat;

/// URL and JSON body ready to hand to an HTTP client
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestSpec {
    /// Fully resolved endpoint URL
    pub url: String,
    /// JSON request body
    pub payload: Value,
}

/// Strategy for one provider wire protocol
///
/// Implementations hold no state. Every method is total: malformed provider
/// responses produce `None` from [`FormatHandler::parse_response`] rather than
/// an error.
pub trait FormatHandler: fmt::Debug + Send + Sync {
    /// Format this handler implements
    fn format(&self) -> ApiFormat;

    /// Derive the request URL from the configured endpoint and model
    fn build_url(&self, url: &str, model: &str) -> String;

    /// Build the JSON request body for a single user question
    fn build_payload(&self, model: &str, query: &str) -> Value;

    /// Extract the answer text from a decoded response body
    fn parse_response(&self, envelope: &Value) -> Option<String>;

    /// Build both URL and payload in one step
    fn request_spec(&self, url: &str, model: &str, query: &str) -> RequestSpec {
        RequestSpec {
            url: self.build_url(url, model),
            payload: self.build_payload(model, query),
        }
    }
}

/// First element of the array stored under `key`, if any
pub(crate) fn first_of<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key)?.as_array()?.first()
}
