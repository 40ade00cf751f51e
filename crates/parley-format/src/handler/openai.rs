//! `OpenAI` chat completions format
//!
//! Also covers the many third-party APIs that accept the same
//! `/chat/completions` body (Mistral, gateways fronting Anthropic, local
//! servers).

use serde_json::{Value, json};

use super::{FormatHandler, first_of};
use crate::registry::ApiFormat;

/// Sampling temperature sent with every request
pub const TEMPERATURE: f64 = 0.7;

/// Completion token cap sent with every request
pub const MAX_TOKENS: u32 = 2000;

/// Handler for OpenAI-compatible chat completion APIs
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAiHandler;

impl FormatHandler for OpenAiHandler {
    fn format(&self) -> ApiFormat {
        ApiFormat::OpenAi
    }

    // The model is selected by the body, so the endpoint is used verbatim
    fn build_url(&self, url: &str, _model: &str) -> String {
        url.to_owned()
    }

    fn build_payload(&self, model: &str, query: &str) -> Value {
        json!({
            "model": model,
            "messages": [
                {"role": "user", "content": query}
            ],
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS,
        })
    }

    fn parse_response(&self, envelope: &Value) -> Option<String> {
        first_of(envelope, "choices")?
            .get("message")?
            .get("content")?
            .as_str()
            .map(ToOwned::to_owned)
    }
}
