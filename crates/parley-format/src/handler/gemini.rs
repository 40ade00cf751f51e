//! Google Gemini `generateContent` format
//!
//! Gemini selects the model through the URL path
//! (`.../models/{model}:generateContent`), so the request body carries no
//! model field.

use std::sync::OnceLock;

use regex::{NoExpand, Regex};
use serde_json::{Value, json};

use super::{FormatHandler, first_of};
use crate::registry::ApiFormat;

/// Literal placeholder replaced by the model name
pub const MODEL_PLACEHOLDER: &str = "{model}";

/// Handler for the Gemini `generateContent` API
#[derive(Debug, Clone, Copy, Default)]
pub struct GeminiHandler;

/// Matches `/models/<name>` where the name ends at the next `/` or `:`
fn model_segment() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/models/[^/:]+").expect("must be valid regex"))
}

impl FormatHandler for GeminiHandler {
    fn format(&self) -> ApiFormat {
        ApiFormat::Gemini
    }

    /// Substitute the model into the configured endpoint
    ///
    /// A literal `{model}` placeholder wins. Otherwise the segment after
    /// `/models/` is replaced, whatever model it currently names. URLs with
    /// neither are returned unchanged.
    fn build_url(&self, url: &str, model: &str) -> String {
        if url.contains(MODEL_PLACEHOLDER) {
            return url.replace(MODEL_PLACEHOLDER, model);
        }

        if url.contains("/models/") {
            let replacement = format!("/models/{model}");
            return model_segment().replace_all(url, NoExpand(&replacement)).into_owned();
        }

        url.to_owned()
    }

    fn build_payload(&self, _model: &str, query: &str) -> Value {
        json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [{"text": query}],
                }
            ]
        })
    }

    fn parse_response(&self, envelope: &Value) -> Option<String> {
        let content = first_of(envelope, "candidates")?.get("content")?;

        first_of(content, "parts")?
            .get("text")?
            .as_str()
            .map(ToOwned::to_owned)
    }
}
