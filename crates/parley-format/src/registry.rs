//! Resolution of configured API format names to handlers

use std::str::FromStr;

use strum::{Display, EnumString, VariantArray};

use crate::error::FormatError;
use crate::handler::FormatHandler;
use crate::handler::gemini::GeminiHandler;
use crate::handler::openai::OpenAiHandler;

/// Format assumed when a provider does not configure one
pub const DEFAULT_FORMAT: ApiFormat = ApiFormat::OpenAi;

/// Supported provider wire protocols
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, VariantArray)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ApiFormat {
    /// `OpenAI` chat completions and compatible APIs
    OpenAi,
    /// Google Gemini `generateContent`
    Gemini,
}

impl ApiFormat {
    /// Every registered format, in registration order
    pub const ALL: &'static [Self] = Self::VARIANTS;

    /// Canonical lowercase identifier
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
        }
    }

    /// The handler implementing this format
    pub fn handler(self) -> &'static dyn FormatHandler {
        match self {
            Self::OpenAi => &OpenAiHandler,
            Self::Gemini => &GeminiHandler,
        }
    }

    /// Parse a configured identifier, applying the default for absent or empty input
    ///
    /// Matching is case-insensitive. Surrounding whitespace is not trimmed.
    pub fn resolve(format: Option<&str>) -> Result<Self, FormatError> {
        match format {
            None | Some("") => Ok(DEFAULT_FORMAT),
            Some(name) => Self::from_str(name).map_err(|_| FormatError::UnknownFormat {
                format: name.to_owned(),
                available: available_formats(),
            }),
        }
    }
}

/// Comma-separated list of registered format identifiers
pub fn available_formats() -> String {
    ApiFormat::ALL
        .iter()
        .map(|format| format.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Look up the handler for a configured API format
///
/// Absent or empty input selects `openai`.
pub fn resolve_handler(format: Option<&str>) -> Result<&'static dyn FormatHandler, FormatError> {
    ApiFormat::resolve(format).map(ApiFormat::handler)
}
