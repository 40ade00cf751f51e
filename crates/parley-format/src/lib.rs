//! API format adapters for Parley
//!
//! Maps a provider's configured API format (`openai`, `gemini`) to a
//! stateless handler that builds the request URL and payload for that wire
//! shape, and pulls the answer text back out of the provider's response.
//! Nothing in this crate performs I/O.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod error;
pub mod handler;
pub mod registry;

pub use error::FormatError;
pub use handler::gemini::GeminiHandler;
pub use handler::openai::OpenAiHandler;
pub use handler::{FormatHandler, RequestSpec};
pub use registry::{ApiFormat, DEFAULT_FORMAT, available_formats, resolve_handler};
