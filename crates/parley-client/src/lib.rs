#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! HTTP transport for Parley
//!
//! Resolves a format handler for every configured provider, sends questions
//! with `reqwest`, and normalizes each provider's response into an [`Answer`].

mod client;
pub mod error;
pub mod stats;
pub mod tokens;

pub use client::{Answer, ParleyClient};
pub use error::{ClientError, Result};
pub use stats::CallStats;
pub use tokens::count_prompt_tokens;
