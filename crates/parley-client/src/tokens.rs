//! Prompt token estimation

use std::sync::LazyLock;

use tiktoken_rs::{CoreBPE, o200k_base};

static ENCODING: LazyLock<Option<CoreBPE>> = LazyLock::new(|| o200k_base().ok());

/// Number of tokens in `text` under the `o200k_base` encoding
///
/// Falls back to one token per four bytes if the encoding cannot be loaded.
pub fn count_prompt_tokens(text: &str) -> usize {
    ENCODING
        .as_ref()
        .map_or_else(|| text.len() / 4, |bpe| bpe.encode_with_special_tokens(text).len())
}
