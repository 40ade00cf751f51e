use std::sync::OnceLock;

use regex::{Captures, Regex};
use thiserror::Error;

/// Failure to expand a `{{ ... }}` placeholder
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpandError {
    /// Referenced variable is unset and no default was given
    #[error("environment variable not found: `{0}`")]
    MissingVar(String),

    /// Placeholder is not of the form `env.NAME`
    #[error("only variables scoped with 'env.' are supported: `{0}`")]
    UnsupportedScope(String),
}

/// `{{ env.VAR }}` or `{{ env.VAR | default("fallback") }}`
fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*(?P<key>[a-zA-Z0-9_.]+)\s*(?:\|\s*default\("(?P<default>[^"]*)"\))?\s*\}\}"#)
            .expect("must be valid regex")
    })
}

/// Expand environment placeholders in raw config text
///
/// Lines whose first non-blank character is `#` are left untouched so that
/// commented-out entries never require their variables to be set.
pub fn expand_env(input: &str) -> Result<String, ExpandError> {
    let mut output = String::with_capacity(input.len());

    for (i, line) in input.split('\n').enumerate() {
        if i > 0 {
            output.push('\n');
        }

        if line.trim_start().starts_with('#') {
            output.push_str(line);
        } else {
            expand_line(line, &mut output)?;
        }
    }

    Ok(output)
}

fn expand_line(line: &str, output: &mut String) -> Result<(), ExpandError> {
    let mut last_end = 0;

    for captures in placeholder().captures_iter(line) {
        let Some(whole) = captures.get(0) else { continue };

        output.push_str(&line[last_end..whole.start()]);
        output.push_str(&resolve(&captures)?);
        last_end = whole.end();
    }

    output.push_str(&line[last_end..]);
    Ok(())
}

fn resolve(captures: &Captures<'_>) -> Result<String, ExpandError> {
    let key = captures.name("key").map_or("", |m| m.as_str());
    let default = captures.name("default").map(|m| m.as_str());

    let var_name = match key.split_once('.') {
        Some(("env", name)) if !name.is_empty() && !name.contains('.') => name,
        _ => return Err(ExpandError::UnsupportedScope(key.to_owned())),
    };

    match (std::env::var(var_name), default) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(default)) => Ok(default.to_owned()),
        (Err(_), None) => Err(ExpandError::MissingVar(var_name.to_owned())),
    }
}
