use std::path::PathBuf;

use clap::Parser;

/// Question asked when none is given on the command line
pub const DEFAULT_QUESTION: &str = "Who are you?";

/// Parley
#[derive(Debug, Parser)]
#[command(name = "parley", about = "Ask one question to many LLM providers")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "parley.toml", env = "PARLEY_CONFIG")]
    pub config: PathBuf,

    /// Provider to ask (repeatable); defaults to every enabled provider
    #[arg(short, long = "provider", value_name = "NAME")]
    pub providers: Vec<String>,

    /// Ask on behalf of this application, using its configured providers
    #[arg(short, long, value_name = "NAME", conflicts_with = "providers")]
    pub app: Option<String>,

    /// Log filter directive, overridden by `RUST_LOG` when set
    #[arg(long, default_value = "info", env = "PARLEY_LOG")]
    pub log_filter: String,

    /// Question to send
    #[arg(default_value = DEFAULT_QUESTION)]
    pub question: String,
}
