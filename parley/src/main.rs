#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;
mod logging;

use args::Args;
use clap::Parser;
use parley_client::{Answer, ClientError, ParleyClient, count_prompt_tokens};
use parley_config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logging::init(&args.log_filter);

    let config = Config::load(&args.config)?;

    tracing::info!(
        config_path = %args.config.display(),
        providers = config.enabled_providers().count(),
        applications = config.enabled_applications().count(),
        "starting parley"
    );

    let client = ParleyClient::new(&config)?;

    if !run(&client, &args).await? {
        anyhow::bail!("every provider call failed");
    }

    Ok(())
}

/// Ask the selected providers, print their answers and counters
///
/// Returns `false` when at least one call was made and none produced an
/// answer.
async fn run(client: &ParleyClient, args: &Args) -> anyhow::Result<bool> {
    client.validate_question(&args.question)?;

    println!("prompt tokens: {}", count_prompt_tokens(&args.question));

    let results = if let Some(app) = &args.app {
        client.ask_app(app, &args.question).await?
    } else if args.providers.is_empty() {
        client.ask_all(&args.question).await
    } else {
        client
            .ask_many(args.providers.iter().map(String::as_str), &args.question)
            .await
    };

    for (provider, result) in &results {
        println!("{}", render(provider, result));
    }

    println!();
    for (provider, stats) in client.all_stats() {
        if stats.total() > 0 {
            println!("{provider}: {} succeeded, {} failed", stats.success, stats.failure);
        }
    }
    for (app, provider, stats) in client.all_app_stats() {
        if stats.total() > 0 {
            println!("{app} -> {provider}: {} succeeded, {} failed", stats.success, stats.failure);
        }
    }

    Ok(!every_call_failed(&results))
}

/// One output line for a provider's result
fn render(provider: &str, result: &Result<Answer, ClientError>) -> String {
    match result {
        Ok(Answer { text: Some(text), .. }) => format!("[{provider}] {text}"),
        Ok(Answer { text: None, .. }) => format!("[{provider}] no answer found"),
        Err(e) => format!("[{provider}] error: {e}"),
    }
}

/// Whether calls were made and none of them produced an answer
fn every_call_failed(results: &[(String, Result<Answer, ClientError>)]) -> bool {
    !results.is_empty()
        && results
            .iter()
            .all(|(_, result)| !matches!(result, Ok(Answer { text: Some(_), .. })))
}
