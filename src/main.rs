mod api;
mod dialogue;
mod extract;

use clap::{Parser, Subcommand};
use jester_core::{
    config::{self, Config},
    language::{self, SupportedLanguage},
    traits::JokeSource,
};
use jester_providers::jokeapi::JokeApiClient;
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::dialogue::Dialogue;

#[derive(Parser)]
#[command(
    name = "jester",
    version,
    about = "Jester: asks for a language, answers with a joke"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml", env = "JESTER_CONFIG")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the webhook server.
    Serve,
    /// Show the effective configuration and check the joke service.
    Status,
    /// Resolve a language hint the way the webhook would.
    Resolve {
        /// The hint to resolve (e.g. "pt_BR", "Deutsch").
        #[arg(trailing_var_arg = true)]
        hint: Vec<String>,
    },
    /// Fetch one joke and print it.
    Ask {
        /// Language code or name.
        lang: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg = config::load(&cli.config)?;
    cfg.apply_env_overrides()?;

    let _guard = init_tracing(&cfg);

    match cli.command {
        Commands::Serve => {
            let source = Arc::new(JokeApiClient::from_config(&cfg.jokeapi)?);
            let dialogue = Dialogue::new(source, cfg.dialogue.clone(), cfg.jokeapi.timeout());
            info!(
                "{} starting (config: {}, upstream: {})",
                cfg.jester.name, cli.config, cfg.jokeapi.base_url
            );
            api::serve(&cfg.server, Arc::new(dialogue)).await?;
        }
        Commands::Status => {
            println!("jester status\n");
            println!("Config: {}", cli.config);
            println!("Listen: {}", cfg.server.addr());
            println!("Upstream: {}", cfg.jokeapi.base_url);
            println!("Timeout: {}s", cfg.jokeapi.timeout_secs);
            println!("Unresolved policy: {:?}", cfg.dialogue.unresolved);
            println!(
                "Explicit hint shortcut: {}",
                if cfg.dialogue.explicit_hint_shortcut {
                    "on"
                } else {
                    "off"
                }
            );
            println!();

            let client = JokeApiClient::from_config(&cfg.jokeapi)?;
            match client.fetch(SupportedLanguage::English).await {
                Ok(_) => println!("  {}: available", client.name()),
                Err(e) => println!("  {}: unavailable ({e})", client.name()),
            }
        }
        Commands::Resolve { hint } => {
            let hint = hint.join(" ");
            match language::resolve(&hint) {
                Some(lang) => println!("{} ({})", lang.code(), lang.english_name()),
                None => anyhow::bail!("'{hint}' does not name a supported language ({})", codes()),
            }
        }
        Commands::Ask { lang } => {
            let Some(lang) = language::resolve(&lang) else {
                anyhow::bail!("'{lang}' does not name a supported language ({})", codes());
            };
            let client = JokeApiClient::from_config(&cfg.jokeapi)?;
            let joke = client.fetch(lang).await?;
            println!("{}", joke.text);
        }
    }

    Ok(())
}

fn codes() -> String {
    SupportedLanguage::ALL
        .iter()
        .map(|l| l.code())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Initialise logging. `RUST_LOG` wins over the configured level.
///
/// With `log_dir` set, logs go to `{log_dir}/jester.log`; keep the returned
/// guard alive or buffered lines are lost on exit.
fn init_tracing(cfg: &Config) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.jester.log_level));

    match cfg.jester.log_dir.as_deref().map(config::shellexpand) {
        Some(dir) => {
            if let Err(e) = std::fs::create_dir_all(&dir) {
                eprintln!("cannot create log dir {dir}: {e}; logging to stdout");
                tracing_subscriber::fmt().with_env_filter(env_filter).init();
                return None;
            }
            let file_appender = tracing_appender::rolling::never(&dir, "jester.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_ansi(false)
                .with_writer(non_blocking)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(env_filter).init();
            None
        }
    }
}
