mod defaults;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::error::JesterError;
use defaults::*;

/// Top-level Jester configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub jester: JesterConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub jokeapi: JokeApiConfig,
    #[serde(default)]
    pub dialogue: DialogueConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JesterConfig {
    #[serde(default = "default_name")]
    pub name: String,
    /// Used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Write logs to `{log_dir}/jester.log` instead of stdout.
    #[serde(default)]
    pub log_dir: Option<String>,
}

impl Default for JesterConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Maximum accepted request body, in bytes.
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// JokeAPI upstream configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JokeApiConfig {
    #[serde(default = "default_jokeapi_base_url")]
    pub base_url: String,
    /// Joke category path segment (`Any`, `Programming`, `Pun`, ...).
    #[serde(default = "default_jokeapi_category")]
    pub category: String,
    #[serde(default = "default_blacklist_flags")]
    pub blacklist_flags: Vec<String>,
    #[serde(default = "default_true")]
    pub safe_mode: bool,
    /// Ceiling for one upstream call. No retries follow a timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for JokeApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_jokeapi_base_url(),
            category: default_jokeapi_category(),
            blacklist_flags: default_blacklist_flags(),
            safe_mode: true,
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl JokeApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// What an awaiting dialogue does with an answer that names no language.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedPolicy {
    /// Stay awaiting and ask again, quoting the rejected answer.
    #[default]
    Reprompt,
    /// Serve an English joke without saying so.
    DefaultEnglish,
}

/// Dialogue behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueConfig {
    #[serde(default)]
    pub unresolved: UnresolvedPolicy,
    /// Let an explicit `lang` field skip the prompt on an idle turn.
    #[serde(default)]
    pub explicit_hint_shortcut: bool,
    /// Characters of the utterance echoed back as `user_text`.
    #[serde(default = "default_user_text_limit")]
    pub user_text_limit: usize,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            unresolved: UnresolvedPolicy::default(),
            explicit_hint_shortcut: false,
            user_text_limit: default_user_text_limit(),
        }
    }
}

impl Config {
    /// Apply environment overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), JesterError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `PORT`, `JESTER_HOST` and `JOKEAPI_BASE_URL` from `lookup`.
    ///
    /// Blank values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), JesterError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(port) = get("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|e| JesterError::Config(format!("invalid PORT '{port}': {e}")))?;
        }
        if let Some(host) = get("JESTER_HOST") {
            self.server.host = host.trim().to_string();
        }
        if let Some(url) = get("JOKEAPI_BASE_URL") {
            self.jokeapi.base_url = url.trim().trim_end_matches('/').to_string();
        }
        Ok(())
    }
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, JesterError> {
    let path = Path::new(path);
    if !path.exists() {
        info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| JesterError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| JesterError::Config(format!("failed to parse config: {}", e)))?;

    Ok(config)
}
