//! JokeAPI (v2.jokeapi.dev) joke source.
//!
//! One GET per joke, no auth, no retries. Error payloads come back as JSON with
//! `"error": true`, usually alongside a 4xx status.

use async_trait::async_trait;
use jester_core::{
    config::JokeApiConfig,
    error::JesterError,
    language::SupportedLanguage,
    traits::{Joke, JokeSource},
};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::Deserialize;
use std::time::Instant;
use tracing::{debug, warn};

/// JokeAPI client built once at startup and shared across requests.
pub struct JokeApiClient {
    client: reqwest::Client,
    base_url: String,
    category: String,
    blacklist_flags: Vec<String>,
    safe_mode: bool,
    timeout_secs: u64,
}

impl JokeApiClient {
    /// Create from config values.
    pub fn from_config(cfg: &JokeApiConfig) -> Result<Self, JesterError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .user_agent(cfg.user_agent.clone())
            .default_headers(headers)
            .timeout(cfg.timeout())
            .build()
            .map_err(|e| JesterError::Config(format!("failed to build jokeapi client: {e}")))?;

        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            category: cfg.category.clone(),
            blacklist_flags: cfg.blacklist_flags.clone(),
            safe_mode: cfg.safe_mode,
            timeout_secs: cfg.timeout_secs,
        })
    }

    /// Build the request URL for a single safe joke in `lang`.
    pub fn joke_url(&self, lang: SupportedLanguage) -> String {
        let mut url = format!(
            "{}/joke/{}?type=single",
            self.base_url,
            urlencoding::encode(&self.category)
        );
        if self.safe_mode {
            url.push_str("&safe-mode");
        }
        if !self.blacklist_flags.is_empty() {
            let flags: Vec<_> = self
                .blacklist_flags
                .iter()
                .map(|flag| urlencoding::encode(flag))
                .collect();
            url.push_str("&blacklistFlags=");
            url.push_str(&flags.join(","));
        }
        url.push_str("&lang=");
        url.push_str(&urlencoding::encode(lang.code()));
        url
    }

    fn transport_error(&self, e: reqwest::Error) -> JesterError {
        if e.is_timeout() {
            JesterError::Timeout(self.timeout_secs)
        } else {
            JesterError::Upstream(format!("jokeapi request failed: {e}"))
        }
    }
}

// --- Serde types ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JokeApiResponse {
    #[serde(default)]
    error: bool,
    joke: Option<String>,
    setup: Option<String>,
    delivery: Option<String>,
    id: Option<u64>,
    category: Option<String>,
    message: Option<String>,
    additional_info: Option<String>,
}

/// Turn a JokeAPI response body into a joke.
///
/// Two-part jokes are joined with a blank line, in case the upstream ignores
/// `type=single`.
pub fn parse_joke_response(body: &str, lang: SupportedLanguage) -> Result<Joke, JesterError> {
    let parsed: JokeApiResponse = serde_json::from_str(body)
        .map_err(|e| JesterError::MalformedResponse(format!("invalid JSON from jokeapi: {e}")))?;

    if parsed.error {
        let message = parsed
            .message
            .unwrap_or_else(|| "unknown error".to_string());
        return Err(match parsed.additional_info {
            Some(info) => JesterError::Upstream(format!("jokeapi: {message} ({info})")),
            None => JesterError::Upstream(format!("jokeapi: {message}")),
        });
    }

    let text = match (parsed.joke, parsed.setup, parsed.delivery) {
        (Some(joke), _, _) if !joke.trim().is_empty() => joke,
        (_, Some(setup), Some(delivery)) => format!("{setup}\n\n{delivery}"),
        _ => {
            return Err(JesterError::MalformedResponse(
                "jokeapi response has no joke".to_string(),
            ))
        }
    };

    Ok(Joke {
        text,
        lang,
        id: parsed.id,
        category: parsed.category,
    })
}

#[async_trait]
impl JokeSource for JokeApiClient {
    fn name(&self) -> &str {
        "jokeapi"
    }

    async fn fetch(&self, lang: SupportedLanguage) -> Result<Joke, JesterError> {
        let url = self.joke_url(lang);
        let start = Instant::now();
        debug!("jokeapi: GET {url}");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.transport_error(e))?;
        debug!(
            "jokeapi: {status} in {}ms ({} bytes)",
            start.elapsed().as_millis(),
            body.len()
        );

        match parse_joke_response(&body, lang) {
            Err(JesterError::MalformedResponse(reason)) if !status.is_success() => {
                warn!("jokeapi: {status} with unreadable body: {reason}");
                Err(JesterError::Upstream(format!("jokeapi returned {status}")))
            }
            other => other,
        }
    }
}
