//! Default value functions used by serde for config deserialization.

pub fn default_name() -> String {
    "jester".to_string()
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_true() -> bool {
    true
}

pub fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

pub fn default_server_port() -> u16 {
    3000
}

pub fn default_body_limit() -> usize {
    1024 * 1024
}

pub fn default_jokeapi_base_url() -> String {
    "https://v2.jokeapi.dev".to_string()
}

pub fn default_jokeapi_category() -> String {
    "Any".to_string()
}

pub fn default_blacklist_flags() -> Vec<String> {
    ["nsfw", "religious", "political", "racist", "sexist", "explicit"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

pub fn default_timeout_secs() -> u64 {
    8
}

pub fn default_user_agent() -> String {
    format!("jester/{} (webhook)", env!("CARGO_PKG_VERSION"))
}

pub fn default_user_text_limit() -> usize {
    80
}
