use super::*;
use std::collections::HashMap;

#[test]
fn test_defaults() {
    let cfg = Config::default();
    assert_eq!(cfg.server.port, 3000);
    assert_eq!(cfg.server.host, "0.0.0.0");
    assert_eq!(cfg.server.addr(), "0.0.0.0:3000");
    assert_eq!(cfg.jokeapi.base_url, "https://v2.jokeapi.dev");
    assert_eq!(cfg.jokeapi.category, "Any");
    assert_eq!(cfg.jokeapi.timeout_secs, 8);
    assert_eq!(cfg.jokeapi.timeout(), Duration::from_secs(8));
    assert!(cfg.jokeapi.safe_mode);
    assert_eq!(
        cfg.jokeapi.blacklist_flags,
        ["nsfw", "religious", "political", "racist", "sexist", "explicit"]
    );
    assert_eq!(cfg.dialogue.unresolved, UnresolvedPolicy::Reprompt);
    assert!(!cfg.dialogue.explicit_hint_shortcut);
    assert_eq!(cfg.dialogue.user_text_limit, 80);
    assert_eq!(cfg.jester.log_level, "info");
    assert!(cfg.jester.log_dir.is_none());
}

#[test]
fn test_empty_toml_uses_defaults() {
    let cfg: Config = toml::from_str("").unwrap();
    assert_eq!(cfg.server.port, 3000);
    assert_eq!(cfg.jokeapi.timeout_secs, 8);
}

#[test]
fn test_partial_toml() {
    let toml_str = r#"
        [server]
        port = 8080

        [jokeapi]
        category = "Programming"
        safe_mode = false

        [dialogue]
        unresolved = "default_english"
        explicit_hint_shortcut = true
    "#;
    let cfg: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.server.host, "0.0.0.0");
    assert_eq!(cfg.jokeapi.category, "Programming");
    assert!(!cfg.jokeapi.safe_mode);
    assert_eq!(cfg.jokeapi.timeout_secs, 8);
    assert_eq!(cfg.dialogue.unresolved, UnresolvedPolicy::DefaultEnglish);
    assert!(cfg.dialogue.explicit_hint_shortcut);
    assert_eq!(cfg.dialogue.user_text_limit, 80);
}

#[test]
fn test_unknown_policy_is_rejected() {
    let toml_str = r#"
        [dialogue]
        unresolved = "guess"
    "#;
    assert!(toml::from_str::<Config>(toml_str).is_err());
}

#[test]
fn test_env_overrides() {
    let env: HashMap<&str, &str> = [
        ("PORT", "4100"),
        ("JESTER_HOST", "127.0.0.1"),
        ("JOKEAPI_BASE_URL", "http://localhost:9000/"),
    ]
    .into_iter()
    .collect();

    let mut cfg = Config::default();
    cfg.apply_overrides(|k| env.get(k).map(|v| v.to_string()))
        .unwrap();
    assert_eq!(cfg.server.port, 4100);
    assert_eq!(cfg.server.host, "127.0.0.1");
    assert_eq!(cfg.jokeapi.base_url, "http://localhost:9000");
}

#[test]
fn test_blank_env_is_ignored() {
    let mut cfg = Config::default();
    cfg.apply_overrides(|k| (k == "PORT").then(|| "  ".to_string()))
        .unwrap();
    assert_eq!(cfg.server.port, 3000);
}

#[test]
fn test_invalid_port_env_is_config_error() {
    let mut cfg = Config::default();
    let err = cfg
        .apply_overrides(|k| (k == "PORT").then(|| "not-a-port".to_string()))
        .unwrap_err();
    assert!(matches!(err, JesterError::Config(_)));
    assert!(err.to_string().contains("invalid PORT"));
}

#[test]
fn test_load_missing_file_returns_defaults() {
    let cfg = load("/nonexistent/__jester_test__/config.toml").unwrap();
    assert_eq!(cfg.server.port, 3000);
}

#[test]
fn test_load_reads_file() {
    let tmp = std::env::temp_dir().join("__jester_test_config_load__.toml");
    std::fs::write(&tmp, "[server]\nport = 5005\n").unwrap();

    let cfg = load(tmp.to_str().unwrap()).unwrap();
    assert_eq!(cfg.server.port, 5005);

    let _ = std::fs::remove_file(&tmp);
}

#[test]
fn test_load_invalid_toml_is_config_error() {
    let tmp = std::env::temp_dir().join("__jester_test_config_invalid__.toml");
    std::fs::write(&tmp, "[server\nport = ").unwrap();

    let err = load(tmp.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, JesterError::Config(_)));

    let _ = std::fs::remove_file(&tmp);
}

#[test]
fn test_shellexpand() {
    assert_eq!(shellexpand("/var/log/jester"), "/var/log/jester");
    assert_eq!(shellexpand("logs"), "logs");
    if let Some(home) = std::env::var_os("HOME") {
        assert_eq!(
            shellexpand("~/logs"),
            format!("{}/logs", home.to_string_lossy())
        );
    }
}

#[test]
fn test_log_dir_from_toml() {
    let cfg: Config = toml::from_str("[jester]\nlog_dir = \"~/.jester/logs\"\nlog_level = \"debug\"\n").unwrap();
    assert_eq!(cfg.jester.log_dir.as_deref(), Some("~/.jester/logs"));
    assert_eq!(cfg.jester.log_level, "debug");
    assert_eq!(cfg.jester.name, "jester");
}
