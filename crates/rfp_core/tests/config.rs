use std::collections::HashMap;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rfp_core::config::Settings;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn missing_api_key_is_fatal() {
    let err = Settings::from_lookup(&lookup_from(&[])).expect_err("should fail");
    assert_eq!(err.code, "CONFIG_MISSING_API_KEY");
    assert!(err.is_config());
}

#[test]
fn blank_api_key_is_fatal() {
    let err =
        Settings::from_lookup(&lookup_from(&[("OPENAI_API_KEY", "  ")])).expect_err("should fail");
    assert_eq!(err.code, "CONFIG_MISSING_API_KEY");
}

#[test]
fn defaults_apply_when_only_key_is_set() {
    let settings =
        Settings::from_lookup(&lookup_from(&[("OPENAI_API_KEY", "sk-test")])).expect("settings");
    assert_eq!(settings.api_key, "sk-test");
    assert_eq!(settings.chat_model, "gpt-4");
    assert_eq!(settings.embed_model, "text-embedding-3-small");
    assert_eq!(settings.base_url, "https://api.openai.com/v1");
    assert_eq!(settings.prompts_file, PathBuf::from("prompts.json"));
    assert_eq!(settings.data_dir, PathBuf::from("./data"));
}

#[test]
fn environment_values_override_defaults() {
    let settings = Settings::from_lookup(&lookup_from(&[
        ("OPENAI_API_KEY", "sk-test"),
        ("OPENAI_MODEL", "gpt-4o"),
        ("OPENAI_EMBED_MODEL", "text-embedding-3-large"),
        ("OPENAI_BASE_URL", "http://127.0.0.1:8080/v1/"),
        ("PROMPTS_FILE", "/etc/rfp/prompts.json"),
        ("DATA_PATH", "/tmp/rfp-out"),
    ]))
    .expect("settings");
    assert_eq!(settings.chat_model, "gpt-4o");
    assert_eq!(settings.embed_model, "text-embedding-3-large");
    // Trailing slash is trimmed so URL joins stay predictable.
    assert_eq!(settings.base_url, "http://127.0.0.1:8080/v1");
    assert_eq!(settings.data_dir, PathBuf::from("/tmp/rfp-out"));
}
