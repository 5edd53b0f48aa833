//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

fn nz(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).expect("non-zero")
}

#[test]
fn default_config_path_contains_arbres_config_toml() {
    let Some(path) = default_config_path() else {
        return;
    };
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("arbres") && path_str.ends_with("config.toml"),
        "Path should contain 'arbres' and end with 'config.toml', got: {}",
        path_str
    );
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_valid_toml() {
    let temp_dir = env::temp_dir();
    let config_path = temp_dir.join("arbres_test_config.toml");

    let toml_content = r#"
endpoint = "https://example.org/records"
page_size = 20
max_pages = 7
initial_visible = 5
reveal_step = 15
description_preview = 40
"#;

    fs::write(&config_path, toml_content).expect("Failed to write test config");

    let config = load_config_file(&config_path)
        .expect("Should successfully parse valid TOML")
        .expect("Should return Some(ConfigFile) for existing file");

    assert_eq!(config.endpoint.as_deref(), Some("https://example.org/records"));
    assert_eq!(config.page_size, Some(20));
    assert_eq!(config.max_pages, Some(7));
    assert_eq!(config.initial_visible, Some(5));
    assert_eq!(config.reveal_step, Some(15));
    assert_eq!(config.description_preview, Some(40));

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let temp_dir = env::temp_dir();
    let config_path = temp_dir.join("arbres_test_invalid.toml");

    fs::write(&config_path, "this is not valid TOML ][}{")
        .expect("Failed to write invalid test config");

    let result = load_config_file(&config_path);

    match result {
        Err(ConfigError::ParseError { path, reason: _ }) => {
            assert_eq!(path, config_path);
        }
        _ => panic!("Expected ParseError, got {:?}", result),
    }

    fs::remove_file(config_path).ok();
}

#[test]
fn config_file_rejects_unknown_fields() {
    let result: Result<ConfigFile, _> = toml::from_str("theme = \"monokai\"");
    assert!(result.is_err(), "Unknown keys should be rejected");
}

#[test]
fn config_file_handles_partial_config() {
    let config: ConfigFile = toml::from_str("page_size = 50").expect("partial config parses");

    assert_eq!(config.page_size, Some(50));
    assert_eq!(config.endpoint, None);
    assert_eq!(config.reveal_step, None);
}

#[test]
fn resolved_config_default_has_expected_values() {
    let config = ResolvedConfig::default();

    assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(config.page_size.get(), 100);
    assert_eq!(config.max_pages, 50);
    assert_eq!(config.initial_visible, 10);
    assert_eq!(config.reveal_step.get(), 10);
    assert_eq!(config.description_preview, 120);
}

#[test]
fn merge_config_uses_defaults_when_none() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_config_overrides_with_config_file_values() {
    let config_file = ConfigFile {
        endpoint: Some("https://mirror/records".to_string()),
        page_size: Some(20),
        max_pages: Some(3),
        initial_visible: Some(6),
        reveal_step: Some(4),
        description_preview: Some(80),
        log_file_path: None,
    };

    let resolved = merge_config(Some(config_file));

    assert_eq!(resolved.endpoint, "https://mirror/records");
    assert_eq!(resolved.page_size, nz(20));
    assert_eq!(resolved.max_pages, 3);
    assert_eq!(resolved.initial_visible, 6);
    assert_eq!(resolved.reveal_step, nz(4));
    assert_eq!(resolved.description_preview, 80);
}

#[test]
fn merge_config_rejects_zero_page_size_and_step() {
    let config_file = ConfigFile {
        page_size: Some(0),
        reveal_step: Some(0),
        ..ConfigFile::default()
    };

    let resolved = merge_config(Some(config_file));
    let defaults = ResolvedConfig::default();

    assert_eq!(resolved.page_size, defaults.page_size);
    assert_eq!(resolved.reveal_step, defaults.reveal_step);
}

#[test]
fn derived_paginator_and_reveal_settings() {
    let config = ResolvedConfig {
        page_size: nz(20),
        max_pages: 9,
        initial_visible: 3,
        reveal_step: nz(2),
        ..ResolvedConfig::default()
    };

    let paginator = config.paginator();
    assert_eq!(paginator.page_size, nz(20));
    assert_eq!(paginator.max_pages, 9);

    let reveal = config.reveal();
    assert_eq!(reveal.visible_count(), 3);
    assert_eq!(reveal.step(), 2);
}

/// RAII guard to ensure environment variable cleanup even under test parallelism.
/// Removes the var on drop, preventing test pollution in parallel execution.
struct EnvGuard(&'static str);

impl EnvGuard {
    fn new(name: &'static str) -> Self {
        env::remove_var(name);
        EnvGuard(name)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var(self.0);
    }
}

#[test]
#[serial(arbres_env)]
fn apply_env_overrides_respects_endpoint() {
    let _endpoint = EnvGuard::new(ENV_ENDPOINT);
    let _page_size = EnvGuard::new(ENV_PAGE_SIZE);

    env::set_var(ENV_ENDPOINT, "https://env/records");

    let result = apply_env_overrides(ResolvedConfig::default());

    assert_eq!(result.endpoint, "https://env/records");
    assert_eq!(result.page_size, ResolvedConfig::default().page_size);
}

#[test]
#[serial(arbres_env)]
fn apply_env_overrides_parses_page_size() {
    let _endpoint = EnvGuard::new(ENV_ENDPOINT);
    let _page_size = EnvGuard::new(ENV_PAGE_SIZE);

    env::set_var(ENV_PAGE_SIZE, " 25 ");

    let result = apply_env_overrides(ResolvedConfig::default());

    assert_eq!(result.page_size, nz(25));
}

#[test]
#[serial(arbres_env)]
fn apply_env_overrides_ignores_invalid_page_size() {
    let _endpoint = EnvGuard::new(ENV_ENDPOINT);
    let _page_size = EnvGuard::new(ENV_PAGE_SIZE);

    env::set_var(ENV_PAGE_SIZE, "0");

    let base = ResolvedConfig::default();
    let result = apply_env_overrides(base.clone());

    assert_eq!(result, base, "Zero page size must be ignored");
}

#[test]
#[serial(arbres_env)]
fn apply_env_overrides_no_change_when_env_vars_not_set() {
    let _endpoint = EnvGuard::new(ENV_ENDPOINT);
    let _page_size = EnvGuard::new(ENV_PAGE_SIZE);

    let base = ResolvedConfig::default();

    assert_eq!(apply_env_overrides(base.clone()), base);
}

#[test]
#[serial(arbres_config)]
fn load_config_with_precedence_prefers_explicit_path() {
    let _guard = EnvGuard::new(ENV_CONFIG);

    let temp_dir = env::temp_dir();
    let explicit_path = temp_dir.join("arbres_explicit.toml");
    fs::write(&explicit_path, "page_size = 11").expect("Failed to write explicit config");

    let env_path = temp_dir.join("arbres_env.toml");
    fs::write(&env_path, "page_size = 22").expect("Failed to write env config");
    env::set_var(ENV_CONFIG, &env_path);

    let config = load_config_with_precedence(Some(explicit_path.clone()))
        .expect("explicit config loads")
        .expect("explicit config exists");

    assert_eq!(
        config.page_size,
        Some(11),
        "Should use explicit path, not ARBRES_CONFIG env var"
    );

    fs::remove_file(explicit_path).ok();
    fs::remove_file(env_path).ok();
}

#[test]
#[serial(arbres_config)]
fn load_config_with_precedence_uses_env_var_when_no_explicit_path() {
    let _guard = EnvGuard::new(ENV_CONFIG);

    let env_path = env::temp_dir().join("arbres_env_only.toml");
    fs::write(&env_path, "max_pages = 4").expect("Failed to write env config");
    env::set_var(ENV_CONFIG, &env_path);

    let config = load_config_with_precedence(None)
        .expect("env config loads")
        .expect("env config exists");

    assert_eq!(config.max_pages, Some(4));

    fs::remove_file(env_path).ok();
}

#[test]
fn apply_cli_overrides_replace_endpoint_and_page_size() {
    let result = apply_cli_overrides(
        ResolvedConfig::default(),
        Some("https://cli/records".to_string()),
        Some(nz(30)),
    );

    assert_eq!(result.endpoint, "https://cli/records");
    assert_eq!(result.page_size, nz(30));
}

#[test]
fn apply_cli_overrides_no_overrides() {
    let base = ResolvedConfig::default();

    assert_eq!(apply_cli_overrides(base.clone(), None, None), base);
}

#[test]
#[serial(arbres_env)]
fn precedence_chain_full_defaults_to_cli() {
    let _endpoint = EnvGuard::new(ENV_ENDPOINT);
    let _page_size = EnvGuard::new(ENV_PAGE_SIZE);

    let config_file = ConfigFile {
        endpoint: Some("https://file/records".to_string()),
        page_size: Some(20),
        reveal_step: Some(5),
        ..ConfigFile::default()
    };
    let merged = merge_config(Some(config_file));
    assert_eq!(merged.page_size, nz(20));

    env::set_var(ENV_PAGE_SIZE, "40");
    let with_env = apply_env_overrides(merged);
    assert_eq!(with_env.page_size, nz(40), "Env overrides file");
    assert_eq!(with_env.endpoint, "https://file/records");

    let with_cli = apply_cli_overrides(with_env, None, Some(nz(60)));
    assert_eq!(with_cli.page_size, nz(60), "CLI overrides env");
    assert_eq!(with_cli.reveal_step, nz(5), "Untouched fields survive");
}
