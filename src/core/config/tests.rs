use super::data::{Config, ConfigKey};
use super::io::ConfigError;
use crate::core::constants::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use tempfile::TempDir;

#[test]
fn missing_file_loads_defaults() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config = Config::load_from_path(&temp_dir.path().join("config.toml")).expect("load");

    assert_eq!(config, Config::default());
    assert_eq!(config.model_or_default(), DEFAULT_MODEL);
    assert_eq!(config.base_url_or_default(), DEFAULT_BASE_URL);
    assert!(config.prefers_dark());
}

#[test]
fn save_then_load_preserves_values() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.set(ConfigKey::Model, "gpt-4o").expect("set model");
    config.set(ConfigKey::Theme, "Light").expect("set theme");
    config.save_to_path(&config_path).expect("save");

    let loaded = Config::load_from_path(&config_path).expect("load");
    assert_eq!(loaded.model.as_deref(), Some("gpt-4o"));
    assert_eq!(loaded.theme.as_deref(), Some("light"));
    assert!(!loaded.prefers_dark());
}

#[test]
fn invalid_toml_reports_parse_error_with_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "model = [").expect("write");

    let err = Config::load_from_path(&config_path).expect_err("should fail");
    let config_err = err
        .downcast_ref::<ConfigError>()
        .expect("should be a ConfigError");
    assert!(matches!(config_err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn set_validates_values() {
    let mut config = Config::default();
    assert!(config.set(ConfigKey::BaseUrl, "ftp://example.com").is_err());
    assert!(config.set(ConfigKey::Theme, "sepia").is_err());
    assert!(config.set(ConfigKey::Model, "   ").is_err());
    assert_eq!(config, Config::default());

    config
        .set(ConfigKey::BaseUrl, "http://localhost:8080/v1")
        .expect("set base url");
    assert_eq!(
        config.get(ConfigKey::BaseUrl),
        Some("http://localhost:8080/v1")
    );

    config.unset(ConfigKey::BaseUrl);
    assert_eq!(config.get(ConfigKey::BaseUrl), None);
}

#[test]
fn config_keys_round_trip_through_names() {
    for key in ConfigKey::ALL {
        assert_eq!(ConfigKey::parse(key.as_str()), Some(key));
    }
    assert_eq!(ConfigKey::parse("temperature"), None);
}
