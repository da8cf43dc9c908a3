//! Unit tests for the configuration module
use super::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_settings_default() {
    let settings = Settings::default();

    assert_eq!(settings.server.host, "127.0.0.1");
    assert_eq!(settings.server.port, 8080);
    assert_eq!(settings.auth.token_bytes, 32);
    assert_eq!(settings.auth.cookie_ttl_secs, 86_400);
    assert!(!settings.auth.secure_cookies);
    assert_eq!(settings.hashing.algorithm, HashAlgorithm::Scrypt);
    assert_eq!(settings.log.level, "info");
    assert_eq!(settings.bind_addr(), "127.0.0.1:8080");
    assert!(settings.validate().is_ok());
}

#[test]
fn test_settings_validation() {
    let settings = Settings::default();

    let mut invalid = settings.clone();
    invalid.server.host = "  ".to_string();
    assert!(invalid.validate().is_err());

    let mut invalid = settings.clone();
    invalid.auth.token_bytes = 8;
    assert!(invalid.validate().is_err());

    let mut invalid = settings.clone();
    invalid.auth.cookie_ttl_secs = 0;
    assert!(invalid.validate().is_err());

    let mut invalid = settings.clone();
    invalid.log.level = "verbose".to_string();
    assert!(matches!(invalid.validate(), Err(AppError::Config(_))));

    // Level matching is case-insensitive
    let mut valid = settings;
    valid.log.level = "DEBUG".to_string();
    assert!(valid.validate().is_ok());
}

#[test]
fn test_load_config_from_file() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("sessiongate.toml");

    let config_content = r#"
        [server]
        host = "0.0.0.0"
        port = 9000

        [auth]
        secure_cookies = true

        [hashing]
        algorithm = "argon2"
        argon2_t_cost = 3
    "#;
    fs::write(&config_path, config_content).unwrap();

    let settings = Settings::load_from(&config_path).unwrap();

    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.server.port, 9000);
    assert!(settings.auth.secure_cookies);
    assert_eq!(settings.hashing.algorithm, HashAlgorithm::Argon2);
    assert_eq!(settings.hashing.argon2_t_cost, 3);

    // Unset keys keep their defaults
    assert_eq!(settings.auth.token_bytes, 32);
    assert_eq!(settings.hashing.argon2_p_cost, 1);
    assert_eq!(settings.log.level, "info");
}

#[test]
fn test_load_rejects_invalid_file_values() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("bad.toml");
    fs::write(&config_path, "[auth]\ntoken_bytes = 4\n").unwrap();

    assert!(Settings::load_from(&config_path).is_err());
}

#[test]
fn test_load_from_missing_file() {
    let temp_dir = tempdir().unwrap();
    let missing = temp_dir.path().join("nope.toml");

    let err = Settings::load_from(&missing).unwrap_err();
    assert!(err.to_string().contains("does not exist"));
}
