mod common;

use std::fs;
use std::path::PathBuf;

use bank_ledger::config::{Config, ConfigManager, DEFAULT_HISTORY_LIMIT};
use bank_ledger::core::utils::PathResolver;
use bank_ledger::LedgerError;
use common::temp_dir;

#[test]
fn absent_config_yields_defaults() {
    let manager = ConfigManager::with_base_dir(temp_dir()).unwrap();
    let config = manager.load().unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.history_limit, DEFAULT_HISTORY_LIMIT);
    assert!(!config.plain_output);
}

#[test]
fn saved_config_round_trips_through_the_file() {
    let base = temp_dir();
    let manager = ConfigManager::with_base_dir(base.clone()).unwrap();
    let mut config = Config::default();
    config.set("history-limit", "25").unwrap();
    config.set("plain-output", "yes").unwrap();
    config.set("data-file", "archive/bank.json").unwrap();
    manager.save(&config).unwrap();

    assert_eq!(manager.path(), base.join("config").join("config.json"));
    let reloaded = ConfigManager::with_base_dir(base).unwrap().load().unwrap();
    assert_eq!(reloaded, config);
}

#[test]
fn partial_config_files_fill_in_defaults() {
    let base = temp_dir();
    let manager = ConfigManager::with_base_dir(base).unwrap();
    fs::create_dir_all(manager.path().parent().unwrap()).unwrap();
    fs::write(manager.path(), r#"{ "plain_output": true }"#).unwrap();

    let config = manager.load().unwrap();
    assert!(config.plain_output);
    assert_eq!(config.history_limit, DEFAULT_HISTORY_LIMIT);
    assert_eq!(config.data_file, None);
}

#[test]
fn malformed_config_is_a_configuration_error() {
    let manager = ConfigManager::with_base_dir(temp_dir()).unwrap();
    fs::create_dir_all(manager.path().parent().unwrap()).unwrap();
    fs::write(manager.path(), "history_limit = 3").unwrap();

    let err = manager.load().unwrap_err();
    assert!(matches!(err, LedgerError::Config(_)));
    assert!(err.to_string().starts_with("Configuration error:"));
}

#[test]
fn data_file_resolution_respects_base_and_absolute_paths() {
    if PathResolver::data_file_override().is_some() {
        return;
    }
    let base = PathBuf::from("/srv/bank");
    let mut config = Config::default();
    assert_eq!(config.resolve_data_file(&base), base.join("bank_data.json"));

    config.data_file = Some(PathBuf::from("books/main.json"));
    assert_eq!(config.resolve_data_file(&base), base.join("books/main.json"));

    config.data_file = Some(PathBuf::from("/var/lib/bank.json"));
    assert_eq!(
        config.resolve_data_file(&base),
        PathBuf::from("/var/lib/bank.json")
    );
}

#[test]
fn unknown_keys_are_rejected() {
    let mut config = Config::default();
    let err = config.set("currency", "EUR").unwrap_err();
    assert!(err.to_string().contains("unknown key `currency`"));
    assert!(config.set("history-limit", "0").is_err());
    assert!(config.set("plain-output", "maybe").is_err());
    assert_eq!(config, Config::default());
}
