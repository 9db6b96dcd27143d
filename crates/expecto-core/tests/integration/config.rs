//! Loading adapter settings from disk

use super::common::TestEnv;
use expecto_core::matchers::equals;
use expecto_core::{
    CONFIG_FILE_NAME, ConfigError, ConfigOverrides, apply_overrides, expect, load_config,
};
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[test]
fn test_loaded_config_drives_truncation() -> TestResult {
    let dir = TempDir::new()?;
    std::fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "max-message-chars: 14\nlog-successes: true\n",
    )?;
    let config = load_config(dir.path())?;

    let env = TestEnv::new();
    let adapter = env.adapter_with(config);
    expect!(adapter, "a fairly long actual value", equals, "and an expected one");

    assert_eq!(env.messages(), vec!["Expected 'and ... [truncated]"]);
    Ok(())
}

#[test]
fn test_overrides_win_over_file() -> TestResult {
    let dir = TempDir::new()?;
    std::fs::write(dir.path().join(CONFIG_FILE_NAME), "max-message-chars: 14\n")?;
    let config = load_config(dir.path())?;

    let overrides = ConfigOverrides {
        max_message_chars: Some(1000),
        ..Default::default()
    };
    let config = apply_overrides(config, &overrides)?;
    assert_eq!(config.max_message_chars, Some(1000));
    assert!(!config.log_successes);
    Ok(())
}

#[test]
fn test_invalid_yaml_is_reported() -> TestResult {
    let dir = TempDir::new()?;
    std::fs::write(dir.path().join(CONFIG_FILE_NAME), "max-message-chars: [1, 2\n")?;

    let result = load_config(dir.path());
    assert!(matches!(result, Err(ConfigError::Yaml(_))));
    Ok(())
}
