//! Integration tests for layered configuration and the CLI binary
//!
//! Tests that touch `PYMODULE_*` variables run serially since the process
//! environment is shared.

use clap::Parser;
use pymodule::config::{ENV_INPUT_FILE, ENV_PARAM1, ENV_PARAM2};
use pymodule::{CliOptions, ConfigError, get_app_configuration};
use serial_test::serial;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

fn clear_env() {
    for var in [ENV_PARAM1, ENV_PARAM2, ENV_INPUT_FILE, "PYMODULE_OUTPUT_FILE"] {
        unsafe { std::env::remove_var(var) };
    }
}

fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
#[serial]
fn test_priority_defaults_file_env_cli() {
    clear_env();
    let file = config_file("[parameters]\nparam1 = 10\nparam2 = 11\n\n[positionals]\ninput_file = \"file.in\"\n");
    unsafe {
        std::env::set_var(ENV_PARAM1, "20");
        std::env::set_var(ENV_INPUT_FILE, "env.in");
    }

    let path = file.path().to_str().unwrap().to_string();
    let cli = CliOptions::try_parse_from(["pymodule", "--config", &path, "--param1", "30"]).unwrap();
    let config = get_app_configuration(&cli).unwrap().config;
    clear_env();

    assert_eq!(config.parameters.param1, 30); // CLI beats env and file
    assert_eq!(config.parameters.param2, 11); // file beats defaults
    assert_eq!(config.positionals.input_file, "env.in"); // env beats file
    assert!(config.positionals.output_file.is_empty());
    assert!(!config.logging.verbose);
}

#[test]
#[serial]
fn test_env_only_with_no_config() {
    clear_env();
    unsafe { std::env::set_var(ENV_PARAM2, " 42 ") };

    let cli = CliOptions::try_parse_from(["pymodule", "--no-config"]).unwrap();
    let config = get_app_configuration(&cli).unwrap().config;
    clear_env();

    assert_eq!(config.parameters.param1, 1);
    assert_eq!(config.parameters.param2, 42);
}

#[test]
#[serial]
fn test_bad_env_value_fails() {
    clear_env();
    unsafe { std::env::set_var(ENV_PARAM1, "lots") };

    let cli = CliOptions::try_parse_from(["pymodule", "--no-config"]).unwrap();
    let result = get_app_configuration(&cli);
    clear_env();

    match result {
        Err(ConfigError::Env { var, .. }) => assert_eq!(var, ENV_PARAM1),
        other => panic!("Expected Env error, got {:?}", other.map(|c| c.config)),
    }
}

#[test]
#[serial]
fn test_invalid_file_fails_before_env() {
    clear_env();
    let file = config_file("[parameters]\nparam9 = 1\n");
    let path = file.path().to_str().unwrap().to_string();

    let cli = CliOptions::try_parse_from(["pymodule", "--config", &path]).unwrap();
    match get_app_configuration(&cli) {
        Err(ConfigError::Schema { .. }) => {}
        other => panic!("Expected Schema error, got {:?}", other.map(|c| c.config)),
    }
}

#[test]
fn test_binary_version_option() {
    let output = Command::new(env!("CARGO_BIN_EXE_pymodule"))
        .arg("-v")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.trim(), format!("pymodule {}", env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_binary_missing_explicit_config_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.toml");

    let output = Command::new(env!("CARGO_BIN_EXE_pymodule"))
        .arg("--config")
        .arg(&missing)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: Failed to read configuration file"));
}

#[test]
fn test_binary_verbose_from_config_file_enables_debug() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[logging]\nverbose = true\n").unwrap();

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pymodule"));
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    for var in [ENV_PARAM1, ENV_PARAM2, ENV_INPUT_FILE, "PYMODULE_OUTPUT_FILE"] {
        cmd.env_remove(var);
    }
    let output = cmd.output().unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("DEBUG"));
    assert!(stderr.contains("core modules answered"));
}

#[test]
fn test_binary_default_verbosity_hides_debug() {
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pymodule"));
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    for var in [ENV_PARAM1, ENV_PARAM2, ENV_INPUT_FILE, "PYMODULE_OUTPUT_FILE"] {
        cmd.env_remove(var);
    }
    let output = cmd.output().unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("core modules answered"));
    // Loading happens before the subscriber exists; its warning is replayed
    assert!(stderr.contains("not found, continuing with defaults"));
}
