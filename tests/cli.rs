use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

const ENV_VARS: &[&str] = &[
    "ARIZE_API_KEY",
    "ARIZE_ORGANIZATION",
    "ARIZE_SPACE",
    "ARIZE_BASE_URL",
    "ARIZE_PROFILE",
    "ARIZE_CONFIG",
    "RUST_LOG",
];

fn arize(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("arize").unwrap();
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.arg("--config").arg(config);
    cmd
}

fn init(config: &Path, name: &str, api_key: &str) {
    arize(config)
        .args(["config", "init", "--name", name])
        .args(["--api-key", api_key])
        .args(["--organization", "acme", "--space", "fraud"])
        .assert()
        .success()
        .stderr(predicate::str::contains(format!("saved profile '{name}'")));
}

#[test]
fn test_cli_help() {
    Command::cargo_bin("arize")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("traces"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_config_init_list_show() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("arize").join("profiles.toml");

    init(&config, "prod", "ak-1234567890");
    init(&config, "dev", "ak-0000000000");
    assert!(config.exists());

    arize(&config)
        .args(["--json", "config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"prod\""))
        .stdout(predicate::str::contains("\"dev\""))
        .stdout(predicate::str::contains("\"default\": true"));

    arize(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("*********7890"))
        .stdout(predicate::str::contains("ak-1234567890").not());

    arize(&config)
        .args(["config", "use", "dev"])
        .assert()
        .success();
    arize(&config)
        .args(["--json", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"dev\""));
}

#[test]
fn test_unknown_profile_fails() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("profiles.toml");

    arize(&config)
        .args(["config", "use", "missing"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("profile 'missing' not found"));
}

#[test]
fn test_commands_need_a_profile() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("profiles.toml");

    arize(&config)
        .args(["models", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("arize config init"));
}

#[test]
fn test_model_name_and_id_are_exclusive() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("profiles.toml");

    arize(&config)
        .args(["traces", "list", "--model-name", "a", "--model-id", "b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}
