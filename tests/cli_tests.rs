use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use assert_cmd::Command;
use predicates::prelude::*;

fn write_temp_config(contents: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    path.push(format!("qronos-panel-cli-test-{nanos}.toml"));
    fs::write(&path, contents).expect("write temp config");
    path
}

fn panel() -> Command {
    Command::cargo_bin("qronos-panel").expect("binary built")
}

#[test]
fn cli_prints_help_with_all_commands() {
    panel()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("logout"));
}

#[test]
fn cli_returns_nonzero_on_config_error() {
    let toml = concat!(
        "[network]\n",
        "api_url = \"not a url\"\n",
        "\n",
        "[logging]\n",
        "level = \"info\"\n",
        "format = \"pretty\"\n",
    );

    let path = write_temp_config(toml);
    let assert = panel().args(["status", "--config"]).arg(&path).assert();
    let _ = fs::remove_file(&path);

    assert
        .failure()
        .stderr(predicate::str::contains("api_url"));
}

#[test]
fn cli_returns_nonzero_on_missing_config() {
    panel()
        .args(["status", "--config", "/nonexistent/qronos-panel/config.toml"])
        .assert()
        .failure();
}
