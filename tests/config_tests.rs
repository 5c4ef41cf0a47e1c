use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use qronos_panel::config::Config;
use qronos_panel::error::{ConfigError, Error};

static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn write_temp_config(contents: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let suffix = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    path.push(format!("qronos-panel-config-test-{nanos}-{suffix}.toml"));
    fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
fn config_loads_with_only_a_network_section() {
    let toml = r#"
[network]
api_url = "http://127.0.0.1:8000"
"#;

    let path = write_temp_config(toml);
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);

    let config = result.expect("minimal config should load");
    assert_eq!(config.enrollment.issuer, "QRONOSUI");
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, "pretty");
}

#[test]
fn config_rejects_empty_api_url() {
    let toml = r#"
[network]
api_url = ""

[logging]
level = "info"
format = "pretty"
"#;

    let path = write_temp_config(toml);
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);

    assert!(
        matches!(
            result,
            Err(Error::Config(ConfigError::MissingField { field: "api_url" }))
        ),
        "Expected empty api_url to be rejected"
    );
}

#[test]
fn config_rejects_unparseable_api_url() {
    let toml = r#"
[network]
api_url = "not a url"
"#;

    let path = write_temp_config(toml);
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);

    match result {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "api_url", ..
        })) => {}
        Err(err) => panic!("Expected invalid api_url error, got {err}"),
        Ok(config) => panic!(
            "Expected invalid api_url to be rejected, got {}",
            config.network.api_url
        ),
    }
}

#[test]
fn config_rejects_empty_issuer() {
    let toml = r#"
[network]
api_url = "http://127.0.0.1:8000"

[enrollment]
issuer = ""
"#;

    let path = write_temp_config(toml);
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);

    assert!(
        matches!(
            result,
            Err(Error::Config(ConfigError::MissingField { field: "issuer" }))
        ),
        "Expected empty issuer to be rejected"
    );
}

#[test]
fn config_rejects_missing_file() {
    let result = Config::load("/nonexistent/qronos-panel/config.toml");
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::ReadFile(_)))
    ));
}
