use serde::Deserialize;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};
use url::Url;

use crate::domain::DEFAULT_ISSUER;
use crate::error::{ConfigError, Result};

#[derive(Debug, Deserialize)]
pub struct Config {
    pub network: NetworkConfig,
    #[serde(default)]
    pub enrollment: EnrollmentConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct NetworkConfig {
    /// Base URL of the panel backend.
    pub api_url: String,
}

#[derive(Debug, Deserialize)]
pub struct EnrollmentConfig {
    /// Issuer label shown in authenticator apps.
    pub issuer: String,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.network.api_url.is_empty() {
            return Err(ConfigError::MissingField { field: "api_url" }.into());
        }
        if let Err(err) = Url::parse(&self.network.api_url) {
            return Err(ConfigError::InvalidValue {
                field: "api_url",
                reason: err.to_string(),
            }
            .into());
        }
        if self.enrollment.issuer.is_empty() {
            return Err(ConfigError::MissingField { field: "issuer" }.into());
        }
        Ok(())
    }

    /// Initialize the tracing subscriber with this logging configuration.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        match self.logging.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for EnrollmentConfig {
    fn default() -> Self {
        Self {
            issuer: DEFAULT_ISSUER.into(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: NetworkConfig {
                api_url: "http://127.0.0.1:8000".into(),
            },
            enrollment: EnrollmentConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_optional_sections() {
        let config: Config = toml::from_str(
            r#"
            [network]
            api_url = "http://127.0.0.1:8000"
            "#,
        )
        .unwrap();
        assert_eq!(config.enrollment.issuer, DEFAULT_ISSUER);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn validate_rejects_empty_api_url() {
        let config = Config {
            network: NetworkConfig {
                api_url: String::new(),
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(crate::error::Error::Config(ConfigError::MissingField {
                field: "api_url"
            }))
        ));
    }

    #[test]
    fn validate_rejects_unparseable_api_url() {
        let config = Config {
            network: NetworkConfig {
                api_url: "not a url".into(),
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(crate::error::Error::Config(ConfigError::InvalidValue {
                field: "api_url",
                ..
            }))
        ));
    }
}
