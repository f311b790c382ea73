use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend base address, e.g. `http://127.0.0.1:5000`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout; a request exceeding it is a transport failure
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// How long an error notification stays up before it closes itself
    #[serde(default = "default_notification_ms")]
    pub notification_ms: u64,
    /// Route the console is sent to once an expired session is cleared
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// Envelope `message` values that still mean success
    #[serde(default = "default_success_messages")]
    pub success_messages: Vec<String>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}
fn default_timeout_ms() -> u64 {
    10_000
}
fn default_notification_ms() -> u64 {
    5_000
}
fn default_login_path() -> String {
    "/login".into()
}
fn default_success_messages() -> Vec<String> {
    vec!["success".into()]
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            notification_ms: default_notification_ms(),
            login_path: default_login_path(),
            success_messages: default_success_messages(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed = url::Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: self.base_url.clone(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::Invalid("timeout_ms must be > 0".into()));
        }
        if self.notification_ms == 0 {
            return Err(ConfigError::Invalid("notification_ms must be > 0".into()));
        }
        if !self.login_path.starts_with('/') {
            return Err(ConfigError::Invalid(format!(
                "login_path must start with '/': {}",
                self.login_path
            )));
        }
        Ok(())
    }

    /// Base address without a trailing slash, ready for path joining.
    pub fn normalized_base_url(&self) -> String {
        self.base_url.trim_end_matches('/').to_string()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notification_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}
fn default_log_level() -> String {
    "info".into()
}
impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

pub mod loader {
    use super::ClientConfig;
    use crate::error::ConfigError;
    use config::{Config, Environment, File};
    use std::path::PathBuf;

    pub const DEFAULT_CONFIG_FILE: &str = "hms.toml";

    pub fn load_config(path: Option<&str>) -> Result<ClientConfig, ConfigError> {
        let mut builder = Config::builder();
        let pathbuf = PathBuf::from(path.unwrap_or(DEFAULT_CONFIG_FILE));
        if pathbuf.exists() {
            builder = builder.add_source(File::from(pathbuf));
        }
        // Environment variable overrides, e.g. HMS__TIMEOUT_MS=3000
        builder = builder.add_source(
            Environment::with_prefix("HMS")
                .try_parsing(true)
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("success_messages"),
        );
        let merged: ClientConfig = builder.build()?.try_deserialize()?;
        merged.validate()?;
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_backend_contract() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.base_url, "http://127.0.0.1:5000");
        assert_eq!(cfg.timeout(), Duration::from_secs(10));
        assert_eq!(cfg.notification_duration(), Duration::from_secs(5));
        assert_eq!(cfg.login_path, "/login");
        assert_eq!(cfg.success_messages, vec!["success".to_string()]);
        cfg.validate().expect("defaults are valid");
    }

    #[test]
    fn rejects_non_http_base_url() {
        let cfg = ClientConfig::default().with_base_url("ftp://example.com");
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        let cfg = ClientConfig::default().with_base_url("not a url");
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let cfg = ClientConfig::default().with_timeout(Duration::ZERO);
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn normalizes_trailing_slash() {
        let cfg = ClientConfig::default().with_base_url("http://localhost:5000/");
        assert_eq!(cfg.normalized_base_url(), "http://localhost:5000");
    }

    #[test]
    fn partial_config_fills_defaults() {
        let cfg: ClientConfig = from_json(
            r#"{"base_url": "https://hms.example.org", "timeout_ms": 2500}"#,
        );
        assert_eq!(cfg.base_url, "https://hms.example.org");
        assert_eq!(cfg.timeout_ms, 2500);
        assert_eq!(cfg.notification_ms, 5000);
        assert_eq!(cfg.logging.level, "info");
    }

    fn from_json(json: &str) -> ClientConfig {
        serde_json::from_str(json).unwrap()
    }
}
