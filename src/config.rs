use crate::booking::StepGating;
use lazy_static::lazy_static;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Deserialize, Default)]
pub struct Config {
    pub server_address: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
    pub static_path: Option<String>,
    pub static_url_prefix: Option<String>,
    pub session: Option<SessionConfig>,
    #[serde(default)]
    pub booking: BookingConfig,
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    Cookie,
    Memory,
    Redis,
}

#[derive(Deserialize, Clone)]
pub struct SessionConfig {
    pub backend: SessionBackend,
    pub secret_key: String,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default)]
    pub cookie_secure: bool,
    #[serde(default = "default_true")]
    pub cookie_http_only: bool,
    #[serde(default = "default_cookie_path")]
    pub cookie_path: String,
    pub cookie_domain: Option<String>,
    /// Seconds.
    pub cookie_max_age: Option<i64>,
    pub redis_url: Option<String>,
    pub redis_pool_size: Option<u32>,
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    #[default]
    Log,
    Http,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct BookingConfig {
    #[serde(default)]
    pub sink: SinkKind,
    pub endpoint: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub step_gating: StepGating,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            sink: SinkKind::default(),
            endpoint: None,
            timeout_secs: default_timeout_secs(),
            step_gating: StepGating::default(),
        }
    }
}

fn default_cookie_name() -> String {
    "redlion_session".to_string()
}

fn default_cookie_path() -> String {
    "/".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    10
}

impl Config {
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)?;
        let config = Config::from_yaml(&content)
            .map_err(|e| anyhow::anyhow!("invalid {}: {}", path.display(), e))?;
        Ok(config)
    }

    pub fn server_address(&self) -> &str {
        self.server_address.as_deref().unwrap_or("127.0.0.1")
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(8080)
    }

    pub fn static_url_prefix(&self) -> &str {
        self.static_url_prefix.as_deref().unwrap_or("/static")
    }
}

lazy_static! {
    pub static ref CONFIG: Config = Config::load("config.yaml").unwrap_or_else(|e| {
        eprintln!("Could not load config.yaml: {}", e);
        std::process::exit(1);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.server_address(), "127.0.0.1");
        assert_eq!(config.port(), 8080);
        assert_eq!(config.static_url_prefix(), "/static");
        assert!(config.session.is_none());
        assert_eq!(config.booking, BookingConfig::default());
        assert_eq!(config.booking.step_gating, StepGating::Strict);
    }

    #[test]
    fn test_full_config() {
        let yaml = r#"
server_address: 0.0.0.0
port: 9000
log_level: warn
static_path: ./public
static_url_prefix: /assets-static
session:
  backend: memory
  secret_key: "0123456789012345678901234567890123456789012345678901234567890123"
  cookie_secure: true
  cookie_max_age: 3600
booking:
  sink: http
  endpoint: https://bookings.example.com/intake
  timeout_secs: 4
  step_gating: lenient
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.server_address(), "0.0.0.0");
        assert_eq!(config.port(), 9000);
        assert_eq!(config.log_level.as_deref(), Some("warn"));

        let session = config.session.unwrap();
        assert_eq!(session.backend, SessionBackend::Memory);
        assert_eq!(session.cookie_name, "redlion_session");
        assert!(session.cookie_secure);
        assert!(session.cookie_http_only);
        assert_eq!(session.cookie_path, "/");
        assert_eq!(session.cookie_max_age, Some(3600));

        assert_eq!(config.booking.sink, SinkKind::Http);
        assert_eq!(config.booking.endpoint.as_deref(), Some("https://bookings.example.com/intake"));
        assert_eq!(config.booking.timeout_secs, 4);
        assert_eq!(config.booking.step_gating, StepGating::Lenient);
    }

    #[test]
    fn test_unknown_gating_policy_is_rejected() {
        let result = Config::from_yaml("booking:\n  step_gating: sometimes\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().join("config.yaml")).unwrap();
        assert_eq!(config.port(), 8080);
    }
}
