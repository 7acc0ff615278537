//! Configuration structures.

use config::ConfigError;
use kite_connect::{
    DEFAULT_BASE_URL, DEFAULT_CALLBACK_ADDR, DEFAULT_CALLBACK_PATH, DEFAULT_LOGIN_URL,
    DEFAULT_TIMEOUT,
};
use serde::{Deserialize, Serialize};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub kite: KiteSettings,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.kite.request_timeout_secs == 0 {
            return Err(ConfigError::Message(
                "kite.request_timeout_secs must be positive".into(),
            ));
        }
        if self.kite.callback_timeout_secs == 0 {
            return Err(ConfigError::Message(
                "kite.callback_timeout_secs must be positive".into(),
            ));
        }
        if !self.kite.callback_path.starts_with('/') {
            return Err(ConfigError::Message(format!(
                "kite.callback_path must start with '/', got {:?}",
                self.kite.callback_path
            )));
        }
        for (name, value) in [
            ("api_key_env", &self.kite.api_key_env),
            ("api_secret_env", &self.kite.api_secret_env),
            ("access_token_env", &self.kite.access_token_env),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Message(format!("kite.{} must not be empty", name)));
            }
        }
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}

/// Kite Connect endpoints, credential sources and login callback settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KiteSettings {
    pub api_key_env: String,
    pub api_secret_env: String,
    pub access_token_env: String,
    pub base_url: String,
    pub login_url: String,
    pub request_timeout_secs: u64,
    pub callback_addr: String,
    pub callback_path: String,
    pub callback_timeout_secs: u64,
}

impl Default for KiteSettings {
    fn default() -> Self {
        Self {
            api_key_env: "KITE_API_KEY".to_string(),
            api_secret_env: "KITE_SECRET_KEY".to_string(),
            access_token_env: "KITE_ACCESS_TOKEN".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            login_url: DEFAULT_LOGIN_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            callback_addr: DEFAULT_CALLBACK_ADDR.to_string(),
            callback_path: DEFAULT_CALLBACK_PATH.to_string(),
            callback_timeout_secs: 300,
        }
    }
}
