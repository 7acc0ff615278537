//! Client configuration and credentials.

use std::fmt;
use std::time::Duration;

use kite_core::error::KiteError;

pub const DEFAULT_BASE_URL: &str = "https://api.kite.trade";
pub const DEFAULT_LOGIN_URL: &str = "https://kite.zerodha.com/connect/login";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(7);

/// Connection settings for a [`KiteClient`](crate::KiteClient).
#[derive(Debug, Clone)]
pub struct KiteConfig {
    pub api_key: String,
    pub base_url: String,
    pub login_url: String,
    pub timeout: Duration,
}

impl KiteConfig {
    /// Create config for an API key with the public endpoints.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            login_url: DEFAULT_LOGIN_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the browser login page.
    pub fn with_login_url(mut self, login_url: impl Into<String>) -> Self {
        self.login_url = login_url.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// API credentials.
///
/// The secret is only ever used to compute checksums and is redacted from
/// `Debug` output.
#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
    pub access_token: Option<String>,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            access_token: None,
        }
    }

    /// Load from the named environment variables.
    ///
    /// The key and secret are required; an empty or missing access token
    /// variable leaves `access_token` unset.
    pub fn from_env(key_var: &str, secret_var: &str, token_var: &str) -> Result<Self, KiteError> {
        let api_key = required_var(key_var)?;
        let api_secret = required_var(secret_var)?;
        let access_token = std::env::var(token_var)
            .ok()
            .filter(|token| !token.trim().is_empty());

        Ok(Self {
            api_key,
            api_secret,
            access_token,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

fn required_var(name: &str) -> Result<String, KiteError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(KiteError::Configuration(format!("{} not set", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secrets() {
        let mut creds = Credentials::new("my_key", "my_secret");
        creds.access_token = Some("my_token".into());
        let out = format!("{:?}", creds);
        assert!(out.contains("my_key"));
        assert!(!out.contains("my_secret"));
        assert!(!out.contains("my_token"));
    }

    #[test]
    fn test_missing_env_is_configuration_error() {
        let err = Credentials::from_env(
            "KITE_TEST_UNSET_KEY_7f3a",
            "KITE_TEST_UNSET_SECRET_7f3a",
            "KITE_TEST_UNSET_TOKEN_7f3a",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            KiteError::Configuration(msg) if msg.contains("KITE_TEST_UNSET_KEY_7f3a")
        ));
    }

    #[test]
    fn test_from_env_reads_credentials() {
        std::env::set_var("KITE_TEST_SET_KEY_51c0", "key1");
        std::env::set_var("KITE_TEST_SET_SECRET_51c0", "secret1");
        std::env::set_var("KITE_TEST_SET_TOKEN_51c0", "tok1");

        let creds = Credentials::from_env(
            "KITE_TEST_SET_KEY_51c0",
            "KITE_TEST_SET_SECRET_51c0",
            "KITE_TEST_SET_TOKEN_51c0",
        )
        .unwrap();
        assert_eq!(creds.api_key, "key1");
        assert_eq!(creds.api_secret, "secret1");
        assert_eq!(creds.access_token.as_deref(), Some("tok1"));
    }

    #[test]
    fn test_empty_access_token_is_unset() {
        std::env::set_var("KITE_TEST_EMPTY_KEY_9d2e", "key1");
        std::env::set_var("KITE_TEST_EMPTY_SECRET_9d2e", "secret1");
        std::env::set_var("KITE_TEST_EMPTY_TOKEN_9d2e", "  ");

        let creds = Credentials::from_env(
            "KITE_TEST_EMPTY_KEY_9d2e",
            "KITE_TEST_EMPTY_SECRET_9d2e",
            "KITE_TEST_EMPTY_TOKEN_9d2e",
        )
        .unwrap();
        assert!(creds.access_token.is_none());
    }

    #[test]
    fn test_builder_overrides() {
        let config = KiteConfig::new("k")
            .with_base_url("http://127.0.0.1:9000")
            .with_timeout(Duration::from_secs(2));
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.login_url, DEFAULT_LOGIN_URL);
        assert_eq!(config.timeout, Duration::from_secs(2));
    }
}
