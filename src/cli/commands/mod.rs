//! CLI command implementations.

pub mod portfolio;
pub mod session;
pub mod user;
pub mod validate;

use anyhow::{Context, Result};
use kite_config::KiteSettings;
use kite_connect::{Credentials, KiteClient, KiteConfig};
use std::time::Duration;
use tracing::debug;

/// Load credentials from the environment variables named in the settings.
pub fn credentials(settings: &KiteSettings) -> Result<Credentials> {
    Credentials::from_env(
        &settings.api_key_env,
        &settings.api_secret_env,
        &settings.access_token_env,
    )
    .context("Failed to load API credentials")
}

/// Build a client, reusing an access token from the environment if present.
pub fn build_client(settings: &KiteSettings, credentials: &Credentials) -> Result<KiteClient> {
    let config = KiteConfig::new(credentials.api_key.clone())
        .with_base_url(settings.base_url.clone())
        .with_login_url(settings.login_url.clone())
        .with_timeout(Duration::from_secs(settings.request_timeout_secs));

    let mut client = KiteClient::new(config).context("Failed to create API client")?;
    if let Some(token) = &credentials.access_token {
        debug!("Using access token from {}", settings.access_token_env);
        client.set_access_token(token.clone());
    }
    Ok(client)
}

/// Build an authenticated client, running the browser login when no access
/// token is available.
pub async fn connect(settings: &KiteSettings) -> Result<KiteClient> {
    let credentials = credentials(settings)?;
    let mut client = build_client(settings, &credentials)?;

    if client.access_token().is_none() {
        session::login(&mut client, &credentials, settings).await?;
    }
    Ok(client)
}

#[cfg(test)]
pub(crate) mod testing {
    use async_trait::async_trait;
    use kite_core::error::KiteError;
    use kite_core::traits::Broker;
    use kite_core::types::{AllMargins, Holdings, Positions, UserProfile};

    /// Broker returning fixed data.
    #[derive(Default)]
    pub struct StaticBroker {
        pub holdings: Holdings,
        pub positions: Positions,
        pub profile: UserProfile,
        pub margins: AllMargins,
        pub fail_with: Option<String>,
    }

    impl StaticBroker {
        fn check(&self) -> Result<(), KiteError> {
            match &self.fail_with {
                Some(message) => Err(KiteError::api("TokenException", message.clone())),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl Broker for StaticBroker {
        async fn get_holdings(&self) -> Result<Holdings, KiteError> {
            self.check()?;
            Ok(self.holdings.clone())
        }

        async fn get_positions(&self) -> Result<Positions, KiteError> {
            self.check()?;
            Ok(self.positions.clone())
        }

        async fn get_user_profile(&self) -> Result<UserProfile, KiteError> {
            self.check()?;
            Ok(self.profile.clone())
        }

        async fn get_user_margins(&self) -> Result<AllMargins, KiteError> {
            self.check()?;
            Ok(self.margins.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(tag: &str) -> KiteSettings {
        KiteSettings {
            api_key_env: format!("KITE_CMD_TEST_KEY_{}", tag),
            api_secret_env: format!("KITE_CMD_TEST_SECRET_{}", tag),
            access_token_env: format!("KITE_CMD_TEST_TOKEN_{}", tag),
            // Not a bindable address, so any login attempt fails.
            callback_addr: "no-port".to_string(),
            ..KiteSettings::default()
        }
    }

    #[test]
    fn test_build_client_adopts_env_token() {
        let settings = settings("b71f");
        std::env::set_var(&settings.api_key_env, "key1");
        std::env::set_var(&settings.api_secret_env, "secret1");
        std::env::set_var(&settings.access_token_env, "tok1");

        let creds = credentials(&settings).unwrap();
        let client = build_client(&settings, &creds).unwrap();
        assert_eq!(client.api_key(), "key1");
        assert_eq!(client.access_token(), Some("tok1"));
    }

    #[tokio::test]
    async fn test_connect_with_env_token_skips_login() {
        let settings = settings("c42a");
        std::env::set_var(&settings.api_key_env, "key1");
        std::env::set_var(&settings.api_secret_env, "secret1");
        std::env::set_var(&settings.access_token_env, "tok1");

        let client = connect(&settings).await.unwrap();
        assert_eq!(client.access_token(), Some("tok1"));
    }

    #[tokio::test]
    async fn test_connect_without_token_starts_login() {
        let settings = settings("e08d");
        std::env::set_var(&settings.api_key_env, "key1");
        std::env::set_var(&settings.api_secret_env, "secret1");

        let err = connect(&settings).await.unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to start login callback listener"));
    }
}
