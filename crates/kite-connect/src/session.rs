//! Session exchange, renewal and invalidation.

use kite_core::error::KiteError;
use kite_core::types::{UserSession, UserSessionTokens};
use reqwest::Method;
use tracing::info;

use crate::auth::checksum;
use crate::client::{KiteClient, URI_USER_SESSION, URI_USER_SESSION_RENEW};

impl KiteClient {
    /// Exchange a one-time request token for a session.
    ///
    /// On success the returned access token is adopted by the client. A
    /// fabricated token or a wrong secret is rejected remotely with a
    /// `TokenException`.
    pub async fn generate_session(
        &mut self,
        request_token: &str,
        api_secret: &str,
    ) -> Result<UserSession, KiteError> {
        if request_token.trim().is_empty() {
            return Err(KiteError::Input("request token is empty".into()));
        }

        let params = [
            ("api_key", self.api_key().to_string()),
            ("request_token", request_token.to_string()),
            ("checksum", checksum(self.api_key(), request_token, api_secret)),
        ];

        let session: UserSession = self
            .do_envelope(Method::POST, URI_USER_SESSION, Some(&params[..]))
            .await?;

        if !session.access_token().is_empty() {
            self.set_access_token(session.access_token());
        }

        info!("Session created for user {}", session.tokens.user_id);
        Ok(session)
    }

    /// Mint a new access token from a refresh token without logging in again.
    pub async fn renew_access_token(
        &mut self,
        refresh_token: &str,
        api_secret: &str,
    ) -> Result<UserSessionTokens, KiteError> {
        if refresh_token.trim().is_empty() {
            return Err(KiteError::Input("refresh token is empty".into()));
        }

        let params = [
            ("api_key", self.api_key().to_string()),
            ("refresh_token", refresh_token.to_string()),
            ("checksum", checksum(self.api_key(), refresh_token, api_secret)),
        ];

        let tokens: UserSessionTokens = self
            .do_envelope(Method::POST, URI_USER_SESSION_RENEW, Some(&params[..]))
            .await?;

        if !tokens.access_token.is_empty() {
            self.set_access_token(tokens.access_token.clone());
        }

        info!("Access token renewed for user {}", tokens.user_id);
        Ok(tokens)
    }

    /// Invalidate the current access token (logout).
    pub async fn invalidate_access_token(&mut self) -> Result<bool, KiteError> {
        let token = self
            .access_token()
            .ok_or_else(|| KiteError::Input("no access token set".into()))?
            .to_string();

        let invalidated = self.invalidate_token("access_token", &token).await?;
        self.clear_access_token();
        info!("Access token invalidated");
        Ok(invalidated)
    }

    /// Invalidate a refresh token.
    pub async fn invalidate_refresh_token(&self, refresh_token: &str) -> Result<bool, KiteError> {
        if refresh_token.trim().is_empty() {
            return Err(KiteError::Input("refresh token is empty".into()));
        }
        let invalidated = self.invalidate_token("refresh_token", refresh_token).await?;
        info!("Refresh token invalidated");
        Ok(invalidated)
    }

    async fn invalidate_token(&self, token_type: &str, token: &str) -> Result<bool, KiteError> {
        let params = [
            ("api_key", self.api_key().to_string()),
            (token_type, token.to_string()),
        ];
        self.do_envelope(Method::DELETE, URI_USER_SESSION, Some(&params[..]))
            .await
    }
}
