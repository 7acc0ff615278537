//! Session commands and the interactive browser login.

use anyhow::{bail, Context, Result};
use kite_config::KiteSettings;
use kite_connect::{CallbackListener, Credentials, KiteClient};
use kite_core::types::UserSession;
use std::time::Duration;
use tracing::info;

use crate::cli::SessionCommands;

pub async fn run(command: SessionCommands, settings: &KiteSettings) -> Result<()> {
    let credentials = super::credentials(settings)?;
    let mut client = super::build_client(settings, &credentials)?;

    match command {
        SessionCommands::Login => {
            login(&mut client, &credentials, settings).await?;
        }
        SessionCommands::Renew { refresh_token } => {
            let tokens = client
                .renew_access_token(&refresh_token, &credentials.api_secret)
                .await
                .context("Failed to renew access token")?;
            println!("Access token renewed for {}", tokens.user_id);
            print_export(&settings.access_token_env, &tokens.access_token);
        }
        SessionCommands::Logout => {
            if client.access_token().is_none() {
                bail!("{} is not set; nothing to log out", settings.access_token_env);
            }
            client
                .invalidate_access_token()
                .await
                .context("Failed to invalidate access token")?;
            println!("Logged out. Unset {} before the next run.", settings.access_token_env);
        }
        SessionCommands::Revoke { refresh_token } => {
            client
                .invalidate_refresh_token(&refresh_token)
                .await
                .context("Failed to invalidate refresh token")?;
            println!("Refresh token invalidated.");
        }
    }

    Ok(())
}

/// Run the browser login and exchange the request token for a session.
///
/// The callback listener is bound before the login URL is shown and is
/// released as soon as one redirect has been handled or the wait times out.
pub async fn login(
    client: &mut KiteClient,
    credentials: &Credentials,
    settings: &KiteSettings,
) -> Result<UserSession> {
    let listener = CallbackListener::bind(&settings.callback_addr, settings.callback_path.clone())
        .await
        .context("Failed to start login callback listener")?;

    println!("Open the following url in your browser:\n{}", client.login_url());
    info!(
        "Waiting up to {}s for the login redirect on {}{}",
        settings.callback_timeout_secs, settings.callback_addr, settings.callback_path
    );

    let request_token = listener
        .accept_request_token(Duration::from_secs(settings.callback_timeout_secs))
        .await
        .context("Login did not complete")?;

    let session = client
        .generate_session(&request_token, &credentials.api_secret)
        .await
        .context("Failed to generate session")?;

    println!("Logged in as {} ({})", session.profile.user_name, session.tokens.user_id);
    println!("please run the following to avoid creating new session next time:");
    print_export(&settings.access_token_env, session.access_token());

    Ok(session)
}

fn print_export(var: &str, token: &str) {
    println!("export {}={}", var, token);
}
