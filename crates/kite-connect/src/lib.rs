//! Kite Connect REST API client.
//!
//! All calls go through a single request envelope that attaches the
//! `token api_key:access_token` authorization header and decodes the uniform
//! `{status, data}` / `{status, error_type, message}` response.

mod auth;
mod callback;
mod client;
mod config;
mod envelope;
mod portfolio;
mod session;
mod user;

#[cfg(test)]
mod testing;

pub use auth::checksum;
pub use callback::{CallbackListener, DEFAULT_CALLBACK_ADDR, DEFAULT_CALLBACK_PATH};
pub use client::KiteClient;
pub use config::{Credentials, KiteConfig, DEFAULT_BASE_URL, DEFAULT_LOGIN_URL, DEFAULT_TIMEOUT};
pub use envelope::decode_envelope;
