//! Kite Connect HTTP client and the request envelope.

use std::fmt;

use async_trait::async_trait;
use kite_core::error::KiteError;
use kite_core::traits::Broker;
use kite_core::types::{AllMargins, Holdings, Margins, Positions, UserProfile};
use reqwest::{header, Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::config::KiteConfig;
use crate::envelope::decode_envelope;

const KITE_VERSION: &str = "3";
const USER_AGENT: &str = concat!("kite-cli/", env!("CARGO_PKG_VERSION"));

pub(crate) const URI_USER_SESSION: &str = "/session/token";
pub(crate) const URI_USER_SESSION_RENEW: &str = "/session/refresh_token";
pub(crate) const URI_USER_PROFILE: &str = "/user/profile";
pub(crate) const URI_USER_MARGINS: &str = "/user/margins";
pub(crate) const URI_PORTFOLIO_HOLDINGS: &str = "/portfolio/holdings";
pub(crate) const URI_PORTFOLIO_POSITIONS: &str = "/portfolio/positions";

/// Kite Connect API client.
///
/// Owns the API key, the current access token and the HTTP connection pool.
/// Operations that change the session take `&mut self`.
pub struct KiteClient {
    pub(crate) config: KiteConfig,
    base_url: String,
    login_url: Url,
    access_token: Option<String>,
    http: Client,
}

impl KiteClient {
    /// Create a new client.
    pub fn new(config: KiteConfig) -> Result<Self, KiteError> {
        if config.api_key.trim().is_empty() {
            return Err(KiteError::Configuration("api key is empty".into()));
        }

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| {
                KiteError::Configuration(format!("invalid base url {}: {}", config.base_url, e))
            })?
            .as_str()
            .trim_end_matches('/')
            .to_string();
        let login_url = Url::parse(&config.login_url).map_err(|e| {
            KiteError::Configuration(format!("invalid login url {}: {}", config.login_url, e))
        })?;

        let mut headers = header::HeaderMap::new();
        headers.insert("X-Kite-Version", header::HeaderValue::from_static(KITE_VERSION));

        let http = Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| KiteError::Configuration(e.to_string()))?;

        Ok(Self {
            config,
            base_url,
            login_url,
            access_token: None,
            http,
        })
    }

    /// Create a client that already holds an access token.
    pub fn with_access_token(
        config: KiteConfig,
        access_token: impl Into<String>,
    ) -> Result<Self, KiteError> {
        let mut client = Self::new(config)?;
        client.set_access_token(access_token);
        Ok(client)
    }

    pub fn api_key(&self) -> &str {
        &self.config.api_key
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Set the access token used by all subsequent requests.
    pub fn set_access_token(&mut self, access_token: impl Into<String>) {
        self.access_token = Some(access_token.into());
    }

    pub(crate) fn clear_access_token(&mut self) {
        self.access_token = None;
    }

    /// Browser login page that redirects back with a request token.
    pub fn login_url(&self) -> String {
        let mut url = self.login_url.clone();
        url.query_pairs_mut()
            .append_pair("api_key", &self.config.api_key)
            .append_pair("v", KITE_VERSION);
        url.to_string()
    }

    /// Perform one authenticated request and decode its envelope into `T`.
    ///
    /// GET and DELETE parameters are sent in the query string, everything
    /// else as a urlencoded form body.
    pub(crate) async fn do_envelope<T, P>(
        &self,
        method: Method,
        path: &str,
        params: Option<&P>,
    ) -> Result<T, KiteError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, path);

        let mut request = self.http.request(method.clone(), &url);

        if let Some(token) = &self.access_token {
            request = request.header(
                header::AUTHORIZATION,
                format!("token {}:{}", self.config.api_key, token),
            );
        }

        if let Some(params) = params {
            request = if method == Method::GET || method == Method::DELETE {
                request.query(params)
            } else {
                request.form(params)
            };
        }

        let resp = request.send().await.map_err(|e| {
            if e.is_builder() {
                KiteError::Input(format!("could not encode request parameters: {}", e))
            } else {
                KiteError::Network(e.to_string())
            }
        })?;

        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .await
            .map_err(|e| KiteError::Network(e.to_string()))?;

        debug!("{} {} -> {}", method, path, status);
        decode_envelope(status, &body)
    }

    /// GET without parameters.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, KiteError> {
        self.do_envelope::<T, ()>(Method::GET, path, None).await
    }
}

impl fmt::Debug for KiteClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KiteClient")
            .field("api_key", &self.config.api_key)
            .field("base_url", &self.base_url)
            .field("authenticated", &self.access_token.is_some())
            .finish()
    }
}

#[async_trait]
impl Broker for KiteClient {
    async fn get_holdings(&self) -> Result<Holdings, KiteError> {
        self.get(URI_PORTFOLIO_HOLDINGS).await
    }

    async fn get_positions(&self) -> Result<Positions, KiteError> {
        self.get(URI_PORTFOLIO_POSITIONS).await
    }

    async fn get_user_profile(&self) -> Result<UserProfile, KiteError> {
        self.get(URI_USER_PROFILE).await
    }

    async fn get_user_margins(&self) -> Result<AllMargins, KiteError> {
        self.get(URI_USER_MARGINS).await
    }

    async fn get_user_segment_margins(&self, segment: &str) -> Result<Margins, KiteError> {
        KiteClient::get_user_segment_margins(self, segment).await
    }
}
