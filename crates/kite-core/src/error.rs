//! Error types for the Kite Connect client.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Top-level client error.
#[derive(Error, Debug)]
pub enum KiteError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Request parameters could not be built or failed local validation.
    #[error("Input error: {0}")]
    Input(String),

    /// The remote envelope declared failure.
    #[error("{kind}: {message}")]
    Api { kind: ErrorKind, message: String },

    #[error("Network error: {0}")]
    Network(String),

    /// A success envelope carried data that did not match the destination type.
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Login callback error: {0}")]
    Callback(#[from] CallbackError),
}

impl KiteError {
    /// Build an API error from the remote `error_type` field.
    pub fn api(error_type: &str, message: impl Into<String>) -> Self {
        Self::Api {
            kind: ErrorKind::from_error_type(error_type),
            message: message.into(),
        }
    }

    /// Remote error category, if this error came from the API.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Api { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// True when the remote rejected the credentials or token.
    pub fn is_token_error(&self) -> bool {
        self.kind() == Some(ErrorKind::Token)
    }
}

/// Remote error categories declared in the envelope `error_type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    General,
    Token,
    Permission,
    User,
    TwoFa,
    Order,
    Input,
    Network,
    Data,
}

impl ErrorKind {
    /// Map an envelope `error_type` such as `TokenException`.
    ///
    /// Unknown categories fall back to [`ErrorKind::General`].
    pub fn from_error_type(error_type: &str) -> Self {
        match error_type {
            "TokenException" => Self::Token,
            "PermissionException" => Self::Permission,
            "UserException" => Self::User,
            "TwoFAException" => Self::TwoFa,
            "OrderException" => Self::Order,
            "InputException" => Self::Input,
            "NetworkException" => Self::Network,
            "DataException" => Self::Data,
            _ => Self::General,
        }
    }

    /// Classify an error response that carried no `error_type`.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 => Self::Input,
            403 => Self::Token,
            429 | 502..=504 => Self::Network,
            _ => Self::General,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "GeneralException",
            Self::Token => "TokenException",
            Self::Permission => "PermissionException",
            Self::User => "UserException",
            Self::TwoFa => "TwoFAException",
            Self::Order => "OrderException",
            Self::Input => "InputException",
            Self::Network => "NetworkException",
            Self::Data => "DataException",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures of the one-shot login callback listener.
#[derive(Error, Debug)]
pub enum CallbackError {
    #[error("failed to bind callback listener on {addr}: {reason}")]
    Bind { addr: String, reason: String },

    #[error("callback request has no request_token parameter")]
    MissingToken,

    #[error("no login callback received within {0:?}")]
    Timeout(Duration),

    #[error("callback listener stopped before a login redirect arrived")]
    Stopped,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
