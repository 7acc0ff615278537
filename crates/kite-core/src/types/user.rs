//! Session, profile and margin types.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::time;

/// Result of a successful request token exchange.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserSession {
    #[serde(flatten)]
    pub profile: UserProfile,
    #[serde(flatten)]
    pub tokens: UserSessionTokens,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub public_token: String,
    #[serde(default, with = "time::optional")]
    pub login_time: Option<NaiveDateTime>,
}

impl UserSession {
    pub fn access_token(&self) -> &str {
        &self.tokens.access_token
    }
}

/// Tokens returned by a session exchange or an access token renewal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSessionTokens {
    pub user_id: String,
    pub access_token: String,
    pub refresh_token: String,
}

/// A user's personal and account profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub user_name: String,
    #[serde(rename = "user_shortname")]
    pub user_short_name: String,
    pub avatar_url: Option<String>,
    pub user_type: String,
    pub email: String,
    pub phone: String,
    pub broker: String,
    pub products: Vec<String>,
    pub order_types: Vec<String>,
    pub exchanges: Vec<String>,
}

impl fmt::Display for UserProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "UserName: {}", self.user_name)?;
        writeln!(f, "UserShortName: {}", self.user_short_name)?;
        writeln!(f, "AvatarURL: {}", self.avatar_url.as_deref().unwrap_or(""))?;
        writeln!(f, "UserType: {}", self.user_type)?;
        writeln!(f, "Email: {}", self.email)?;
        writeln!(f, "Phone: {}", self.phone)?;
        writeln!(f, "Broker: {}", self.broker)?;
        writeln!(f, "Products: [{}]", self.products.join(" "))?;
        writeln!(f, "OrderTypes: [{}]", self.order_types.join(" "))?;
        writeln!(f, "Exchanges: [{}]", self.exchanges.join(" "))
    }
}

/// Margins for a single segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    /// Segment name; set locally when a single segment is requested.
    #[serde(skip)]
    pub category: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub net: Decimal,
    #[serde(default)]
    pub available: AvailableMargins,
    #[serde(default, rename = "utilised")]
    pub used: UsedMargins,
}

impl fmt::Display for Margins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.category.is_empty() {
            writeln!(f, "Segment:\t{}", self.category)?;
        }
        writeln!(f, "Enabled:\t{}", self.enabled)?;
        writeln!(f, "Net Margin:\t{}", self.net)?;
        writeln!(f, "Available:\t{}", self.available)?;
        writeln!(f, "Used Margin:\t{}", self.used)
    }
}

/// Available margin components of a segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailableMargins {
    pub adhoc_margin: Decimal,
    pub cash: Decimal,
    pub collateral: Decimal,
    pub intraday_payin: Decimal,
}

impl fmt::Display for AvailableMargins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Adhoc: {}, Cash: {}, Collateral: {}, IntradayPayin: {}",
            self.adhoc_margin, self.cash, self.collateral, self.intraday_payin
        )
    }
}

/// Utilised margin components of a segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsedMargins {
    pub debits: Decimal,
    pub exposure: Decimal,
    pub m2m_realised: Decimal,
    pub m2m_unrealised: Decimal,
    pub option_premium: Decimal,
    pub payout: Decimal,
    pub span: Decimal,
    pub holding_sales: Decimal,
    pub turnover: Decimal,
}

impl fmt::Display for UsedMargins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "debits: {}, exposure: {}, m2m_realised: {}, m2m_unrealised: {}, option_premium: {}, payout: {}, span: {}, holding_sales: {}, turnover: {}",
            self.debits,
            self.exposure,
            self.m2m_realised,
            self.m2m_unrealised,
            self.option_premium,
            self.payout,
            self.span,
            self.holding_sales,
            self.turnover
        )
    }
}

/// Equity and commodity margins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllMargins {
    pub equity: Margins,
    pub commodity: Margins,
}

impl fmt::Display for AllMargins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Equity:")?;
        writeln!(f, "{}", self.equity)?;
        writeln!(f, "Commodity:")?;
        write!(f, "{}", self.commodity)
    }
}
