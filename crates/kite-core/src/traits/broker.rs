//! Broker trait definition.

use crate::error::KiteError;
use crate::types::{AllMargins, Holdings, Margins, Positions, UserProfile};
use async_trait::async_trait;

/// Read-only account access.
///
/// Every call is a single idempotent request; implementations do not retry.
#[async_trait]
pub trait Broker: Send + Sync {
    /// Get long-term holdings.
    async fn get_holdings(&self) -> Result<Holdings, KiteError>;

    /// Get net and day positions.
    async fn get_positions(&self) -> Result<Positions, KiteError>;

    /// Get the authenticated user's profile.
    async fn get_user_profile(&self) -> Result<UserProfile, KiteError>;

    /// Get equity and commodity margins.
    async fn get_user_margins(&self) -> Result<AllMargins, KiteError>;

    /// Get margins for a single segment.
    ///
    /// # Arguments
    /// * `segment` - `equity` or `commodity`
    async fn get_user_segment_margins(&self, segment: &str) -> Result<Margins, KiteError> {
        let all = self.get_user_margins().await?;
        let mut margins = match segment {
            "equity" => all.equity,
            "commodity" => all.commodity,
            other => return Err(KiteError::Input(format!("unknown segment: {}", other))),
        };
        margins.category = segment.to_string();
        Ok(margins)
    }
}
