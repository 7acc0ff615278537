//! Portfolio accessors beyond the `Broker` trait.

use kite_core::error::KiteError;
use kite_core::types::ConvertPositionParams;
use reqwest::Method;
use tracing::info;

use crate::client::{KiteClient, URI_PORTFOLIO_POSITIONS};

impl KiteClient {
    /// Convert a position's product type, e.g. intraday (MIS) to delivery (CNC).
    pub async fn convert_position(
        &self,
        params: &ConvertPositionParams,
    ) -> Result<bool, KiteError> {
        params.validate()?;

        let converted: bool = self
            .do_envelope(Method::PUT, URI_PORTFOLIO_POSITIONS, Some(params))
            .await?;

        info!(
            "Position converted: {} {} {} -> {}",
            params.exchange, params.trading_symbol, params.old_product, params.new_product
        );
        Ok(converted)
    }
}
