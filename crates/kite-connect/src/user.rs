//! User accessors beyond the `Broker` trait.

use kite_core::error::KiteError;
use kite_core::types::Margins;

use crate::client::{KiteClient, URI_USER_MARGINS};

impl KiteClient {
    /// Get margins for a single segment (`equity` or `commodity`).
    pub async fn get_user_segment_margins(&self, segment: &str) -> Result<Margins, KiteError> {
        let segment = segment.trim().to_lowercase();
        if segment.is_empty() || !segment.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(KiteError::Input(format!("invalid margin segment: {:?}", segment)));
        }

        let mut margins: Margins = self.get(&format!("{}/{}", URI_USER_MARGINS, segment)).await?;
        margins.category = segment;
        Ok(margins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KiteConfig;
    use crate::testing::MockServer;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_segment_margins_sets_category() {
        let server = MockServer::start(vec![(
            200,
            r#"{"status": "success", "data": {"enabled": true, "net": 99.5, "available": {"cash": 100}, "utilised": {"debits": 0.5}}}"#
                .to_string(),
        )])
        .await;
        let client = KiteClient::with_access_token(
            KiteConfig::new("k").with_base_url(server.url()),
            "t",
        )
        .unwrap();

        let margins = client.get_user_segment_margins("Equity").await.unwrap();
        assert_eq!(margins.category, "equity");
        assert_eq!(margins.net, dec!(99.5));
        assert_eq!(margins.available.cash, dec!(100));
        assert_eq!(margins.used.debits, dec!(0.5));

        let requests = server.finish().await;
        assert_eq!(requests[0].target, "/user/margins/equity");
    }

    #[tokio::test]
    async fn test_segment_must_be_a_plain_word() {
        let client = KiteClient::new(KiteConfig::new("k")).unwrap();
        let err = client.get_user_segment_margins("../orders").await.unwrap_err();
        assert!(matches!(err, KiteError::Input(_)));
    }
}
