//! User commands.

use anyhow::{Context, Result};
use kite_config::KiteSettings;
use kite_core::traits::Broker;

use crate::cli::UserCommands;

pub async fn run(command: UserCommands, settings: &KiteSettings) -> Result<()> {
    let client = super::connect(settings).await?;
    let output = match command {
        UserCommands::Margin { segment } => margins(&client, segment.as_deref()).await?,
        UserCommands::Profile => profile(&client).await?,
    };
    println!("{}", output);
    Ok(())
}

/// Render all margins, or a single segment.
pub async fn margins(broker: &dyn Broker, segment: Option<&str>) -> Result<String> {
    match segment {
        Some(segment) => {
            let margins = broker
                .get_user_segment_margins(segment)
                .await
                .with_context(|| format!("Failed to fetch {} margins", segment))?;
            Ok(margins.to_string())
        }
        None => {
            let margins = broker
                .get_user_margins()
                .await
                .context("Failed to fetch margins")?;
            Ok(margins.to_string())
        }
    }
}

pub async fn profile(broker: &dyn Broker) -> Result<String> {
    let profile = broker
        .get_user_profile()
        .await
        .context("Failed to fetch profile")?;
    Ok(profile.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::testing::StaticBroker;
    use kite_core::types::{AllMargins, Margins, UserProfile};
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_segment_margins_output() {
        let broker = StaticBroker {
            margins: AllMargins {
                equity: Margins { enabled: true, net: dec!(1500.25), ..Default::default() },
                commodity: Margins { net: dec!(7), ..Default::default() },
            },
            ..Default::default()
        };

        let out = margins(&broker, Some("equity")).await.unwrap();
        assert!(out.contains("Segment:\tequity"));
        assert!(out.contains("Net Margin:\t1500.25"));

        let all = margins(&broker, None).await.unwrap();
        assert!(all.starts_with("Equity:"));
        assert!(all.contains("Commodity:"));
        assert!(all.contains("Net Margin:\t7"));
    }

    #[tokio::test]
    async fn test_unknown_segment_is_rejected() {
        let broker = StaticBroker::default();
        assert!(margins(&broker, Some("forex")).await.is_err());
    }

    #[tokio::test]
    async fn test_profile_error_carries_remote_message() {
        let broker = StaticBroker {
            profile: UserProfile { user_name: "Jane".into(), ..Default::default() },
            fail_with: Some("Token is invalid or has expired.".into()),
            ..Default::default()
        };
        let err = profile(&broker).await.unwrap_err();
        assert!(format!("{:#}", err).contains("Token is invalid or has expired."));
    }
}
