//! Portfolio commands.

use anyhow::{Context, Result};
use kite_config::KiteSettings;
use kite_core::traits::Broker;
use kite_core::types::ConvertPositionParams;

use crate::cli::{ConvertArgs, PortfolioCommands};

pub async fn run(command: PortfolioCommands, settings: &KiteSettings) -> Result<()> {
    let client = super::connect(settings).await?;
    let output = match command {
        PortfolioCommands::Holdings => holdings(&client).await?,
        PortfolioCommands::Positions => positions(&client).await?,
        PortfolioCommands::Convert(args) => {
            let params = convert_params(args);
            client
                .convert_position(&params)
                .await
                .context("Failed to convert position")?;
            format!(
                "Converted {} {} {} from {} to {}",
                params.quantity,
                params.exchange,
                params.trading_symbol,
                params.old_product,
                params.new_product
            )
        }
    };
    println!("{}", output);
    Ok(())
}

pub async fn holdings(broker: &dyn Broker) -> Result<String> {
    let holdings = broker
        .get_holdings()
        .await
        .context("Failed to fetch holdings")?;

    if holdings.is_empty() {
        return Ok("No holdings".to_string());
    }
    Ok(format!(
        "{}Total P&L: {}",
        holdings,
        holdings.total_pnl()
    ))
}

pub async fn positions(broker: &dyn Broker) -> Result<String> {
    let positions = broker
        .get_positions()
        .await
        .context("Failed to fetch positions")?;
    Ok(positions.to_string())
}

fn convert_params(args: ConvertArgs) -> ConvertPositionParams {
    ConvertPositionParams {
        exchange: args.exchange.to_uppercase(),
        trading_symbol: args.symbol.to_uppercase(),
        old_product: args.old_product.to_uppercase(),
        new_product: args.new_product.to_uppercase(),
        position_type: args.position_type,
        transaction_type: args.transaction_type,
        quantity: args.quantity,
    }
}
