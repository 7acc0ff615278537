//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use kite_core::types::{PositionType, TransactionType};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kite")]
#[command(author, version, about = "Command-line client for the Kite Connect trading API")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (overrides the configuration file)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// User related commands
    #[command(alias = "u", subcommand)]
    User(UserCommands),
    /// Portfolio related commands
    #[command(alias = "p", subcommand)]
    Portfolio(PortfolioCommands),
    /// Session management
    #[command(alias = "s", subcommand)]
    Session(SessionCommands),
    /// Validate configuration
    ValidateConfig,
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Show the margins
    #[command(alias = "m")]
    Margin {
        /// Only show one segment (equity or commodity)
        #[arg(short, long)]
        segment: Option<String>,
    },
    /// Show the profile
    #[command(alias = "p")]
    Profile,
}

#[derive(Subcommand)]
pub enum PortfolioCommands {
    /// Show the holdings
    #[command(alias = "h")]
    Holdings,
    /// Show the positions
    #[command(alias = "p")]
    Positions,
    /// Convert a position's product type
    #[command(alias = "c")]
    Convert(ConvertArgs),
}

#[derive(clap::Args)]
pub struct ConvertArgs {
    /// Exchange (e.g. NSE)
    #[arg(long)]
    pub exchange: String,

    /// Trading symbol
    #[arg(long)]
    pub symbol: String,

    /// Current product (e.g. MIS)
    #[arg(long)]
    pub old_product: String,

    /// Target product (e.g. CNC)
    #[arg(long)]
    pub new_product: String,

    /// day or overnight
    #[arg(long, default_value = "day")]
    pub position_type: PositionType,

    /// BUY or SELL
    #[arg(long)]
    pub transaction_type: TransactionType,

    /// Quantity to convert
    #[arg(long)]
    pub quantity: i64,
}

#[derive(Subcommand)]
pub enum SessionCommands {
    /// Log in through the browser and print the access token
    Login,
    /// Mint a new access token from a refresh token
    Renew {
        #[arg(long, env = "KITE_REFRESH_TOKEN")]
        refresh_token: String,
    },
    /// Invalidate the current access token
    Logout,
    /// Invalidate a refresh token
    Revoke {
        #[arg(long, env = "KITE_REFRESH_TOKEN")]
        refresh_token: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_margin_segment() {
        let cli = Cli::try_parse_from(["kite", "user", "margin", "--segment", "equity"]).unwrap();
        match cli.command {
            Commands::User(UserCommands::Margin { segment }) => {
                assert_eq!(segment.as_deref(), Some("equity"))
            }
            _ => panic!("wrong command"),
        }
    }

    #[test]
    fn test_aliases() {
        let cli = Cli::try_parse_from(["kite", "p", "h"]).unwrap();
        assert!(matches!(cli.command, Commands::Portfolio(PortfolioCommands::Holdings)));

        let cli = Cli::try_parse_from(["kite", "u", "p"]).unwrap();
        assert!(matches!(cli.command, Commands::User(UserCommands::Profile)));
    }

    #[test]
    fn test_parse_convert() {
        let cli = Cli::try_parse_from([
            "kite", "portfolio", "convert", "--exchange", "NSE", "--symbol", "INFY",
            "--old-product", "MIS", "--new-product", "CNC", "--transaction-type", "buy",
            "--quantity", "5",
        ])
        .unwrap();
        match cli.command {
            Commands::Portfolio(PortfolioCommands::Convert(args)) => {
                assert_eq!(args.position_type, PositionType::Day);
                assert_eq!(args.transaction_type, TransactionType::Buy);
                assert_eq!(args.quantity, 5);
            }
            _ => panic!("wrong command"),
        }
    }

    #[test]
    fn test_rejects_unknown_transaction_type() {
        let result = Cli::try_parse_from([
            "kite", "portfolio", "convert", "--exchange", "NSE", "--symbol", "INFY",
            "--old-product", "MIS", "--new-product", "CNC", "--transaction-type", "hold",
            "--quantity", "5",
        ]);
        assert!(result.is_err());
    }
}
