//! Holdings and positions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::KiteError;

/// A single long-term holding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Holding {
    #[serde(rename = "tradingsymbol")]
    pub trading_symbol: String,
    pub exchange: String,
    pub instrument_token: u32,
    pub isin: String,
    pub product: String,

    pub price: Decimal,
    pub quantity: i64,
    pub t1_quantity: i64,
    pub realised_quantity: i64,
    pub collateral_quantity: i64,
    pub collateral_type: String,

    pub average_price: Decimal,
    pub last_price: Decimal,
    pub close_price: Decimal,
    pub pnl: Decimal,
    pub day_change: Decimal,
    pub day_change_percentage: Decimal,
}

impl fmt::Display for Holding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tradingsymbol: {}", self.trading_symbol)?;
        writeln!(f, "Exchange: {}", self.exchange)?;
        writeln!(f, "InstrumentToken: {}", self.instrument_token)?;
        writeln!(f, "ISIN: {}", self.isin)?;
        writeln!(f, "Product: {}", self.product)?;
        writeln!(f, "Price: {}", self.price)?;
        writeln!(f, "Quantity: {}", self.quantity)?;
        writeln!(f, "T1Quantity: {}", self.t1_quantity)?;
        writeln!(f, "RealisedQuantity: {}", self.realised_quantity)?;
        writeln!(f, "CollateralQuantity: {}", self.collateral_quantity)?;
        writeln!(f, "CollateralType: {}", self.collateral_type)?;
        writeln!(f, "AveragePrice: {}", self.average_price)?;
        writeln!(f, "LastPrice: {}", self.last_price)?;
        writeln!(f, "ClosePrice: {}", self.close_price)?;
        writeln!(f, "PnL: {}", self.pnl)?;
        writeln!(f, "DayChange: {}", self.day_change)?;
        writeln!(f, "DayChangePercentage: {}", self.day_change_percentage)
    }
}

/// All holdings of the account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Holdings(pub Vec<Holding>);

impl Holdings {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Holding> {
        self.0.iter()
    }

    /// Total unrealised P&L across holdings.
    pub fn total_pnl(&self) -> Decimal {
        self.0.iter().map(|h| h.pnl).sum()
    }
}

impl fmt::Display for Holdings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for holding in &self.0 {
            writeln!(f, "{}", holding)?;
        }
        Ok(())
    }
}

/// A net or day position in an instrument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Position {
    #[serde(rename = "tradingsymbol")]
    pub trading_symbol: String,
    pub exchange: String,
    pub instrument_token: u32,
    pub product: String,

    pub quantity: i64,
    pub overnight_quantity: i64,
    pub multiplier: Decimal,

    pub average_price: Decimal,
    pub close_price: Decimal,
    pub last_price: Decimal,
    pub value: Decimal,
    pub pnl: Decimal,
    pub m2m: Decimal,
    pub unrealised: Decimal,
    pub realised: Decimal,

    pub buy_quantity: i64,
    pub buy_price: Decimal,
    pub buy_value: Decimal,
    #[serde(rename = "buy_m2m")]
    pub buy_m2m_value: Decimal,

    pub sell_quantity: i64,
    pub sell_price: Decimal,
    pub sell_value: Decimal,
    #[serde(rename = "sell_m2m")]
    pub sell_m2m_value: Decimal,

    pub day_buy_quantity: i64,
    pub day_buy_price: Decimal,
    pub day_buy_value: Decimal,

    pub day_sell_quantity: i64,
    pub day_sell_price: Decimal,
    pub day_sell_value: Decimal,
}

impl Position {
    pub fn is_flat(&self) -> bool {
        self.quantity == 0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tradingsymbol: {}", self.trading_symbol)?;
        writeln!(f, "Exchange: {}", self.exchange)?;
        writeln!(f, "InstrumentToken: {}", self.instrument_token)?;
        writeln!(f, "Product: {}", self.product)?;
        writeln!(f, "Quantity: {}", self.quantity)?;
        writeln!(f, "OvernightQuantity: {}", self.overnight_quantity)?;
        writeln!(f, "Multiplier: {}", self.multiplier)?;
        writeln!(f, "AveragePrice: {}", self.average_price)?;
        writeln!(f, "ClosePrice: {}", self.close_price)?;
        writeln!(f, "LastPrice: {}", self.last_price)?;
        writeln!(f, "Value: {}", self.value)?;
        writeln!(f, "PnL: {}", self.pnl)?;
        writeln!(f, "M2M: {}", self.m2m)?;
        writeln!(f, "Unrealised: {}", self.unrealised)?;
        writeln!(f, "Realised: {}", self.realised)?;
        writeln!(f, "BuyQuantity: {}", self.buy_quantity)?;
        writeln!(f, "BuyPrice: {}", self.buy_price)?;
        writeln!(f, "BuyValue: {}", self.buy_value)?;
        writeln!(f, "BuyM2MValue: {}", self.buy_m2m_value)?;
        writeln!(f, "SellQuantity: {}", self.sell_quantity)?;
        writeln!(f, "SellPrice: {}", self.sell_price)?;
        writeln!(f, "SellValue: {}", self.sell_value)?;
        writeln!(f, "SellM2MValue: {}", self.sell_m2m_value)?;
        writeln!(f, "DayBuyQuantity: {}", self.day_buy_quantity)?;
        writeln!(f, "DayBuyPrice: {}", self.day_buy_price)?;
        writeln!(f, "DayBuyValue: {}", self.day_buy_value)?;
        writeln!(f, "DaySellQuantity: {}", self.day_sell_quantity)?;
        writeln!(f, "DaySellPrice: {}", self.day_sell_price)?;
        writeln!(f, "DaySellValue: {}", self.day_sell_value)
    }
}

/// Net and day positions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Positions {
    pub net: Vec<Position>,
    pub day: Vec<Position>,
}

impl fmt::Display for Positions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Net:")?;
        for position in &self.net {
            writeln!(f, "{}", position)?;
        }
        writeln!(f, "Day:")?;
        for position in &self.day {
            writeln!(f, "{}", position)?;
        }
        Ok(())
    }
}

/// Position type for a product conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionType {
    Day,
    Overnight,
}

impl FromStr for PositionType {
    type Err = KiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "overnight" => Ok(Self::Overnight),
            _ => Err(KiteError::Input(format!("unknown position type: {}", s))),
        }
    }
}

/// Direction of the position being converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Buy,
    Sell,
}

impl FromStr for TransactionType {
    type Err = KiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BUY" => Ok(Self::Buy),
            "SELL" => Ok(Self::Sell),
            _ => Err(KiteError::Input(format!("unknown transaction type: {}", s))),
        }
    }
}

/// Parameters for converting a position's product type (e.g. MIS to CNC).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvertPositionParams {
    pub exchange: String,
    #[serde(rename = "tradingsymbol")]
    pub trading_symbol: String,
    pub old_product: String,
    pub new_product: String,
    pub position_type: PositionType,
    pub transaction_type: TransactionType,
    pub quantity: i64,
}

impl ConvertPositionParams {
    /// Check the parameters before they are sent.
    pub fn validate(&self) -> Result<(), KiteError> {
        if self.exchange.trim().is_empty() {
            return Err(KiteError::Input("exchange is required".into()));
        }
        if self.trading_symbol.trim().is_empty() {
            return Err(KiteError::Input("tradingsymbol is required".into()));
        }
        if self.old_product.trim().is_empty() || self.new_product.trim().is_empty() {
            return Err(KiteError::Input("old and new product are required".into()));
        }
        if self.old_product.eq_ignore_ascii_case(&self.new_product) {
            return Err(KiteError::Input(format!(
                "position is already {}",
                self.new_product
            )));
        }
        if self.quantity <= 0 {
            return Err(KiteError::Input(format!(
                "quantity must be positive, got {}",
                self.quantity
            )));
        }
        Ok(())
    }
}
