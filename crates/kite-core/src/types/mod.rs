//! API data types.

mod portfolio;
pub mod time;
mod user;

pub use portfolio::{
    ConvertPositionParams, Holding, Holdings, Position, PositionType, Positions, TransactionType,
};
pub use user::{
    AllMargins, AvailableMargins, Margins, UsedMargins, UserProfile, UserSession,
    UserSessionTokens,
};
