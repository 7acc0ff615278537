//! Core types and traits for the Kite Connect client.
//!
//! This crate provides:
//! - Session, profile and margin types
//! - Holdings and positions types
//! - The error model shared by the SDK and the CLI
//! - The read-only `Broker` trait

pub mod types;
pub mod traits;
pub mod error;

pub use error::KiteError;
pub use types::*;
pub use traits::*;
