//! Core traits for the client.

mod broker;

pub use broker::Broker;
