//! Logging for the Kite Connect client.

mod logging;

pub use logging::setup_logging;
