//! Trakt Core - Foundation types, error handling, configuration, and logging.
//!
//! This crate provides the shared foundation used by the other trakt crates:
//! - Client configuration (credentials, environment, timeouts)
//! - Global error types covering all error categories
//! - Structured logging with tracing
//! - Common constants (hosts, header names, defaults)

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;

// Re-export commonly used items at the crate root
pub use config::ClientConfig;
pub use error::{AuthenticationError, TokenPollError, TraktError, TraktResult};
pub use logging::init_logging;
