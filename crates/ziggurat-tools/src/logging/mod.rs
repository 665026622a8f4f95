//! Logging setup.
//!
//! Library code only talks to the `log` facade; this module is for binaries
//! and tests that want an `env_logger` backend without wiring it up themselves.

mod init;

pub use init::{init_logging, LoggingConfig};
