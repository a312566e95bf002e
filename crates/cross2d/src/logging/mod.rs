//! Logger setup for binaries built on this crate.
//!
//! The library itself only talks to the `log` facade; call
//! [`init_logging`] early in `main` to get output.

mod init;

pub use init::{init_logging, LoggingConfig};
