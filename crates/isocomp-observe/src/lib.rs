//! Logging setup for isolated compilation hosts.
//!
//! Installs a global `tracing` subscriber in text, JSON or journald form.

mod logger;
pub use logger::*;
