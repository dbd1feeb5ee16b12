//! Plain data shared between the isolated compilation job coordinator and its hosts.
//!
//! Nothing in this crate performs I/O; it only names jobs, triggers and scheduling requests.

mod domain;
pub use domain::*;

mod kind;
pub use kind::*;

mod error;
pub use error::ModelError;
