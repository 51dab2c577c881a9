//! Process-level setup for binaries that host a store.
//!
//! - [`ShopConfig`] - store settings read from the environment
//! - [`setup_tracing`] - installs the tracing subscriber

pub mod config;
pub mod tracing;

pub use self::config::*;
pub use self::tracing::*;
