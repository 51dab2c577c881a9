//! # Observability & Tracing
//!
//! Store operations log with `tracing`:
//!
//! - `DEBUG` on entry, with the full payload (`?products`, `?order`)
//! - `INFO` when a mutation commits, with the new IDs and catalog sizes
//! - `WARN` when a mutation is rejected, with the error
//!
//! Mutating methods run inside an `#[instrument]` span that carries the store
//! name, so a line reads like:
//!
//! ```text
//! INFO sell{store="Auto Shop" products=2}: Order recorded order_id=3f9c... stock=1 orders=1
//! WARN sell{store="Auto Shop" products=2}: Sale rejected error=order amount paid is not enough, need 5014000.00 but paid 5000000.00
//! ```
//!
//! ```bash
//! # Default: info for this crate only
//! cargo run
//!
//! # Full payloads
//! RUST_LOG=auto_shop=debug cargo run
//! ```

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "auto_shop=info";

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`.
///
/// Falls back to `auto_shop=info` when `RUST_LOG` is unset or unparsable.
/// Calling it twice is harmless: the second call leaves the first subscriber in place.
pub fn setup_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
