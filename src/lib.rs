//! # Auto Shop
//!
//! > **An in-memory retail inventory: stock products, sell them, ask what is left.**
//!
//! A [`Store`](store::Store) keeps two collections behind one reader/writer
//! lock: products currently in stock and orders already processed. Products
//! move one way, from stock into exactly one order, and orders never change
//! once recorded.
//!
//! ## Core Concepts
//!
//! ### Validate, then mutate
//! Every mutating operation checks all of its inputs while holding the write
//! lock and only then touches the catalog. A sale either removes every product
//! it names and records one order, or changes nothing.
//!
//! ### Product kinds
//! All products share one record ([`ProductInfo`](model::ProductInfo)).
//! [`ProductKind`](model::ProductKind) adds per-kind required fields; a
//! car, for example, needs a make, model and color.
//!
//! ### Supported types
//! A store can be opened with a set of enabled product type tags. Only enabled
//! types may be added or sold. A store opened without any accepts everything.
//!
//! ## Module Tour
//!
//! - [`model`]: products, orders and their random identifiers.
//! - [`store`]: the [`Store`](store::Store) handle, its errors and query results.
//! - [`lifecycle`]: configuration from the environment and tracing setup.
//!
//! ### Running the Demo
//!
//! ```bash
//! RUST_LOG=auto_shop=debug cargo run
//! ```

pub mod lifecycle;
pub mod model;
pub mod store;
