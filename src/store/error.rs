//! Error types for store operations.

use crate::model::{OrderValidationError, ProductId, ProductType, ProductValidationError};
use thiserror::Error;

/// Errors that can occur during store operations.
///
/// Every variant is returned before the catalog is touched, so a failed call
/// leaves stock and orders exactly as they were.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    /// `add_products` was called with an empty batch.
    #[error("provide one or more products")]
    NoProducts,

    /// `delete_products` was called with an empty ID list.
    #[error("provide one or more product IDs")]
    NoProductIds,

    /// A product in a batch or an order failed validation.
    #[error("product at position {index} is not valid: {source}")]
    InvalidProduct {
        index: usize,
        source: ProductValidationError,
    },

    /// Applying an update would leave the product invalid.
    #[error("update would make product {id} invalid: {source}")]
    InvalidUpdate {
        id: ProductId,
        source: ProductValidationError,
    },

    #[error("product type {0} is not supported by this store")]
    UnsupportedProductType(ProductType),

    #[error("order is not valid: {0}")]
    InvalidOrder(#[from] OrderValidationError),

    #[error("product with ID {0} does not exist")]
    ProductNotFound(ProductId),

    #[error("order amount paid is not enough, need {required:.2} but paid {paid:.2}")]
    InsufficientPayment { required: f64, paid: f64 },

    /// Disabling a type the store never registered.
    #[error("product type {0} was never enabled")]
    ProductTypeNotRegistered(ProductType),
}
