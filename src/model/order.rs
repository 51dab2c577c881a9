//! Buyers, sale requests and processed orders.

use crate::model::{OrderId, Product, ProductId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Reasons a sale request is rejected before the store looks at its stock.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderValidationError {
    #[error("buyer name is required")]
    MissingBuyerName,

    #[error("shipping address is required")]
    MissingShippingAddress,

    #[error("amount paid must be positive, got {0}")]
    NonPositivePayment(f64),

    #[error("an order needs at least one product")]
    NoProducts,

    #[error("product {0} is listed more than once")]
    DuplicateProduct(ProductId),
}

/// Who is paying and where the goods go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Buyer {
    pub name: String,
    pub shipping_address: String,
    pub amount_paid: f64,
}

impl Buyer {
    /// Creates a buyer.
    ///
    /// # Arguments
    ///
    /// * `name` - Name the order is placed under.
    /// * `shipping_address` - Where the products are delivered.
    /// * `amount_paid` - Money handed over, compared against the order total.
    pub fn new(
        name: impl Into<String>,
        shipping_address: impl Into<String>,
        amount_paid: f64,
    ) -> Self {
        Self {
            name: name.into(),
            shipping_address: shipping_address.into(),
            amount_paid,
        }
    }
}

/// Payload for selling in-stock products to a buyer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCreate {
    pub buyer: Buyer,
    pub product_ids: Vec<ProductId>,
}

impl OrderCreate {
    /// Creates a request to sell the given in-stock products to `buyer`.
    pub fn new(buyer: Buyer, product_ids: impl IntoIterator<Item = ProductId>) -> Self {
        Self {
            buyer,
            product_ids: product_ids.into_iter().collect(),
        }
    }

    /// Checks the request on its own, without consulting stock.
    pub fn validate(&self) -> Result<(), OrderValidationError> {
        if self.buyer.name.trim().is_empty() {
            return Err(OrderValidationError::MissingBuyerName);
        }
        if self.buyer.shipping_address.trim().is_empty() {
            return Err(OrderValidationError::MissingShippingAddress);
        }
        let paid = self.buyer.amount_paid;
        if !(paid.is_finite() && paid > 0.0) {
            return Err(OrderValidationError::NonPositivePayment(paid));
        }
        if self.product_ids.is_empty() {
            return Err(OrderValidationError::NoProducts);
        }
        let mut seen = HashSet::with_capacity(self.product_ids.len());
        for id in &self.product_ids {
            if !seen.insert(id) {
                return Err(OrderValidationError::DuplicateProduct(*id));
            }
        }
        Ok(())
    }
}

/// A processed sale.
///
/// Orders are only created by [`Store::sell`](crate::store::Store::sell) and
/// never change afterwards. The products inside are the exact records that
/// left stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub buyer: Buyer,
    pub products: Vec<Product>,
    pub placed_at: DateTime<Utc>,
}

impl Order {
    /// Identity assigned when the sale succeeded.
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// What the buyer paid, which may exceed [`Order::total`].
    pub fn amount_paid(&self) -> f64 {
        self.buyer.amount_paid
    }

    /// Sum of the prices of the products in this order.
    pub fn total(&self) -> f64 {
        self.products.iter().map(Product::price).sum()
    }
}
