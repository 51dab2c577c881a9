//! Query results carrying their aggregate amounts.

use crate::model::{Order, Product};
use serde::Serialize;

/// A list of products together with the sum of their prices.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Listing {
    pub products: Vec<Product>,
    pub total: f64,
}

impl Listing {
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Whether a product with the same ID is in this listing.
    pub fn contains(&self, product: &Product) -> bool {
        self.products.iter().any(|p| p.id == product.id)
    }
}

impl FromIterator<Product> for Listing {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        let products: Vec<Product> = iter.into_iter().collect();
        let total = products.iter().map(Product::price).sum();
        Self { products, total }
    }
}

/// Processed orders together with the total amount buyers paid.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrderBook {
    pub orders: Vec<Order>,
    pub total_paid: f64,
}

impl OrderBook {
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl FromIterator<Order> for OrderBook {
    fn from_iter<I: IntoIterator<Item = Order>>(iter: I) -> Self {
        let orders: Vec<Order> = iter.into_iter().collect();
        let total_paid = orders.iter().map(Order::amount_paid).sum();
        Self { orders, total_paid }
    }
}
