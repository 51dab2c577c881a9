//! The in-memory store: products in stock and processed orders.
//!
//! [`Store`] is a cheap, cloneable handle around one `RwLock<Catalog>`.
//! Queries take the shared guard; `add_products`, `update_product`, `sell`,
//! `delete_products` and `set_product_type_support` take the exclusive guard
//! and do all of their validation while holding it.

mod catalog;
pub mod error;
pub mod listing;

pub use error::*;
pub use listing::*;

use crate::lifecycle::ShopConfig;
use crate::model::{
    Order, OrderCreate, OrderId, Product, ProductId, ProductInfo, ProductType, ProductUpdate,
};
use catalog::Catalog;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

/// Handle to a store's catalog.
///
/// Clones share the same catalog, so a store can be handed to several tasks.
///
/// # Example
///
/// ```ignore
/// let shop = Store::with_supported_types("Auto Shop", ["Car", "Car Accessory"]);
/// let ids = shop.add_products(vec![car, light]).await?;
/// let order_id = shop.sell(OrderCreate::new(buyer, ids)).await?;
/// let sold = shop.sold_products(None).await;
/// ```
#[derive(Clone)]
pub struct Store {
    name: Arc<str>,
    catalog: Arc<RwLock<Catalog>>,
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Store {
    /// Creates a store that accepts every product type.
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_catalog(name, Catalog::default())
    }

    /// Creates a store that only accepts the given product types.
    pub fn with_supported_types<I, T>(name: impl Into<String>, types: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ProductType>,
    {
        let catalog = Catalog::with_supported_types(types.into_iter().map(Into::into));
        Self::from_catalog(name, catalog)
    }

    /// Creates a store from loaded settings.
    ///
    /// # Arguments
    ///
    /// * `config` - Supplies the store name and the product types enabled at opening.
    pub fn from_config(config: &ShopConfig) -> Self {
        Self::with_supported_types(config.name.clone(), config.supported_types.iter().cloned())
    }

    fn from_catalog(name: impl Into<String>, catalog: Catalog) -> Self {
        let name: String = name.into();
        info!(store = %name, "Store opened");
        Self {
            name: name.into(),
            catalog: Arc::new(RwLock::new(catalog)),
        }
    }

    /// Display name of the store.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a batch of products and returns their new IDs in input order.
    ///
    /// The batch is all-or-nothing: one invalid or unsupported product
    /// rejects every product in it.
    #[instrument(skip(self, products), fields(store = %self.name, count = products.len()))]
    pub async fn add_products(
        &self,
        products: Vec<ProductInfo>,
    ) -> Result<Vec<ProductId>, StoreError> {
        debug!(?products, "add_products called");
        let mut catalog = self.catalog.write().await;
        match catalog.add(products) {
            Ok(ids) => {
                info!(
                    added = ids.len(),
                    size = catalog.stock_len(),
                    "Products added"
                );
                Ok(ids)
            }
            Err(e) => {
                warn!(error = %e, "Add rejected");
                Err(e)
            }
        }
    }

    /// Changes fields of an in-stock product and refreshes its `last_updated` time.
    #[instrument(skip(self, update), fields(store = %self.name, product_id = %id))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, StoreError> {
        debug!(?update, "update_product called");
        let mut catalog = self.catalog.write().await;
        match catalog.update(id, update) {
            Ok(product) => {
                info!("Product updated");
                Ok(product)
            }
            Err(e) => {
                warn!(error = %e, "Update rejected");
                Err(e)
            }
        }
    }

    /// Sells in-stock products to a buyer and returns the new order's ID.
    ///
    /// # Errors
    ///
    /// Fails if the request is malformed, a product is missing from stock or
    /// its type is not supported, or the buyer paid less than the total. Stock
    /// is only changed when the sale succeeds.
    #[instrument(skip(self, order), fields(store = %self.name, products = order.product_ids.len()))]
    pub async fn sell(&self, order: OrderCreate) -> Result<OrderId, StoreError> {
        debug!(?order, "sell called");
        let mut catalog = self.catalog.write().await;
        match catalog.sell(order) {
            Ok(order_id) => {
                info!(
                    %order_id,
                    stock = catalog.stock_len(),
                    orders = catalog.order_len(),
                    "Order recorded"
                );
                Ok(order_id)
            }
            Err(e) => {
                warn!(error = %e, "Sale rejected");
                Err(e)
            }
        }
    }

    /// Returns the in-stock product with this ID, if any.
    pub async fn product(&self, id: ProductId) -> Option<Product> {
        let product = self.catalog.read().await.product(&id);
        debug!(store = %self.name, product_id = %id, found = product.is_some(), "Get product");
        product
    }

    /// Returns the processed order with this ID, if any.
    pub async fn order(&self, id: OrderId) -> Option<Order> {
        self.catalog.read().await.order(&id)
    }

    /// In-stock products, oldest first, optionally restricted to one type.
    pub async fn available_products(&self, product_type: Option<&ProductType>) -> Listing {
        self.catalog.read().await.available(product_type)
    }

    /// Products from every processed order, optionally restricted to one type.
    pub async fn sold_products(&self, product_type: Option<&ProductType>) -> Listing {
        self.catalog.read().await.sold(product_type)
    }

    /// Processed orders, oldest first, with the total amount paid.
    pub async fn orders(&self) -> OrderBook {
        self.catalog.read().await.orders()
    }

    /// Removes products from stock and returns how many were actually present.
    ///
    /// IDs that are not in stock are skipped.
    #[instrument(skip(self, ids), fields(store = %self.name, requested = ids.len()))]
    pub async fn delete_products(&self, ids: &[ProductId]) -> Result<usize, StoreError> {
        let mut catalog = self.catalog.write().await;
        let deleted = catalog
            .delete(ids)
            .inspect_err(|e| warn!(error = %e, "Delete rejected"))?;
        info!(deleted, size = catalog.stock_len(), "Products deleted");
        Ok(deleted)
    }

    /// Whether at least one product of this type is in stock.
    pub async fn in_stock(&self, product_type: &ProductType) -> bool {
        self.catalog.read().await.in_stock(product_type)
    }

    /// Enables or disables a product type.
    ///
    /// Disabling a type that was never enabled is an error. A store created
    /// without types accepts everything until the first type is enabled.
    #[instrument(skip(self), fields(store = %self.name))]
    pub async fn set_product_type_support(
        &self,
        product_type: ProductType,
        enabled: bool,
    ) -> Result<(), StoreError> {
        let mut catalog = self.catalog.write().await;
        catalog
            .set_support(product_type, enabled)
            .inspect(|_| info!("Product type support changed"))
            .inspect_err(|e| warn!(error = %e, "Support change rejected"))
    }

    /// Every registered product type and whether it is currently enabled.
    ///
    /// Empty for a store that accepts every type.
    pub async fn supported_product_types(&self) -> BTreeMap<ProductType, bool> {
        self.catalog.read().await.supported_types()
    }

    /// Whether products of this type may currently be added or sold.
    pub async fn is_supported(&self, product_type: &ProductType) -> bool {
        self.catalog.read().await.is_supported(product_type)
    }
}
