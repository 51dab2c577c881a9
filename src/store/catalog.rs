//! The state guarded by the store's lock.
//!
//! Every method here runs inside a single critical section: the caller holds
//! the read guard for `&self` methods and the write guard for `&mut self`
//! methods. Mutating methods validate everything first and only then change
//! the maps, so an error always leaves the catalog untouched.

use super::{Listing, OrderBook, StoreError};
use crate::model::{
    Order, OrderCreate, OrderId, Product, ProductId, ProductInfo, ProductType, ProductUpdate,
};
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Default)]
pub(crate) struct Catalog {
    products: HashMap<ProductId, Product>,
    orders: HashMap<OrderId, Order>,
    // Empty means every type is accepted.
    supported: BTreeMap<ProductType, bool>,
}

impl Catalog {
    pub(crate) fn with_supported_types(types: impl IntoIterator<Item = ProductType>) -> Self {
        Self {
            supported: types.into_iter().map(|t| (t, true)).collect(),
            ..Self::default()
        }
    }

    pub(crate) fn stock_len(&self) -> usize {
        self.products.len()
    }

    pub(crate) fn order_len(&self) -> usize {
        self.orders.len()
    }

    pub(crate) fn is_supported(&self, product_type: &ProductType) -> bool {
        self.supported.is_empty() || self.supported.get(product_type).copied().unwrap_or(false)
    }

    fn ensure_supported(&self, product_type: &ProductType) -> Result<(), StoreError> {
        if self.is_supported(product_type) {
            Ok(())
        } else {
            Err(StoreError::UnsupportedProductType(product_type.clone()))
        }
    }

    fn fresh_product_id(&self) -> ProductId {
        loop {
            let id = ProductId::random();
            if !self.products.contains_key(&id) {
                return id;
            }
        }
    }

    fn fresh_order_id(&self) -> OrderId {
        loop {
            let id = OrderId::random();
            if !self.orders.contains_key(&id) {
                return id;
            }
        }
    }

    pub(crate) fn add(&mut self, batch: Vec<ProductInfo>) -> Result<Vec<ProductId>, StoreError> {
        if batch.is_empty() {
            return Err(StoreError::NoProducts);
        }
        for (index, info) in batch.iter().enumerate() {
            info.validate()
                .map_err(|source| StoreError::InvalidProduct { index, source })?;
            self.ensure_supported(&info.product_type)?;
        }

        let now = Utc::now();
        let mut ids = Vec::with_capacity(batch.len());
        for info in batch {
            let id = self.fresh_product_id();
            self.products.insert(id, Product::new(id, info, now));
            ids.push(id);
        }
        Ok(ids)
    }

    pub(crate) fn update(
        &mut self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, StoreError> {
        let product = self
            .products
            .get_mut(&id)
            .ok_or(StoreError::ProductNotFound(id))?;

        let mut info = product.info.clone();
        update.apply_to(&mut info);
        info.validate()
            .map_err(|source| StoreError::InvalidUpdate { id, source })?;

        product.info = info;
        product.last_updated = Utc::now();
        Ok(product.clone())
    }

    pub(crate) fn sell(&mut self, request: OrderCreate) -> Result<OrderId, StoreError> {
        request.validate()?;

        let mut required = 0.0;
        for (index, id) in request.product_ids.iter().enumerate() {
            let product = self
                .products
                .get(id)
                .ok_or(StoreError::ProductNotFound(*id))?;
            product
                .validate()
                .map_err(|source| StoreError::InvalidProduct { index, source })?;
            self.ensure_supported(product.product_type())?;
            required += product.price();
        }

        let paid = request.buyer.amount_paid;
        if paid < required {
            return Err(StoreError::InsufficientPayment { required, paid });
        }

        // Every ID was checked above, so each removal succeeds.
        let products = request
            .product_ids
            .iter()
            .filter_map(|id| self.products.remove(id))
            .collect();

        let id = self.fresh_order_id();
        self.orders.insert(
            id,
            Order {
                id,
                buyer: request.buyer,
                products,
                placed_at: Utc::now(),
            },
        );
        Ok(id)
    }

    pub(crate) fn product(&self, id: &ProductId) -> Option<Product> {
        self.products.get(id).cloned()
    }

    pub(crate) fn order(&self, id: &OrderId) -> Option<Order> {
        self.orders.get(id).cloned()
    }

    fn sorted_orders(&self) -> Vec<&Order> {
        let mut orders: Vec<&Order> = self.orders.values().collect();
        orders.sort_by(|a, b| a.placed_at.cmp(&b.placed_at).then(a.id.cmp(&b.id)));
        orders
    }

    pub(crate) fn available(&self, filter: Option<&ProductType>) -> Listing {
        let mut products: Vec<&Product> = self
            .products
            .values()
            .filter(|p| filter.is_none_or(|t| p.is_type(t)))
            .collect();
        products.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        products.into_iter().cloned().collect()
    }

    pub(crate) fn sold(&self, filter: Option<&ProductType>) -> Listing {
        self.sorted_orders()
            .into_iter()
            .flat_map(|order| order.products.iter())
            .filter(|p| filter.is_none_or(|t| p.is_type(t)))
            .cloned()
            .collect()
    }

    pub(crate) fn orders(&self) -> OrderBook {
        self.sorted_orders().into_iter().cloned().collect()
    }

    pub(crate) fn delete(&mut self, ids: &[ProductId]) -> Result<usize, StoreError> {
        if ids.is_empty() {
            return Err(StoreError::NoProductIds);
        }
        Ok(ids
            .iter()
            .filter(|id| self.products.remove(*id).is_some())
            .count())
    }

    pub(crate) fn in_stock(&self, product_type: &ProductType) -> bool {
        self.products.values().any(|p| p.is_type(product_type))
    }

    pub(crate) fn set_support(
        &mut self,
        product_type: ProductType,
        enabled: bool,
    ) -> Result<(), StoreError> {
        if enabled {
            self.supported.insert(product_type, true);
            return Ok(());
        }
        match self.supported.get_mut(&product_type) {
            Some(flag) => {
                *flag = false;
                Ok(())
            }
            None => Err(StoreError::ProductTypeNotRegistered(product_type)),
        }
    }

    pub(crate) fn supported_types(&self) -> BTreeMap<ProductType, bool> {
        self.supported.clone()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Buyer, CarDetails, OrderValidationError, ProductKind, ProductValidationError,
    };

    fn car(price: f64) -> ProductInfo {
        let details = CarDetails::new("Ford", "1.5 Zetec", "yellow");
        ProductInfo::new("Ford Ecosport", "Car", price)
            .with_category("Used Cars")
            .with_description("Easy to drive and spacious inside")
            .with_image("https://example.com/ecosport.jpg")
            .with_specification("Engine", ["Auto", "Petrol"])
            .with_kind(ProductKind::Car(details))
    }

    fn light(price: f64) -> ProductInfo {
        ProductInfo::new("Shadow Logo Led Light", "Car Accessory", price)
            .with_category("Led Lights")
            .with_description("Door lights")
            .with_image("https://example.com/light.jpg")
            .with_specification("Key Features", ["Free batteries included"])
            .with_kind(ProductKind::Accessory)
    }

    fn buyer(paid: f64) -> Buyer {
        Buyer::new("Philemon", "No 21 Alt_School Africa street, Lagos", paid)
    }

    #[test]
    fn add_assigns_unique_ids_and_shared_timestamps() {
        let mut catalog = Catalog::default();
        let ids = catalog
            .add(vec![car(5_000_000.0), car(5_000_000.0), light(14_000.0)])
            .unwrap();

        assert_eq!(ids.len(), 3);
        assert_ne!(ids[0], ids[1]);
        assert!(ids.iter().all(|id| !id.is_zero()));

        let first = catalog.product(&ids[0]).unwrap();
        let last = catalog.product(&ids[2]).unwrap();
        assert_eq!(first.created_at, last.created_at);
        assert_eq!(first.created_at, first.last_updated);
        assert!(first.is_valid());
    }

    #[test]
    fn add_rejects_empty_batch() {
        let mut catalog = Catalog::default();
        assert_eq!(catalog.add(vec![]), Err(StoreError::NoProducts));
    }

    #[test]
    fn one_invalid_product_rejects_the_whole_batch() {
        let mut catalog = Catalog::default();
        let err = catalog.add(vec![car(10.0), light(0.0)]).unwrap_err();
        assert_eq!(
            err,
            StoreError::InvalidProduct {
                index: 1,
                source: ProductValidationError::NonPositivePrice(0.0),
            }
        );
        assert_eq!(catalog.stock_len(), 0);
    }

    #[test]
    fn sale_moves_products_into_a_single_order() {
        let mut catalog = Catalog::default();
        let ids = catalog
            .add(vec![car(5_000_000.0), car(5_000_000.0), light(14_000.0)])
            .unwrap();

        let order_id = catalog
            .sell(OrderCreate::new(buyer(5_014_000.0), [ids[0], ids[2]]))
            .unwrap();

        assert_eq!(catalog.stock_len(), 1);
        assert!(catalog.product(&ids[1]).is_some());
        assert_eq!(catalog.order_len(), 1);

        let order = catalog.order(&order_id).unwrap();
        assert_eq!(order.total(), 5_014_000.0);
        let sold: Vec<ProductId> = order.products.iter().map(Product::id).collect();
        assert_eq!(sold, vec![ids[0], ids[2]]);
    }

    #[test]
    fn underpaid_sale_leaves_stock_alone() {
        let mut catalog = Catalog::default();
        let ids = catalog
            .add(vec![car(5_000_000.0), light(14_000.0)])
            .unwrap();

        let err = catalog
            .sell(OrderCreate::new(buyer(5_000_000.0), ids.clone()))
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::InsufficientPayment {
                required: 5_014_000.0,
                paid: 5_000_000.0,
            }
        );
        assert_eq!(catalog.stock_len(), 2);
        assert_eq!(catalog.order_len(), 0);
    }

    #[test]
    fn selling_unknown_product_fails_without_side_effects() {
        let mut catalog = Catalog::default();
        let ids = catalog.add(vec![light(14_000.0)]).unwrap();
        let missing = ProductId::random();

        let err = catalog
            .sell(OrderCreate::new(buyer(1_000_000.0), [ids[0], missing]))
            .unwrap_err();
        assert_eq!(err, StoreError::ProductNotFound(missing));
        assert!(catalog.product(&ids[0]).is_some());
    }

    #[test]
    fn sold_product_cannot_be_sold_again() {
        let mut catalog = Catalog::default();
        let ids = catalog.add(vec![light(14_000.0)]).unwrap();
        let first = OrderCreate::new(buyer(14_000.0), ids.clone());
        catalog.sell(first.clone()).unwrap();

        assert_eq!(
            catalog.sell(first),
            Err(StoreError::ProductNotFound(ids[0]))
        );
        assert_eq!(catalog.order_len(), 1);
    }

    #[test]
    fn malformed_order_is_rejected_first() {
        let mut catalog = Catalog::default();
        let err = catalog
            .sell(OrderCreate::new(buyer(10.0), Vec::new()))
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::InvalidOrder(OrderValidationError::NoProducts)
        );
    }

    #[test]
    fn listings_filter_by_type_and_sum_prices() {
        let mut catalog = Catalog::default();
        let car_type = ProductType::from("Car");
        let ids = catalog
            .add(vec![car(5_000_000.0), car(4_000_000.0), light(14_000.0)])
            .unwrap();

        let all = catalog.available(None);
        assert_eq!(all.len(), 3);
        assert_eq!(all.total, 9_014_000.0);

        let cars = catalog.available(Some(&car_type));
        assert_eq!(cars.len(), 2);
        assert_eq!(cars.total, 9_000_000.0);

        catalog
            .sell(OrderCreate::new(buyer(5_014_000.0), [ids[0], ids[2]]))
            .unwrap();

        let sold_cars = catalog.sold(Some(&car_type));
        assert_eq!(sold_cars.len(), 1);
        assert_eq!(sold_cars.total, 5_000_000.0);
        assert_eq!(catalog.sold(None).total, 5_014_000.0);

        let spare_parts = ProductType::from("Spare Parts");
        assert!(catalog.sold(Some(&spare_parts)).is_empty());
    }

    #[test]
    fn order_book_sums_amount_paid() {
        let mut catalog = Catalog::default();
        let ids = catalog.add(vec![light(100.0), light(200.0)]).unwrap();
        let first = OrderCreate::new(buyer(150.0), [ids[0]]);
        let second = OrderCreate::new(buyer(200.0), [ids[1]]);
        catalog.sell(first).unwrap();
        catalog.sell(second).unwrap();

        let book = catalog.orders();
        assert_eq!(book.len(), 2);
        assert_eq!(book.total_paid, 350.0);
    }

    #[test]
    fn delete_counts_only_present_ids() {
        let mut catalog = Catalog::default();
        let ids = catalog.add(vec![light(1.0), light(2.0)]).unwrap();

        assert_eq!(catalog.delete(&[ids[0], ProductId::random()]), Ok(1));
        assert_eq!(catalog.delete(&[ids[0]]), Ok(0));
        assert_eq!(catalog.delete(&[]), Err(StoreError::NoProductIds));
        assert_eq!(catalog.stock_len(), 1);
    }

    #[test]
    fn in_stock_tracks_type_presence() {
        let mut catalog = Catalog::default();
        let ids = catalog.add(vec![light(1.0)]).unwrap();
        let accessory = ProductType::from("Car Accessory");

        assert!(catalog.in_stock(&accessory));
        assert!(!catalog.in_stock(&ProductType::from("Car")));
        catalog.delete(&ids).unwrap();
        assert!(!catalog.in_stock(&accessory));
    }

    #[test]
    fn update_revalidates_and_keeps_identity() {
        let mut catalog = Catalog::default();
        let id = catalog.add(vec![light(100.0)]).unwrap()[0];
        let before = catalog.product(&id).unwrap();

        let raise = ProductUpdate {
            price: Some(120.0),
            ..Default::default()
        };
        let updated = catalog.update(id, raise).unwrap();
        assert_eq!(updated.id, id);
        assert_eq!(updated.price(), 120.0);
        assert_eq!(updated.created_at, before.created_at);
        assert!(updated.last_updated >= before.last_updated);

        let strip_images = ProductUpdate {
            images: Some(Vec::new()),
            ..Default::default()
        };
        let err = catalog.update(id, strip_images).unwrap_err();
        assert_eq!(
            err,
            StoreError::InvalidUpdate {
                id,
                source: ProductValidationError::NoImages,
            }
        );
        assert_eq!(catalog.product(&id).unwrap().price(), 120.0);
    }

    #[test]
    fn supported_types_gate_adds_and_sales() {
        let types = ["Car", "Car Accessory"].map(ProductType::from);
        let mut catalog = Catalog::with_supported_types(types);
        let accessory = ProductType::from("Car Accessory");
        let ids = catalog.add(vec![light(10.0)]).unwrap();

        catalog.set_support(accessory.clone(), false).unwrap();
        assert_eq!(
            catalog.add(vec![light(10.0)]),
            Err(StoreError::UnsupportedProductType(accessory.clone()))
        );
        assert_eq!(
            catalog.sell(OrderCreate::new(buyer(10.0), ids.clone())),
            Err(StoreError::UnsupportedProductType(accessory.clone()))
        );
        assert_eq!(catalog.stock_len(), 1);

        catalog.set_support(accessory, true).unwrap();
        assert!(catalog.sell(OrderCreate::new(buyer(10.0), ids)).is_ok());
    }

    #[test]
    fn disabling_unregistered_type_fails() {
        let mut catalog = Catalog::with_supported_types([ProductType::from("Car")]);
        assert_eq!(
            catalog.set_support("Spare Parts".into(), false),
            Err(StoreError::ProductTypeNotRegistered("Spare Parts".into()))
        );

        catalog.set_support("Spare Parts".into(), true).unwrap();
        catalog.set_support("Car".into(), false).unwrap();
        let types = catalog.supported_types();
        assert_eq!(types.get("Spare Parts"), Some(&true));
        assert_eq!(types.get("Car"), Some(&false));
    }

    #[test]
    fn empty_type_table_accepts_everything() {
        let mut catalog = Catalog::default();
        assert!(catalog.is_supported(&ProductType::from("Anything")));
        assert!(catalog.add(vec![car(1.0), light(1.0)]).is_ok());
    }
}
