//! Products sold by a [`Store`](crate::store::Store).
//!
//! A caller describes a product with [`ProductInfo`]. The store validates it,
//! assigns a [`ProductId`] and timestamps, and keeps the resulting
//! [`Product`] in stock until it is sold or deleted.

use crate::model::ProductId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt::Display;
use thiserror::Error;

/// Section title mapped to its description lines, e.g. `"Engine" -> ["Auto", "Petrol"]`.
pub type Specifications = BTreeMap<String, Vec<String>>;

/// Type tag used for filtering and for the store's supported-type gate.
///
/// Tags compare exactly: `"Car"` and `"car"` are different types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductType(String);

impl ProductType {
    /// Creates a type tag. The tag is kept exactly as given.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// The tag as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductType {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for ProductType {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

impl Borrow<str> for ProductType {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reasons a product fails validation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("price must be a positive amount, got {0}")]
    NonPositivePrice(f64),

    #[error("at least one image is required")]
    NoImages,

    #[error("at least one specification section is required")]
    NoSpecifications,
}

fn require(field: &'static str, value: &str) -> Result<(), ProductValidationError> {
    if value.trim().is_empty() {
        Err(ProductValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

/// Extra fields carried by a vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarDetails {
    pub make: String,
    pub model: String,
    pub color: String,
    pub year: Option<String>,
}

impl CarDetails {
    /// Creates car details without a model year.
    ///
    /// # Arguments
    ///
    /// * `make` - Manufacturer, e.g. `"Ford"`.
    /// * `model` - Model and trim, e.g. `"1.5 Zetec 5dr"`.
    /// * `color` - Body color.
    pub fn new(
        make: impl Into<String>,
        model: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            color: color.into(),
            year: None,
        }
    }

    /// Sets the model year.
    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    fn validate(&self) -> Result<(), ProductValidationError> {
        require("make", &self.make)?;
        require("model", &self.model)?;
        require("color", &self.color)
    }
}

/// The kind of product, each with its own required fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    #[default]
    Generic,
    Car(CarDetails),
    Accessory,
}

impl ProductKind {
    fn validate(&self) -> Result<(), ProductValidationError> {
        match self {
            ProductKind::Car(car) => car.validate(),
            ProductKind::Generic | ProductKind::Accessory => Ok(()),
        }
    }
}

/// Caller-supplied description of a product, before the store gives it an identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInfo {
    pub name: String,
    pub price: f64,
    pub product_type: ProductType,
    #[serde(default)]
    pub category: String,
    pub description: String,
    pub images: Vec<String>,
    pub specifications: Specifications,
    #[serde(default)]
    pub kind: ProductKind,
}

impl ProductInfo {
    /// Starts a generic product description. The remaining required fields
    /// (description, images, specifications) are filled in with the `with_*` methods.
    pub fn new(name: impl Into<String>, product_type: impl Into<ProductType>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            product_type: product_type.into(),
            category: String::new(),
            description: String::new(),
            images: Vec::new(),
            specifications: Specifications::new(),
            kind: ProductKind::Generic,
        }
    }

    /// Sets the free-text category, e.g. `"Used Cars"`.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the description shown to buyers.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Appends an image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.images.push(image.into());
        self
    }

    /// Appends lines to a specification section, creating it if needed.
    pub fn with_specification<I, S>(mut self, section: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.specifications
            .entry(section.into())
            .or_default()
            .extend(lines.into_iter().map(Into::into));
        self
    }

    /// Sets the product kind and with it the kind's required fields.
    pub fn with_kind(mut self, kind: ProductKind) -> Self {
        self.kind = kind;
        self
    }

    /// Checks every required field, including the ones added by the product kind.
    pub fn validate(&self) -> Result<(), ProductValidationError> {
        require("name", &self.name)?;
        require("product type", self.product_type.as_str())?;
        require("description", &self.description)?;
        if !(self.price.is_finite() && self.price > 0.0) {
            return Err(ProductValidationError::NonPositivePrice(self.price));
        }
        if self.images.is_empty() {
            return Err(ProductValidationError::NoImages);
        }
        if self.specifications.is_empty() {
            return Err(ProductValidationError::NoSpecifications);
        }
        self.kind.validate()
    }

    /// Shorthand for `validate().is_ok()`.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// A product held by the store, either in stock or inside an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(flatten)]
    pub info: ProductInfo,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl Product {
    pub(crate) fn new(id: ProductId, info: ProductInfo, now: DateTime<Utc>) -> Self {
        Self {
            id,
            info,
            created_at: now,
            last_updated: now,
        }
    }

    /// Identity assigned by the store.
    pub fn id(&self) -> ProductId {
        self.id
    }

    /// Display name of the product.
    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Unit price.
    pub fn price(&self) -> f64 {
        self.info.price
    }

    /// Type tag used for filtering and the supported-type gate.
    pub fn product_type(&self) -> &ProductType {
        &self.info.product_type
    }

    /// Kind-specific details, such as a car's make and color.
    pub fn kind(&self) -> &ProductKind {
        &self.info.kind
    }

    /// Whether the product carries exactly this type tag.
    pub fn is_type(&self, product_type: &ProductType) -> bool {
        self.info.product_type == *product_type
    }

    /// Validates the stored record.
    pub fn validate(&self) -> Result<(), ProductValidationError> {
        self.info.validate()
    }

    /// A stored product is valid when its record is valid and it has a real identity.
    pub fn is_valid(&self) -> bool {
        !self.id.is_zero() && self.info.is_valid()
    }
}

/// Changes to apply to an in-stock product. `None` leaves a field as it is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub images: Option<Vec<String>>,
    pub specifications: Option<Specifications>,
}

impl ProductUpdate {
    pub(crate) fn apply_to(self, info: &mut ProductInfo) {
        if let Some(name) = self.name {
            info.name = name;
        }
        if let Some(price) = self.price {
            info.price = price;
        }
        if let Some(description) = self.description {
            info.description = description;
        }
        if let Some(images) = self.images {
            info.images = images;
        }
        if let Some(specifications) = self.specifications {
            info.specifications = specifications;
        }
    }
}
