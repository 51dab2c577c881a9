//! Store settings read from the environment.
//!
//! | Variable               | Default              |
//! |------------------------|----------------------|
//! | `SHOP_NAME`            | `Auto Shop`          |
//! | `SHOP_SUPPORTED_TYPES` | `Car,Car Accessory`  |
//! | `SHOP_CURRENCY`        | `NGN`                |
//!
//! A `.env` file in the working directory is loaded first when present.

use crate::model::ProductType;
use thiserror::Error;

const DEFAULT_NAME: &str = "Auto Shop";
const DEFAULT_SUPPORTED_TYPES: &str = "Car,Car Accessory";
const DEFAULT_CURRENCY: &str = "NGN";

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Settings a store is opened with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopConfig {
    /// Display name used in logs and the demo output.
    pub name: String,
    /// Product types enabled when the store opens.
    pub supported_types: Vec<ProductType>,
    /// Currency code printed next to amounts.
    pub currency: String,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            supported_types: DEFAULT_SUPPORTED_TYPES
                .split(',')
                .map(ProductType::from)
                .collect(),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl ShopConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but unusable, such as a
    /// blank store name or a type list with no entries.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// # Arguments
    ///
    /// * `lookup` - Returns the raw value of a variable, or `None` when it is unset.
    ///
    /// # Errors
    ///
    /// Same as [`ShopConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let name = var("SHOP_NAME", DEFAULT_NAME);
        if name.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "SHOP_NAME".to_string(),
                "must not be blank".to_string(),
            ));
        }
        let supported_types = parse_product_types(
            "SHOP_SUPPORTED_TYPES",
            &var("SHOP_SUPPORTED_TYPES", DEFAULT_SUPPORTED_TYPES),
        )?;
        let currency = var("SHOP_CURRENCY", DEFAULT_CURRENCY);

        Ok(Self {
            name,
            supported_types,
            currency,
        })
    }
}

/// Splits a comma-separated list of product types, dropping blank entries.
///
/// # Arguments
///
/// * `var` - Variable name reported in the error.
/// * `raw` - The comma-separated list.
pub fn parse_product_types(var: &str, raw: &str) -> Result<Vec<ProductType>, ConfigError> {
    let types: Vec<ProductType> = raw
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ProductType::from)
        .collect();
    if types.is_empty() {
        return Err(ConfigError::InvalidEnvVar(
            var.to_string(),
            "expected at least one product type".to_string(),
        ));
    }
    Ok(types)
}
