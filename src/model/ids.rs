//! Opaque random identifiers for products and orders.
//!
//! Both identifiers are fixed-size byte arrays filled from the thread-local
//! CSPRNG provided by `rand`. They print and serialize as lowercase hex.

use rand::RngCore;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when an identifier cannot be parsed from its hex form.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum IdParseError {
    #[error("invalid identifier: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

macro_rules! random_id {
    ($(#[$meta:meta])* $name:ident, $len:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        pub struct $name([u8; $len]);

        impl $name {
            /// Size of the identifier in bytes.
            pub const LEN: usize = $len;

            /// Generates a new random, non-zero identifier.
            pub fn random() -> Self {
                let mut bytes = [0u8; $len];
                let mut rng = rand::rng();
                loop {
                    rng.fill_bytes(&mut bytes);
                    if bytes != [0u8; $len] {
                        return Self(bytes);
                    }
                }
            }

            /// Wraps raw bytes, e.g. an identifier read back from storage.
            pub const fn from_bytes(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// The raw identifier bytes.
            pub const fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Returns true for the all-zero value, which is never generated.
            pub fn is_zero(&self) -> bool {
                self.0 == [0u8; $len]
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let mut bytes = [0u8; $len];
                hex::decode_to_slice(s, &mut bytes)?;
                Ok(Self(bytes))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

random_id!(
    /// Identity of a product, assigned when it enters the store.
    ProductId,
    16
);

random_id!(
    /// Identity of an order, assigned when a sale succeeds.
    OrderId,
    12
);
