//! Domain DTOs for the inventory API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any schema drift between the two crates. Field
//! names are camelCase on the wire.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Server-assigned product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ProductId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ProductId)
    }
}

/// The fixed set of product categories.
///
/// Serialized with the display name. Backends that store upper- or
/// lower-case codes are accepted on the way in and mapped to the display
/// name, so a draft pre-populated from a fetched product shows "Furniture"
/// rather than "FURNITURE".
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum ProductType {
    #[serde(alias = "ELECTRONICS", alias = "electronics")]
    Electronics,
    #[serde(alias = "FURNITURE", alias = "furniture")]
    Furniture,
    #[serde(alias = "CLOTHING", alias = "clothing")]
    Clothing,
    #[serde(alias = "FOOD", alias = "food")]
    Food,
    #[serde(alias = "BOOKS", alias = "books")]
    Books,
}

impl ProductType {
    /// Display names of every category, in declaration order.
    pub fn names() -> Vec<&'static str> {
        ProductType::iter().map(|t| t.into()).collect()
    }
}

/// Currency every `unit_price` is expressed in.
pub const CURRENCY: &str = "PHP";

/// A single inventory record returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub product_name: String,
    pub description: String,
    pub product_type: ProductType,
    pub quantity: f64,
    pub unit_price: f64,
}

impl Product {
    /// True when every editable field equals the corresponding field of `input`.
    pub fn matches(&self, input: &ProductInput) -> bool {
        self.product_name == input.product_name
            && self.description == input.description
            && self.product_type == input.product_type
            && self.quantity == input.quantity
            && self.unit_price == input.unit_price
    }
}

/// Request payload for creating or replacing a product. Carries no id; the
/// server assigns it on create and takes it from the path on update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub product_name: String,
    pub description: String,
    pub product_type: ProductType,
    pub quantity: f64,
    pub unit_price: f64,
}

impl From<Product> for ProductInput {
    fn from(p: Product) -> Self {
        Self {
            product_name: p.product_name,
            description: p.description,
            product_type: p.product_type,
            quantity: p.quantity,
            unit_price: p.unit_price,
        }
    }
}
