//! Editable product drafts and the parse-and-validate step that turns them
//! into typed `ProductInput` payloads.
//!
//! # Design
//! A `Draft` holds every field as raw text, exactly as typed. Nothing reaches
//! the network until `Draft::validate` has produced a `ProductInput`; the
//! first failing rule wins and its message is what the user sees.

use thiserror::Error;

use crate::types::{Product, ProductInput, ProductType};

/// Client-side validation failures, checked in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Product name is required.")]
    MissingName,

    #[error("Product type must be one of: Electronics, Furniture, Clothing, Food, Books.")]
    InvalidType,

    #[error("Description is required.")]
    MissingDescription,

    #[error("Quantity must be a number greater than 0.")]
    InvalidQuantity,

    #[error("Unit price must be a number greater than 0.")]
    InvalidUnitPrice,
}

/// Names the editable fields of a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ProductName,
    Description,
    ProductType,
    Quantity,
    UnitPrice,
}

/// A product-shaped record under edit. Fields may be empty or invalid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub product_name: String,
    pub description: String,
    pub product_type: String,
    pub quantity: String,
    pub unit_price: String,
}

impl Draft {
    /// Pre-populate a draft from an existing product, using display names
    /// for the product type.
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_name: product.product_name.clone(),
            description: product.description.clone(),
            product_type: product.product_type.to_string(),
            quantity: product.quantity.to_string(),
            unit_price: product.unit_price.to_string(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::ProductName => &self.product_name,
            Field::Description => &self.description,
            Field::ProductType => &self.product_type,
            Field::Quantity => &self.quantity,
            Field::UnitPrice => &self.unit_price,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::ProductName => self.product_name = value,
            Field::Description => self.description = value,
            Field::ProductType => self.product_type = value,
            Field::Quantity => self.quantity = value,
            Field::UnitPrice => self.unit_price = value,
        }
    }

    /// Parse every field, returning the first rule that fails.
    ///
    /// Name and description are trimmed before they are stored in the
    /// payload.
    pub fn validate(&self) -> Result<ProductInput, DraftError> {
        let product_name = self.product_name.trim();
        if product_name.is_empty() {
            return Err(DraftError::MissingName);
        }

        let product_type: ProductType = self
            .product_type
            .trim()
            .parse()
            .map_err(|_| DraftError::InvalidType)?;

        let description = self.description.trim();
        if description.is_empty() {
            return Err(DraftError::MissingDescription);
        }

        let quantity = parse_positive(&self.quantity).ok_or(DraftError::InvalidQuantity)?;
        let unit_price = parse_positive(&self.unit_price).ok_or(DraftError::InvalidUnitPrice)?;

        Ok(ProductInput {
            product_name: product_name.to_string(),
            description: description.to_string(),
            product_type,
            quantity,
            unit_price,
        })
    }
}

/// A finite number greater than zero.
fn parse_positive(raw: &str) -> Option<f64> {
    let n: f64 = raw.trim().parse().ok()?;
    (n.is_finite() && n > 0.0).then_some(n)
}
