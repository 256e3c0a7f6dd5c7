use serde::{Deserialize, Serialize};

use super::RecordId;

/// Represents a product in the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: RecordId,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub price: f64,
    pub stock: u32,
}

impl Product {
    /// Creates a new Product instance.
    ///
    /// # Arguments
    /// * `id` - Identifier assigned by the backend
    /// * `name` - Product name
    /// * `brand` - Brand the product is grouped under for bulk edits
    /// * `category` - Catalogue category
    /// * `price` - Unit price
    /// * `stock` - Units in stock
    pub fn new(
        id: impl Into<RecordId>,
        name: impl Into<String>,
        brand: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        stock: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            brand: brand.into(),
            category: category.into(),
            price,
            stock,
        }
    }
}
