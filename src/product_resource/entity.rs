use std::cmp::Ordering;

use reqwest::RequestBuilder;

use crate::domain::{Product, RecordId};
use crate::error::ApiError;
use crate::http_api::{HttpApi, HttpResource};
use crate::memory_backend::MemoryResource;
use crate::resource_framework::{Mutation, Resource};
use crate::view_model::Listing;
use super::{ProductBulkUpdate, ProductCreate};

impl Resource for Product {
    type Id = RecordId;
    type Query = ();
    type CreatePayload = ProductCreate;
    type Patch = ProductBulkUpdate;
    /// Brand name.
    type Group = String;
    type Action = ();

    const NAME: &'static str = "products";

    fn id(&self) -> &RecordId { &self.id }
}

impl HttpResource for Product {
    fn list_request(api: &HttpApi, _query: &()) -> Result<RequestBuilder, ApiError> {
        api.get(&["products"])
    }

    fn create_request(api: &HttpApi, payload: &ProductCreate) -> Result<RequestBuilder, ApiError> {
        Ok(api.post(&["products"])?.json(payload))
    }

    /// `PUT products/brand/{brand}`
    fn update_group_request(api: &HttpApi, brand: &String, patch: &ProductBulkUpdate) -> Result<RequestBuilder, ApiError> {
        Ok(api.put(&["products", "brand", brand.as_str()])?.json(patch))
    }
}

impl MemoryResource for Product {
    fn numeric_id(&self) -> Option<u64> {
        self.id.as_number()
    }

    fn matches_query(&self, _query: &()) -> bool {
        true
    }

    /// Creates a new Product from the add-product form.
    fn from_create(id: u64, payload: ProductCreate) -> Result<Self, String> {
        Ok(Self {
            id: RecordId::Number(id),
            name: payload.name,
            brand: payload.brand,
            category: payload.category,
            price: payload.price,
            stock: payload.stock,
        })
    }

    /// Applies a bulk edit.
    ///
    /// # Fields Updated
    /// - `price`: when present
    /// - `stock`: when present
    fn on_update(&mut self, patch: &ProductBulkUpdate) -> Result<(), String> {
        if let Some(price) = patch.price {
            if !price.is_finite() || price < 0.0 {
                return Err(format!("invalid price: {}", price));
            }
            self.price = price;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        Ok(())
    }

    fn in_group(&self, brand: &String) -> bool {
        &self.brand == brand
    }
}

impl Listing for Product {
    /// Selected brand; `None` shows all brands.
    type Filter = Option<String>;
    type SortKey = ();

    fn matches(&self, brand: &Option<String>) -> bool {
        brand.as_deref().map_or(true, |brand| self.brand == brand)
    }

    /// Server order is kept.
    fn compare(_a: &Self, _b: &Self, _sort: ()) -> Ordering {
        Ordering::Equal
    }

    fn mutation_succeeded_message(mutation: &Mutation<Self>) -> String {
        match mutation {
            Mutation::Create(_) => "Product added successfully".to_string(),
            _ => "Products updated successfully".to_string(),
        }
    }

    fn mutation_failed_message(mutation: &Mutation<Self>) -> String {
        match mutation {
            Mutation::Create(_) => "Failed to add product".to_string(),
            _ => "Failed to update products".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brand_filter() {
        let product = Product::new(1, "Marie", "Britannia", "Biscuits", 30.0, 100);
        assert!(product.matches(&None));
        assert!(product.matches(&Some("Britannia".to_string())));
        assert!(!product.matches(&Some("Parle".to_string())));
    }

    #[test]
    fn test_notification_texts() {
        let create = Mutation::<Product>::Create(ProductCreate {
            name: "Marie".into(),
            brand: "Britannia".into(),
            category: "Biscuits".into(),
            price: 30.0,
            stock: 100,
        });
        let bulk = Mutation::<Product>::UpdateGroup {
            group: "Britannia".into(),
            patch: ProductBulkUpdate::default(),
        };
        assert_eq!(Product::mutation_succeeded_message(&create), "Product added successfully");
        assert_eq!(Product::mutation_failed_message(&create), "Failed to add product");
        assert_eq!(Product::mutation_succeeded_message(&bulk), "Products updated successfully");
        assert_eq!(Product::mutation_failed_message(&bulk), "Failed to update products");
    }
}
