use std::collections::HashSet;

use tracing::{debug, instrument};

use crate::domain::Product;
use crate::error::ViewModelError;
use crate::product_resource::{ProductBulkUpdate, ProductCreate};
use crate::resource_framework::Mutation;
use crate::view_model::ListViewModelClient;

/// Product catalogue with a brand filter, add form and per-brand bulk edit.
#[derive(Clone)]
pub struct ProductsTab {
    inner: ListViewModelClient<Product>,
}

impl_basic_tab!(ProductsTab, Product, products);

fn unique_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}

impl ProductsTab {
    /// Client-side only; an empty brand clears the filter.
    #[instrument(skip(self))]
    pub async fn filter_brand(&self, brand: Option<String>) -> Result<(), ViewModelError> {
        self.inner.set_filter(brand.filter(|brand| !brand.is_empty())).await
    }

    /// Brands of every fetched product, in first-seen order.
    pub fn brands(&self) -> Vec<String> {
        let snapshot = self.inner.snapshot();
        unique_in_order(snapshot.items.iter().map(|p| p.brand.as_str()))
    }

    pub fn categories(&self) -> Vec<String> {
        let snapshot = self.inner.snapshot();
        unique_in_order(snapshot.items.iter().map(|p| p.category.as_str()))
    }

    /// Validates the form, then creates the product and re-fetches.
    #[instrument(skip(self))]
    pub async fn add_product(&self, product: ProductCreate) -> Result<(), ViewModelError> {
        product.validate()?;
        debug!("Sending request");
        self.inner.mutate(Mutation::Create(product)).await
    }

    /// Applies `update` to every product of the brand currently filtered on.
    #[instrument(skip(self))]
    pub async fn update_selected_brand(&self, update: ProductBulkUpdate) -> Result<(), ViewModelError> {
        update.validate()?;
        let snapshot = self.inner.settled().await?;
        let brand = snapshot.filter.ok_or(ViewModelError::NoBrandSelected)?;
        debug!(brand = %brand, "Sending request");
        self.inner.mutate(Mutation::UpdateGroup { group: brand, patch: update }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_in_order() {
        let brands = ["Amul", "Nestle", "Amul", "Britannia", "Nestle"];
        assert_eq!(unique_in_order(brands.into_iter()), vec!["Amul", "Nestle", "Britannia"]);
    }
}
