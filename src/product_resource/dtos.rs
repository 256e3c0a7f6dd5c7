use serde::{Deserialize, Serialize};

use crate::error::ViewModelError;

/// Add-product form. Every field is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub brand: String,
    pub category: String,
    pub price: f64,
    pub stock: u32,
}

/// Bulk edit applied to every product of one brand.
///
/// A field left empty keeps the current value and is omitted from the body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductBulkUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
}

impl ProductCreate {
    pub fn validate(&self) -> Result<(), ViewModelError> {
        for (field, value) in [("name", &self.name), ("brand", &self.brand), ("category", &self.category)] {
            if value.trim().is_empty() {
                return Err(ViewModelError::InvalidInput(format!("{} is required", field)));
            }
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ViewModelError::InvalidInput(format!("invalid price: {}", self.price)));
        }
        Ok(())
    }
}

impl ProductBulkUpdate {
    pub fn validate(&self) -> Result<(), ViewModelError> {
        match self.price {
            Some(price) if !price.is_finite() || price < 0.0 => {
                Err(ViewModelError::InvalidInput(format!("invalid price: {}", price)))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ProductCreate {
        ProductCreate {
            name: "Ghee".into(),
            brand: "Amul".into(),
            category: "Dairy".into(),
            price: 610.0,
            stock: 8,
        }
    }

    #[test]
    fn test_blank_fields_are_rejected() {
        assert_eq!(form().validate(), Ok(()));

        let blank_brand = ProductCreate { brand: "  ".into(), ..form() };
        assert_eq!(
            blank_brand.validate(),
            Err(ViewModelError::InvalidInput("brand is required".into()))
        );

        let negative = ProductCreate { price: -1.0, ..form() };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_empty_bulk_fields_are_not_sent() {
        let update = ProductBulkUpdate { price: None, stock: Some(20) };
        assert_eq!(serde_json::to_value(&update).unwrap(), serde_json::json!({ "stock": 20 }));
    }
}
