//! Catalog product model

use super::attribute::AttributeSelection;
use super::currency::Currency;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Catalog product as supplied by the collaborator (read-only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub price_currency: Currency,
    /// Category reference (name)
    pub category: String,
    /// The product's own default attribute selections; used when a
    /// referenced-product instance has no edit record
    #[serde(default)]
    pub attributes: HashMap<String, AttributeSelection>,
}

/// Catalog indexed by product id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    products: HashMap<String, CatalogProduct>,
}

impl Catalog {
    pub fn new(products: Vec<CatalogProduct>) -> Self {
        Self {
            products: products.into_iter().map(|p| (p.id.clone(), p)).collect(),
        }
    }

    pub fn get(&self, product_id: &str) -> Option<&CatalogProduct> {
        self.products.get(product_id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
