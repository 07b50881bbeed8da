//! Category model

use super::attribute::CategoryAttribute;
use super::currency::Currency;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Category entity
///
/// Carries the attribute definitions for its products and the cap on
/// absolute per-product discounts. A `max_discount` of 0 means uncapped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<CategoryAttribute>,
    /// Cap on absolute per-product discounts (0 = no cap)
    #[serde(default)]
    pub max_discount: f64,
    #[serde(default)]
    pub max_discount_currency: Currency,
}

impl Category {
    pub fn attribute(&self, attribute_id: &str) -> Option<&CategoryAttribute> {
        self.attributes.iter().find(|a| a.key.id == attribute_id)
    }

    pub fn has_discount_cap(&self) -> bool {
        self.max_discount > 0.0
    }
}

/// Categories indexed by name, as read from the collaborator
pub type CategoryMap = HashMap<String, Category>;

/// Build the category index from the collaborator's read
pub fn index_categories(categories: Vec<Category>) -> CategoryMap {
    categories.into_iter().map(|c| (c.name.clone(), c)).collect()
}
