//! Category attribute definitions
//!
//! Attributes drive a product's effective unit price: a selected value
//! carries a signed price adjustment in its own currency, and ProductRef
//! values point at catalog products that are priced recursively.

use super::currency::Currency;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// How an attribute's value is entered/selected
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttributeValueType {
    /// Free numeric input; contributes its raw value to the unit price
    Number,
    /// Single choice from the value list
    Select,
    /// Any number of choices from the value list
    MultipleSelect,
    /// Values reference catalog products (mandatory bundled components)
    ProductRef,
}

/// One selectable value of an attribute
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeValue {
    pub id: String,
    pub label: String,
    /// Signed adjustment applied to the unit price (positive=add)
    pub price_adjustment: f64,
    pub price_adjustment_currency: Currency,
    /// Referenced catalog product (ProductRef values only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
}

/// Attribute identity carrying both id and display title
///
/// Resolved once when the category is loaded; lookups compare on `id`
/// only, so a retitled attribute keeps matching stored selections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeKey {
    pub id: String,
    pub title: String,
}

impl AttributeKey {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

impl PartialEq for AttributeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for AttributeKey {}

impl Hash for AttributeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Attribute definition embedded in a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryAttribute {
    pub key: AttributeKey,
    pub value_type: AttributeValueType,
    /// Ordered value set (empty for Number attributes)
    #[serde(default)]
    pub values: Vec<AttributeValue>,
}

impl CategoryAttribute {
    pub fn value(&self, value_id: &str) -> Option<&AttributeValue> {
        self.values.iter().find(|v| v.id == value_id)
    }
}

/// The operator's selection for one attribute
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", tag = "type", content = "value")]
pub enum AttributeSelection {
    /// Raw numeric input (Number attributes)
    Number(f64),
    /// Selected value id (Select attributes)
    Value(String),
    /// Selected value ids (MultipleSelect attributes)
    Values(Vec<String>),
}
