//! Order line, discount, and totals types

use crate::models::attribute::AttributeSelection;
use crate::models::currency::{Currency, RateSnapshot};
use crate::order::payment::Payment;
use crate::types::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fixed tax rate applied to the discounted subtotal
pub const TAX_RATE: f64 = 0.16;

/// Composite key for per-instance overrides of a referenced product
///
/// The same catalog product can be referenced by two different attributes
/// with independent customizations, so the key carries both the attribute
/// and the referenced product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct RefInstanceKey {
    pub attribute_id: String,
    pub product_id: String,
}

impl RefInstanceKey {
    pub fn new(attribute_id: impl Into<String>, product_id: impl Into<String>) -> Self {
        Self {
            attribute_id: attribute_id.into(),
            product_id: product_id.into(),
        }
    }
}

/// How a discount was entered by the operator
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountKind {
    Amount,
    Percentage,
}

/// The operator's last discount input, kept for display only
///
/// The stored canonical `discount` amount is authoritative; switching the
/// displayed kind or currency never re-derives it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiscountInput {
    pub kind: DiscountKind,
    pub raw_value: f64,
    pub currency: Currency,
}

/// One product line in the order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: String,
    pub catalog_product_id: String,
    pub name: String,
    /// Category reference (name)
    pub category: String,
    /// Base price in canonical currency
    pub base_price: f64,
    pub quantity: u32,
    /// Selections for the line's own category attributes
    #[serde(default)]
    pub selected_attributes: HashMap<String, AttributeSelection>,
    /// Per-instance attribute edits for referenced products
    #[serde(default)]
    pub ref_edits: HashMap<RefInstanceKey, HashMap<String, AttributeSelection>>,
    /// Line discount in canonical currency, clamped to the base total
    #[serde(default)]
    pub discount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_input: Option<DiscountInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
}

/// The order draft state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub lines: Vec<OrderLine>,
    /// Order-level discount in canonical currency, clamped to the subtotal
    /// after line discounts
    #[serde(default)]
    pub general_discount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub general_discount_input: Option<DiscountInput>,
    pub payments: Vec<Payment>,
    /// Rates frozen when the order was created; authoritative on reopen
    pub rate_snapshot: RateSnapshot,
    #[serde(default)]
    pub delivery_cost: f64,
    pub tax_rate: f64,
    pub created_at: Timestamp,
}

impl Order {
    pub fn new(rate_snapshot: RateSnapshot) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            lines: Vec::new(),
            general_discount: 0.0,
            general_discount_input: None,
            payments: Vec::new(),
            rate_snapshot,
            delivery_cost: 0.0,
            tax_rate: TAX_RATE,
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn line(&self, line_id: &str) -> Option<&OrderLine> {
        self.lines.iter().find(|l| l.id == line_id)
    }

    pub fn line_mut(&mut self, line_id: &str) -> Option<&mut OrderLine> {
        self.lines.iter_mut().find(|l| l.id == line_id)
    }
}

/// Derived financial breakdown - a pure function of the order state
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Totals {
    /// Sum of line base totals before any discount
    pub lines_total: f64,
    /// Sum of per-line discounts
    pub line_discount_total: f64,
    pub subtotal_after_line_discounts: f64,
    /// General discount actually applied (after re-clamping)
    pub general_discount: f64,
    pub subtotal: f64,
    pub tax: f64,
    pub delivery_cost: f64,
    pub total: f64,
    pub total_paid: f64,
    /// Positive = outstanding balance, negative = overpayment/change due
    pub remaining: f64,
    /// `|remaining| < 0.01`
    pub is_payments_valid: bool,
}
