//! Frozen order snapshot and multi-currency projection
//!
//! The snapshot is the atomic handoff to the persistence collaborator: the
//! full order state plus every computed monetary field, sufficient for
//! read-only reconstruction without re-querying live rates.

use crate::models::currency::{Currency, RateSnapshot};
use crate::order::payment::Payment;
use crate::order::types::{DiscountInput, Order, Totals};
use crate::types::Timestamp;
use serde::{Deserialize, Serialize};

/// One line of the frozen order with its computed prices
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineSnapshot {
    pub id: String,
    pub catalog_product_id: String,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    /// Effective per-unit price including attribute adjustments (canonical)
    pub unit_price: f64,
    /// `unit_price * quantity`, before discount
    pub base_total: f64,
    pub discount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_input: Option<DiscountInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
}

/// Frozen order produced by submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSnapshot {
    pub order_id: String,
    pub lines: Vec<LineSnapshot>,
    pub payments: Vec<Payment>,
    pub rate_snapshot: RateSnapshot,
    pub general_discount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub general_discount_input: Option<DiscountInput>,
    pub delivery_cost: f64,
    pub tax_rate: f64,
    pub totals: Totals,
    pub created_at: Timestamp,
    pub frozen_at: Timestamp,
}

impl OrderSnapshot {
    pub fn from_order(order: &Order, lines: Vec<LineSnapshot>, totals: Totals) -> Self {
        Self {
            order_id: order.id.clone(),
            lines,
            payments: order.payments.clone(),
            rate_snapshot: order.rate_snapshot.clone(),
            general_discount: totals.general_discount,
            general_discount_input: order.general_discount_input.clone(),
            delivery_cost: order.delivery_cost,
            tax_rate: order.tax_rate,
            totals,
            created_at: order.created_at,
            frozen_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Totals projected into one display currency
///
/// `None` cells mean the snapshot carries no rate for the currency; the
/// display layer renders them as "—" instead of an approximated figure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrencyColumn {
    pub currency: Currency,
    pub subtotal: Option<f64>,
    pub tax: Option<f64>,
    pub delivery_cost: Option<f64>,
    pub total: Option<f64>,
    pub total_paid: Option<f64>,
    pub remaining: Option<f64>,
}

/// Multi-currency display projection of the order totals
///
/// The canonical currency is always the first column.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TotalsProjection {
    pub columns: Vec<CurrencyColumn>,
}

impl TotalsProjection {
    pub fn column(&self, currency: Currency) -> Option<&CurrencyColumn> {
        self.columns.iter().find(|c| c.currency == currency)
    }
}
