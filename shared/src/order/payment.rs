//! Payment model
//!
//! A payment keeps what the operator typed (`original_amount` in
//! `original_currency`) alongside the derived canonical `amount` that is
//! summed for reconciliation. The rate actually used is persisted so
//! historical reconciliation stays reproducible after rates change.

use crate::models::currency::Currency;
use crate::types::Timestamp;
use serde::{Deserialize, Serialize};

/// Payment method
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    MobileTransfer,
    BankTransfer,
    DigitalWallet,
}

/// Operator payment entry before normalization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInput {
    pub method: PaymentMethod,
    pub amount: f64,
    pub currency: Currency,
    /// Transfer/operation reference number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Receiving account (bank/mobile transfers)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    /// Cash physically handed over, in the payment currency
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_received: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Normalized payment record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Payment {
    pub id: String,
    pub method: PaymentMethod,
    /// Amount credited toward the order, in canonical currency (derived,
    /// never hand-edited independently of `original_amount`)
    pub amount: f64,
    pub original_amount: f64,
    pub original_currency: Currency,
    /// Rate used for normalization; `None` for canonical-currency
    /// payments and for the degraded missing-rate path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange_rate_used: Option<f64>,
    pub date: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    /// Cash handed over (cash method only), in the payment currency
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_received: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Payment {
    /// Change (vuelto) owed back to the customer, in the payment currency.
    ///
    /// Only meaningful for cash payments where more was handed over than
    /// was credited.
    pub fn change_due(&self) -> Option<f64> {
        let received = self.cash_received?;
        let change = received - self.original_amount;
        (change > 0.0).then_some(change)
    }
}
