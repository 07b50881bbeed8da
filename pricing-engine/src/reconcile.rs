//! Payment reconciliation
//!
//! Normalizes heterogeneous payment entries into the canonical currency,
//! sums them, and compares the sum against the order total within a 0.01
//! tolerance. Reconciliation never adjusts the total - it is a read-only
//! comparison surfaced for operator decision.

use crate::money::{MONEY_TOLERANCE, to_decimal, to_f64};
use rust_decimal::Decimal;
use shared::models::RateSnapshot;
use shared::order::{Payment, PaymentInput};
use shared::types::Timestamp;
use tracing::warn;

/// Normalize an operator payment entry into a canonical payment record.
///
/// Foreign amounts are converted with the snapshot rate, and the rate
/// actually used is persisted on the payment so historical reconciliation
/// stays reproducible after rates change. A missing rate degrades to the
/// raw amount with no recorded rate.
pub fn normalize_payment(input: &PaymentInput, rates: &RateSnapshot, date: Timestamp) -> Payment {
    let (amount, exchange_rate_used) = if input.currency.is_canonical() {
        (input.amount, None)
    } else {
        match rates.rate_for(input.currency) {
            Some(rate) => (to_f64(to_decimal(input.amount) * to_decimal(rate)), Some(rate)),
            None => {
                warn!(
                    currency = %input.currency,
                    amount = input.amount,
                    "missing exchange rate for payment, crediting raw amount"
                );
                (input.amount, None)
            }
        }
    };

    Payment {
        id: uuid::Uuid::new_v4().to_string(),
        method: input.method,
        amount,
        original_amount: input.amount,
        original_currency: input.currency,
        exchange_rate_used,
        date,
        reference: input.reference.clone(),
        account: input.account.clone(),
        cash_received: input.cash_received,
        note: input.note.clone(),
    }
}

/// Sum normalized payment amounts with precise arithmetic
pub fn total_paid(payments: &[Payment]) -> f64 {
    let total: Decimal = payments.iter().map(|p| to_decimal(p.amount)).sum();
    to_f64(total)
}

/// `total - paid`; positive means an outstanding balance, negative means
/// overpayment/change due
pub fn remaining(total: f64, paid: f64) -> f64 {
    to_f64(to_decimal(total) - to_decimal(paid))
}

/// Whether payments match the total within the 0.01 tolerance
pub fn is_payments_valid(total: f64, paid: f64) -> bool {
    (to_decimal(total) - to_decimal(paid)).abs() < MONEY_TOLERANCE
}
