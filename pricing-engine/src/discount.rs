//! Discount engine
//!
//! Per-product and order-level discounts entered as an absolute amount in
//! any currency or as a percentage. Out-of-range values are silently
//! clamped, never rejected. All results are rounded canonical amounts.

use crate::money::{round_money, to_decimal, to_f64};
use rust_decimal::Decimal;
use shared::models::{Category, Currency, RateSnapshot};
use shared::order::{DiscountInput, DiscountKind};
use tracing::warn;

/// Convert a raw discount amount to canonical, degrading to the raw value
/// when the rate is missing.
fn amount_to_canonical(value: f64, currency: Currency, rates: &RateSnapshot) -> Decimal {
    match rates.to_canonical(value, currency) {
        Some(converted) => to_decimal(converted),
        None => {
            warn!(
                currency = %currency,
                value,
                "missing exchange rate for discount amount, using raw value"
            );
            to_decimal(value)
        }
    }
}

/// Compute a per-product discount in canonical currency.
///
/// Percentage inputs are clamped to [0, 100] and are deliberately exempt
/// from the category cap; amount inputs are clamped to
/// `[0, min(base_total, category cap)]`.
pub fn line_discount(
    base_total: f64,
    input: &DiscountInput,
    category: Option<&Category>,
    rates: &RateSnapshot,
) -> f64 {
    let base = to_decimal(base_total).max(Decimal::ZERO);

    let discount = match input.kind {
        DiscountKind::Percentage => {
            let pct = to_decimal(input.raw_value.clamp(0.0, 100.0));
            round_money(base * pct / Decimal::ONE_HUNDRED)
        }
        DiscountKind::Amount => {
            let mut amount = amount_to_canonical(input.raw_value, input.currency, rates)
                .clamp(Decimal::ZERO, base);

            if let Some(category) = category.filter(|c| c.has_discount_cap()) {
                let cap = amount_to_canonical(
                    category.max_discount,
                    category.max_discount_currency,
                    rates,
                );
                amount = amount.min(cap.max(Decimal::ZERO)).min(base);
            }

            round_money(amount)
        }
    };

    to_f64(discount)
}

/// Compute the order-level discount over the subtotal after line
/// discounts. Same amount/percentage duality, no category cap.
pub fn general_discount(
    subtotal_after_line_discounts: f64,
    input: &DiscountInput,
    rates: &RateSnapshot,
) -> f64 {
    line_discount(subtotal_after_line_discounts, input, None, rates)
}

/// Re-clamp a stored canonical discount to a new ceiling.
///
/// Applied on every recomputation so a shrunken subtotal never leaves a
/// discount dangling above it. The stored amount is never re-derived from
/// a percentage input; only clamping can change it.
pub fn clamp_discount(stored: f64, ceiling: f64) -> f64 {
    let ceiling = to_decimal(ceiling).max(Decimal::ZERO);
    to_f64(to_decimal(stored).clamp(Decimal::ZERO, ceiling))
}
