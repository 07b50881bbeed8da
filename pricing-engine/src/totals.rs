//! Totals aggregator
//!
//! Combines composed line prices, discounts, the fixed tax rate, and the
//! delivery cost into the final order total, plus the reconciliation
//! fields. `derive_totals` is a pure function of the order state, called
//! after every mutation; there is no cached intermediate to invalidate.

use crate::money::{round_money, to_decimal, to_f64};
use crate::{pricing, reconcile};
use rust_decimal::Decimal;
use shared::models::{Catalog, CategoryMap, Currency, RateSnapshot};
use shared::order::{CurrencyColumn, Order, Totals, TotalsProjection};
use tracing::debug;

/// Derive the full financial breakdown from the current order state.
///
/// Line discounts are re-clamped to their base totals and the general
/// discount to the subtotal after line discounts, so removed lines or
/// shrunken quantities never leave a discount above its ceiling.
pub fn derive_totals(order: &Order, catalog: &Catalog, categories: &CategoryMap) -> Totals {
    let rates = &order.rate_snapshot;

    let mut lines_total = Decimal::ZERO;
    let mut line_discount_total = Decimal::ZERO;

    for line in &order.lines {
        let base_total = pricing::base_total(line, catalog, categories, rates);
        lines_total += base_total;
        line_discount_total += to_decimal(line.discount).clamp(Decimal::ZERO, base_total);
    }

    let subtotal_after_line_discounts = (lines_total - line_discount_total).max(Decimal::ZERO);
    let general_discount = to_decimal(order.general_discount)
        .clamp(Decimal::ZERO, subtotal_after_line_discounts);
    let subtotal = (subtotal_after_line_discounts - general_discount).max(Decimal::ZERO);
    let tax = round_money(subtotal * to_decimal(order.tax_rate));
    let delivery_cost = to_decimal(order.delivery_cost).max(Decimal::ZERO);
    let total = subtotal + tax + delivery_cost;

    let total_paid = to_decimal(reconcile::total_paid(&order.payments));
    let remaining = total - total_paid;

    let totals = Totals {
        lines_total: to_f64(lines_total),
        line_discount_total: to_f64(line_discount_total),
        subtotal_after_line_discounts: to_f64(subtotal_after_line_discounts),
        general_discount: to_f64(general_discount),
        subtotal: to_f64(subtotal),
        tax: to_f64(tax),
        delivery_cost: to_f64(delivery_cost),
        total: to_f64(total),
        total_paid: to_f64(total_paid),
        remaining: to_f64(remaining),
        is_payments_valid: reconcile::is_payments_valid(to_f64(total), to_f64(total_paid)),
    };

    debug!(total = totals.total, paid = totals.total_paid, "derived order totals");
    totals
}

/// Project the totals into the selected display currencies.
///
/// The canonical currency is always the first column; a currency whose
/// rate is unavailable gets `None` cells rather than an approximation.
pub fn project(totals: &Totals, currencies: &[Currency], rates: &RateSnapshot) -> TotalsProjection {
    let mut selected = vec![Currency::CANONICAL];
    for currency in currencies {
        if !selected.contains(currency) {
            selected.push(*currency);
        }
    }

    let columns = selected
        .into_iter()
        .map(|currency| {
            let cell = |amount: f64| {
                rates
                    .from_canonical(amount, currency)
                    .map(|v| to_f64(to_decimal(v)))
            };
            CurrencyColumn {
                currency,
                subtotal: cell(totals.subtotal),
                tax: cell(totals.tax),
                delivery_cost: cell(totals.delivery_cost),
                total: cell(totals.total),
                total_paid: cell(totals.total_paid),
                remaining: cell(totals.remaining),
            }
        })
        .collect();

    TotalsProjection { columns }
}
