//! Single-editor order draft session
//!
//! The draft owns the in-memory order exclusively for one wizard session.
//! Catalog, categories, and exchange rates are a one-shot read completed
//! before computation begins; absent data degrades to "no rate / no
//! category", never a crash. Every mutation triggers a full, deterministic
//! re-derivation of the totals, and submission freezes the order into an
//! atomic snapshot for the persistence collaborator.

use crate::error::EngineError;
use crate::{discount, money, pricing, reconcile, totals};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::models::{
    AttributeSelection, Catalog, CategoryMap, Currency, ExchangeRate, RateSnapshot,
};
use shared::order::{
    DiscountInput, DiscountKind, LineSnapshot, Order, OrderLine, OrderSnapshot, PaymentInput,
    RefInstanceKey, Totals, TotalsProjection,
};
use std::collections::HashMap;
use tracing::warn;

#[cfg(test)]
mod tests;

/// One-shot read of the collaborator data a draft computes against
#[derive(Debug, Clone, Default)]
pub struct DraftContext {
    pub catalog: Catalog,
    pub categories: CategoryMap,
    pub rates: Vec<ExchangeRate>,
}

impl DraftContext {
    pub fn new(catalog: Catalog, categories: CategoryMap, rates: Vec<ExchangeRate>) -> Self {
        Self {
            catalog,
            categories,
            rates,
        }
    }
}

/// How the order is finalized
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SaleMode {
    /// Regular sale; an outstanding balance is allowed and recorded
    Standard,
    /// Counter sale; payments must match the total before finalization
    Direct,
}

/// In-memory order draft
pub struct OrderDraft {
    ctx: DraftContext,
    order: Order,
    totals: Totals,
    display_currencies: Vec<Currency>,
}

impl OrderDraft {
    /// Start a new draft, freezing a rate snapshot as of the given date
    pub fn new(ctx: DraftContext, as_of: NaiveDate) -> Self {
        let snapshot = RateSnapshot::resolve(&ctx.rates, as_of);
        Self::with_order(ctx, Order::new(snapshot))
    }

    /// Reopen an existing order. Its carried rate snapshot is
    /// authoritative; the context's live rates never override it.
    pub fn reopen(ctx: DraftContext, order: Order) -> Self {
        Self::with_order(ctx, order)
    }

    fn with_order(ctx: DraftContext, order: Order) -> Self {
        let mut draft = Self {
            ctx,
            order,
            totals: Totals::default(),
            display_currencies: vec![Currency::CANONICAL],
        };
        draft.recompute();
        draft
    }

    /// Full re-derivation of dependent totals after a mutation.
    ///
    /// Stored discounts are re-clamped to their current ceilings first so
    /// the order state itself honors the invariants, not just the derived
    /// totals.
    fn recompute(&mut self) {
        for i in 0..self.order.lines.len() {
            let base = money::to_f64(pricing::base_total(
                &self.order.lines[i],
                &self.ctx.catalog,
                &self.ctx.categories,
                &self.order.rate_snapshot,
            ));
            let line = &mut self.order.lines[i];
            line.discount = discount::clamp_discount(line.discount, base);
        }

        self.totals = totals::derive_totals(&self.order, &self.ctx.catalog, &self.ctx.categories);
        self.order.general_discount = self.totals.general_discount;
    }

    // ========== Lines ==========

    /// Add a catalog product as a new line; returns the line id
    pub fn add_line(&mut self, catalog_product_id: &str, quantity: u32) -> Result<String, EngineError> {
        let product = self
            .ctx
            .catalog
            .get(catalog_product_id)
            .ok_or_else(|| EngineError::UnknownProduct(catalog_product_id.to_string()))?;

        let base_price = match self
            .order
            .rate_snapshot
            .to_canonical(product.price, product.price_currency)
        {
            Some(converted) => money::to_f64(money::to_decimal(converted)),
            None => {
                warn!(
                    product = %product.id,
                    currency = %product.price_currency,
                    "missing exchange rate for catalog price, using raw value"
                );
                product.price
            }
        };

        let line = OrderLine {
            id: uuid::Uuid::new_v4().to_string(),
            catalog_product_id: product.id.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            base_price,
            quantity,
            selected_attributes: HashMap::new(),
            ref_edits: HashMap::new(),
            discount: 0.0,
            discount_input: None,
            observations: None,
        };
        money::validate_line(&line)?;

        let line_id = line.id.clone();
        self.order.lines.push(line);
        self.recompute();
        Ok(line_id)
    }

    pub fn remove_line(&mut self, line_id: &str) -> Result<(), EngineError> {
        let index = self
            .order
            .lines
            .iter()
            .position(|l| l.id == line_id)
            .ok_or_else(|| EngineError::LineNotFound(line_id.to_string()))?;
        self.order.lines.remove(index);
        self.recompute();
        Ok(())
    }

    pub fn set_quantity(&mut self, line_id: &str, quantity: u32) -> Result<(), EngineError> {
        if quantity == 0 {
            return Err(EngineError::InvalidOperation(
                "quantity must be at least 1".to_string(),
            ));
        }
        let line = self.line_mut(line_id)?;
        line.quantity = quantity;
        money::validate_line(line)?;
        self.recompute();
        Ok(())
    }

    pub fn set_observations(
        &mut self,
        line_id: &str,
        observations: Option<String>,
    ) -> Result<(), EngineError> {
        self.line_mut(line_id)?.observations = observations;
        Ok(())
    }

    // ========== Attributes ==========

    /// Set or clear an attribute selection on a line
    pub fn set_attribute(
        &mut self,
        line_id: &str,
        attribute_id: &str,
        selection: Option<AttributeSelection>,
    ) -> Result<(), EngineError> {
        let line = self.line_mut(line_id)?;
        match selection {
            Some(selection) => {
                line.selected_attributes
                    .insert(attribute_id.to_string(), selection);
            }
            None => {
                line.selected_attributes.remove(attribute_id);
            }
        }
        self.recompute();
        Ok(())
    }

    /// Set or clear the per-instance attribute edits for a referenced
    /// product. Clearing falls back to the referenced product's defaults.
    pub fn set_ref_edit(
        &mut self,
        line_id: &str,
        key: RefInstanceKey,
        selections: Option<HashMap<String, AttributeSelection>>,
    ) -> Result<(), EngineError> {
        let line = self.line_mut(line_id)?;
        match selections {
            Some(selections) => {
                line.ref_edits.insert(key, selections);
            }
            None => {
                line.ref_edits.remove(&key);
            }
        }
        self.recompute();
        Ok(())
    }

    // ========== Discounts ==========

    /// Apply a per-product discount from operator input
    pub fn set_line_discount(
        &mut self,
        line_id: &str,
        raw_value: f64,
        kind: DiscountKind,
        currency: Currency,
    ) -> Result<(), EngineError> {
        money::require_finite(raw_value, "discount")?;

        let (base, category_name) = {
            let line = self
                .order
                .line(line_id)
                .ok_or_else(|| EngineError::LineNotFound(line_id.to_string()))?;
            let base = money::to_f64(pricing::base_total(
                line,
                &self.ctx.catalog,
                &self.ctx.categories,
                &self.order.rate_snapshot,
            ));
            (base, line.category.clone())
        };

        let input = DiscountInput {
            kind,
            raw_value,
            currency,
        };
        let category = self.ctx.categories.get(&category_name);
        let computed = discount::line_discount(base, &input, category, &self.order.rate_snapshot);

        let line = self.line_mut(line_id)?;
        line.discount = computed;
        line.discount_input = Some(input);
        self.recompute();
        Ok(())
    }

    /// Switch how a line's discount is displayed without re-deriving the
    /// stored canonical amount
    pub fn set_line_discount_display(
        &mut self,
        line_id: &str,
        kind: DiscountKind,
        currency: Currency,
    ) -> Result<(), EngineError> {
        let line = self.line_mut(line_id)?;
        if let Some(input) = &mut line.discount_input {
            input.kind = kind;
            input.currency = currency;
        }
        Ok(())
    }

    /// Apply the order-level discount from operator input
    pub fn set_general_discount(
        &mut self,
        raw_value: f64,
        kind: DiscountKind,
        currency: Currency,
    ) -> Result<(), EngineError> {
        money::require_finite(raw_value, "general discount")?;

        let input = DiscountInput {
            kind,
            raw_value,
            currency,
        };
        self.order.general_discount = discount::general_discount(
            self.totals.subtotal_after_line_discounts,
            &input,
            &self.order.rate_snapshot,
        );
        self.order.general_discount_input = Some(input);
        self.recompute();
        Ok(())
    }

    /// Switch how the general discount is displayed; the stored amount is
    /// untouched
    pub fn set_general_discount_display(&mut self, kind: DiscountKind, currency: Currency) {
        if let Some(input) = &mut self.order.general_discount_input {
            input.kind = kind;
            input.currency = currency;
        }
    }

    pub fn set_delivery_cost(&mut self, cost: f64) -> Result<(), EngineError> {
        money::require_finite(cost, "delivery_cost")?;
        if cost < 0.0 {
            return Err(EngineError::InvalidOperation(
                "delivery_cost must be non-negative".to_string(),
            ));
        }
        self.order.delivery_cost = cost;
        self.recompute();
        Ok(())
    }

    // ========== Payments ==========

    /// Normalize and record a payment entry; returns the payment id
    pub fn add_payment(&mut self, input: PaymentInput) -> Result<String, EngineError> {
        money::validate_payment(&input)?;

        let payment = reconcile::normalize_payment(
            &input,
            &self.order.rate_snapshot,
            chrono::Utc::now().timestamp_millis(),
        );
        let payment_id = payment.id.clone();
        self.order.payments.push(payment);
        self.recompute();
        Ok(payment_id)
    }

    pub fn remove_payment(&mut self, payment_id: &str) -> Result<(), EngineError> {
        let index = self
            .order
            .payments
            .iter()
            .position(|p| p.id == payment_id)
            .ok_or_else(|| EngineError::PaymentNotFound(payment_id.to_string()))?;
        self.order.payments.remove(index);
        self.recompute();
        Ok(())
    }

    // ========== Display ==========

    /// Toggle a foreign display currency; the canonical currency is always
    /// shown and cannot be toggled off
    pub fn toggle_display_currency(&mut self, currency: Currency) {
        if currency.is_canonical() {
            return;
        }
        if let Some(index) = self.display_currencies.iter().position(|c| *c == currency) {
            self.display_currencies.remove(index);
        } else {
            self.display_currencies.push(currency);
        }
    }

    pub fn display_currencies(&self) -> &[Currency] {
        &self.display_currencies
    }

    // ========== Accessors ==========

    pub fn order(&self) -> &Order {
        &self.order
    }

    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    pub fn projection(&self) -> TotalsProjection {
        totals::project(
            &self.totals,
            &self.display_currencies,
            &self.order.rate_snapshot,
        )
    }

    fn line_mut(&mut self, line_id: &str) -> Result<&mut OrderLine, EngineError> {
        self.order
            .line_mut(line_id)
            .ok_or_else(|| EngineError::LineNotFound(line_id.to_string()))
    }

    fn line_snapshots(&self) -> Vec<LineSnapshot> {
        self.order
            .lines
            .iter()
            .map(|line| {
                let unit_price = pricing::compute_unit_price(
                    line,
                    &self.ctx.catalog,
                    &self.ctx.categories,
                    &self.order.rate_snapshot,
                );
                let base_total = money::to_f64(pricing::base_total(
                    line,
                    &self.ctx.catalog,
                    &self.ctx.categories,
                    &self.order.rate_snapshot,
                ));
                LineSnapshot {
                    id: line.id.clone(),
                    catalog_product_id: line.catalog_product_id.clone(),
                    name: line.name.clone(),
                    category: line.category.clone(),
                    quantity: line.quantity,
                    unit_price,
                    base_total,
                    discount: line.discount,
                    discount_input: line.discount_input.clone(),
                    observations: line.observations.clone(),
                }
            })
            .collect()
    }

    // ========== Finalization ==========

    /// Freeze the order into the snapshot handed to the persistence
    /// collaborator. Direct sales require the payments to match the total;
    /// standard sales record the outstanding balance. The draft stays
    /// editable when a direct freeze is refused.
    pub fn freeze(&self, mode: SaleMode) -> Result<OrderSnapshot, EngineError> {
        if mode == SaleMode::Direct && !self.totals.is_payments_valid {
            return Err(EngineError::UnpaidBalance {
                remaining: self.totals.remaining,
            });
        }

        let lines = self.line_snapshots();
        Ok(OrderSnapshot::from_order(&self.order, lines, self.totals.clone()))
    }
}
