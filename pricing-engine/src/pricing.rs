//! Attribute price composer
//!
//! Resolves a line's effective unit price: base price plus adjustments from
//! the selected attribute values, plus the prices of referenced catalog
//! products (ProductRef attributes), each inclusive of its own attribute
//! adjustments. All results are in canonical currency.

use crate::money::{round_money, to_decimal, to_f64};
use rust_decimal::Decimal;
use shared::models::{
    AttributeSelection, AttributeValueType, Catalog, Category, CategoryMap, Currency, RateSnapshot,
};
use shared::order::{OrderLine, RefInstanceKey};
use std::collections::HashMap;
use tracing::warn;

/// Convert an attribute adjustment to canonical currency.
///
/// When the needed rate is missing, the raw numeric value is used
/// unconverted. This is the documented lossy fallback, not a fatal error;
/// display layers render "—" instead of a converted figure.
fn adjustment_to_canonical(value: f64, currency: Currency, rates: &RateSnapshot) -> Decimal {
    match rates.to_canonical(value, currency) {
        Some(converted) => to_decimal(converted),
        None => {
            warn!(
                currency = %currency,
                value,
                "missing exchange rate for attribute adjustment, using raw value"
            );
            to_decimal(value)
        }
    }
}

/// Sum the adjustments of the Number/Select/MultipleSelect attributes of
/// `category` for the given selections. ProductRef attributes are priced
/// separately.
fn attribute_adjustments(
    selections: &HashMap<String, AttributeSelection>,
    category: &Category,
    rates: &RateSnapshot,
) -> Decimal {
    let mut sum = Decimal::ZERO;

    for attr in &category.attributes {
        if attr.value_type == AttributeValueType::ProductRef {
            continue;
        }

        let Some(selection) = selections.get(&attr.key.id) else {
            continue;
        };

        match (attr.value_type, selection) {
            (AttributeValueType::Number, AttributeSelection::Number(n)) => {
                sum += to_decimal(*n);
            }
            (AttributeValueType::Select, AttributeSelection::Value(id)) => {
                sum += selected_value_adjustment(category, &attr.key.id, id, rates);
            }
            (AttributeValueType::MultipleSelect, AttributeSelection::Values(ids)) => {
                for id in ids {
                    sum += selected_value_adjustment(category, &attr.key.id, id, rates);
                }
            }
            // Single value for a multi-select is still a valid pick
            (AttributeValueType::MultipleSelect, AttributeSelection::Value(id)) => {
                sum += selected_value_adjustment(category, &attr.key.id, id, rates);
            }
            (value_type, selection) => {
                warn!(
                    attribute = %attr.key.id,
                    ?value_type,
                    ?selection,
                    "attribute selection does not match its value type, ignoring"
                );
            }
        }
    }

    sum
}

fn selected_value_adjustment(
    category: &Category,
    attribute_id: &str,
    value_id: &str,
    rates: &RateSnapshot,
) -> Decimal {
    let Some(value) = category
        .attribute(attribute_id)
        .and_then(|a| a.value(value_id))
    else {
        warn!(attribute = attribute_id, value = value_id, "unknown attribute value, ignoring");
        return Decimal::ZERO;
    };

    adjustment_to_canonical(value.price_adjustment, value.price_adjustment_currency, rates)
}

/// Contribution of one ProductRef attribute: every value is a mandatory
/// bundled component, so all referenced products are included regardless of
/// operator selection. Each contributes its own price plus the attribute
/// adjustments of its per-instance edit record, falling back to the
/// referenced product's default selections when no edit exists.
fn product_ref_contribution(
    line: &OrderLine,
    attribute_id: &str,
    values: &[shared::models::AttributeValue],
    catalog: &Catalog,
    categories: &CategoryMap,
    rates: &RateSnapshot,
) -> Decimal {
    let mut sum = Decimal::ZERO;

    for value in values {
        let Some(product_id) = &value.product_id else {
            warn!(attribute = attribute_id, value = %value.id, "ProductRef value without product id");
            continue;
        };
        let Some(product) = catalog.get(product_id) else {
            warn!(product = %product_id, "referenced product missing from catalog, ignoring");
            continue;
        };

        sum += adjustment_to_canonical(product.price, product.price_currency, rates);

        let key = RefInstanceKey::new(attribute_id, product_id.clone());
        let selections = line.ref_edits.get(&key).unwrap_or(&product.attributes);

        if let Some(ref_category) = categories.get(&product.category) {
            sum += attribute_adjustments(selections, ref_category, rates);
        }
    }

    sum
}

/// Effective per-unit price of a line in canonical currency.
///
/// A line whose category is unknown prices at its base price alone; absent
/// catalog data degrades, it never fails.
pub fn unit_price(
    line: &OrderLine,
    catalog: &Catalog,
    categories: &CategoryMap,
    rates: &RateSnapshot,
) -> Decimal {
    let mut price = to_decimal(line.base_price);

    if let Some(category) = categories.get(&line.category) {
        price += attribute_adjustments(&line.selected_attributes, category, rates);

        for attr in &category.attributes {
            if attr.value_type == AttributeValueType::ProductRef {
                price += product_ref_contribution(
                    line,
                    &attr.key.id,
                    &attr.values,
                    catalog,
                    categories,
                    rates,
                );
            }
        }
    }

    round_money(price.max(Decimal::ZERO))
}

/// `unit_price * quantity` - the base total the discount engine works from
pub fn base_total(
    line: &OrderLine,
    catalog: &Catalog,
    categories: &CategoryMap,
    rates: &RateSnapshot,
) -> Decimal {
    round_money(unit_price(line, catalog, categories, rates) * Decimal::from(line.quantity))
}

/// Convenience f64 accessor for the per-unit price
pub fn compute_unit_price(
    line: &OrderLine,
    catalog: &Catalog,
    categories: &CategoryMap,
    rates: &RateSnapshot,
) -> f64 {
    to_f64(unit_price(line, catalog, categories, rates))
}
