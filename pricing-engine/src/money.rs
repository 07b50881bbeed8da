//! Money calculation utilities using rust_decimal for precision
//!
//! All calculations are done using `Decimal` internally, then converted to
//! `f64` for storage/serialization, rounded to 2 decimal places.

use crate::error::EngineError;
use rust_decimal::prelude::*;
use shared::order::{OrderLine, PaymentInput};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed price per line (Bs 1,000,000,000)
const MAX_PRICE: f64 = 1_000_000_000.0;
/// Maximum allowed quantity per line
const MAX_QUANTITY: u32 = 9999;
/// Maximum allowed payment amount (Bs 1,000,000,000)
const MAX_PAYMENT_AMOUNT: f64 = 1_000_000_000.0;

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
pub fn require_finite(value: f64, field_name: &str) -> Result<(), EngineError> {
    if !value.is_finite() {
        return Err(EngineError::InvalidOperation(format!(
            "{} must be a finite number, got {}",
            field_name, value
        )));
    }
    Ok(())
}

/// Validate an order line before recomputation
pub fn validate_line(line: &OrderLine) -> Result<(), EngineError> {
    require_finite(line.base_price, "base_price")?;
    if line.base_price < 0.0 {
        return Err(EngineError::InvalidOperation(format!(
            "base_price must be non-negative, got {}",
            line.base_price
        )));
    }
    if line.base_price > MAX_PRICE {
        return Err(EngineError::InvalidOperation(format!(
            "base_price exceeds maximum allowed ({}), got {}",
            MAX_PRICE, line.base_price
        )));
    }

    if line.quantity == 0 {
        return Err(EngineError::InvalidOperation(
            "quantity must be at least 1".to_string(),
        ));
    }
    if line.quantity > MAX_QUANTITY {
        return Err(EngineError::InvalidOperation(format!(
            "quantity exceeds maximum allowed ({}), got {}",
            MAX_QUANTITY, line.quantity
        )));
    }

    require_finite(line.discount, "discount")?;
    if line.discount < 0.0 {
        return Err(EngineError::InvalidOperation(format!(
            "discount must be non-negative, got {}",
            line.discount
        )));
    }

    Ok(())
}

/// Validate a payment entry before normalization
pub fn validate_payment(payment: &PaymentInput) -> Result<(), EngineError> {
    require_finite(payment.amount, "payment amount")?;
    if payment.amount <= 0.0 {
        return Err(EngineError::InvalidAmount);
    }
    if payment.amount > MAX_PAYMENT_AMOUNT {
        return Err(EngineError::InvalidOperation(format!(
            "payment amount exceeds maximum allowed ({}), got {}",
            MAX_PAYMENT_AMOUNT, payment.amount
        )));
    }

    if let Some(received) = payment.cash_received {
        require_finite(received, "cash_received")?;
        if received < 0.0 {
            return Err(EngineError::InvalidOperation(
                "cash_received must be non-negative".to_string(),
            ));
        }
    }

    Ok(())
}

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Round a Decimal to monetary precision
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: f64, b: f64) -> bool {
    let diff = (to_decimal(a) - to_decimal(b)).abs();
    diff < MONEY_TOLERANCE
}
