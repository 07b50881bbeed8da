//! Currency and exchange-rate model
//!
//! All monetary amounts on an order are stored in bolívares (`Bs`), the
//! canonical currency. Foreign currencies are an input/display convenience
//! converted at the boundary through a [`RateSnapshot`] frozen at
//! order-creation time. Later rate changes never retroactively alter a
//! created order's totals.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Supported currencies (closed set)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Currency {
    /// Bolívares - the canonical currency for all stored amounts
    #[default]
    Bs,
    Usd,
    Eur,
}

impl Currency {
    /// The currency every stored monetary field is denominated in
    pub const CANONICAL: Currency = Currency::Bs;

    pub fn is_canonical(&self) -> bool {
        *self == Self::CANONICAL
    }

    /// Non-canonical currencies, in display order
    pub fn foreign() -> [Currency; 2] {
        [Currency::Usd, Currency::Eur]
    }

    /// Operator-facing symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Bs => "Bs",
            Currency::Usd => "$",
            Currency::Eur => "€",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Exchange rate row as supplied by the collaborator
///
/// `rate` is the number of canonical units per 1 foreign unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub currency: Currency,
    pub rate: f64,
    pub effective_date: NaiveDate,
    pub is_active: bool,
}

/// A frozen rate for one foreign currency
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RateEntry {
    pub rate: f64,
    pub effective_date: NaiveDate,
}

/// Exchange rates frozen at order-creation time
///
/// Once captured on an order the snapshot is authoritative: live rates must
/// never override it. A foreign currency with no entry is presentationally
/// unavailable - it is never silently defaulted to 1:1.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RateSnapshot {
    #[serde(default)]
    entries: HashMap<Currency, RateEntry>,
}

impl RateSnapshot {
    /// Resolve a snapshot from the collaborator's rate rows as of a date.
    ///
    /// Per foreign currency, picks the most recent active rate with
    /// `effective_date <= as_of`; when every active rate postdates `as_of`,
    /// falls back to the latest active rate ever recorded. A currency with
    /// no active rate at all stays absent.
    pub fn resolve(rates: &[ExchangeRate], as_of: NaiveDate) -> Self {
        let mut entries = HashMap::new();

        for currency in Currency::foreign() {
            let active = rates
                .iter()
                .filter(|r| r.currency == currency && r.is_active && r.rate > 0.0);

            let chosen = active
                .clone()
                .filter(|r| r.effective_date <= as_of)
                .max_by_key(|r| r.effective_date)
                .or_else(|| active.max_by_key(|r| r.effective_date));

            if let Some(row) = chosen {
                entries.insert(
                    currency,
                    RateEntry {
                        rate: row.rate,
                        effective_date: row.effective_date,
                    },
                );
            }
        }

        Self { entries }
    }

    /// Rate in canonical units per 1 unit of `currency`.
    ///
    /// The canonical currency always resolves to 1.0.
    pub fn rate_for(&self, currency: Currency) -> Option<f64> {
        if currency.is_canonical() {
            return Some(1.0);
        }
        self.entries.get(&currency).map(|e| e.rate)
    }

    pub fn entry(&self, currency: Currency) -> Option<&RateEntry> {
        self.entries.get(&currency)
    }

    /// Whether `currency` can be converted/displayed with this snapshot
    pub fn is_available(&self, currency: Currency) -> bool {
        currency.is_canonical() || self.entries.contains_key(&currency)
    }

    /// Convert an amount denominated in `currency` into canonical units.
    ///
    /// `None` when the needed rate is missing; callers decide how to
    /// degrade.
    pub fn to_canonical(&self, amount: f64, currency: Currency) -> Option<f64> {
        self.rate_for(currency).map(|rate| amount * rate)
    }

    /// Project a canonical amount into `currency` for display.
    pub fn from_canonical(&self, amount: f64, currency: Currency) -> Option<f64> {
        self.rate_for(currency).map(|rate| amount / rate)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rate(currency: Currency, rate: f64, effective: NaiveDate, active: bool) -> ExchangeRate {
        ExchangeRate {
            currency,
            rate,
            effective_date: effective,
            is_active: active,
        }
    }

    #[test]
    fn test_resolve_picks_most_recent_on_or_before() {
        let rates = vec![
            rate(Currency::Usd, 35.0, date(2024, 1, 1), true),
            rate(Currency::Usd, 36.5, date(2024, 2, 1), true),
            rate(Currency::Usd, 38.0, date(2024, 3, 1), true),
        ];

        let snapshot = RateSnapshot::resolve(&rates, date(2024, 2, 15));
        assert_eq!(snapshot.rate_for(Currency::Usd), Some(36.5));
    }

    #[test]
    fn test_resolve_falls_back_to_latest_when_all_postdate() {
        let rates = vec![
            rate(Currency::Usd, 36.5, date(2024, 2, 1), true),
            rate(Currency::Usd, 38.0, date(2024, 3, 1), true),
        ];

        let snapshot = RateSnapshot::resolve(&rates, date(2024, 1, 1));
        assert_eq!(snapshot.rate_for(Currency::Usd), Some(38.0));
    }

    #[test]
    fn test_resolve_ignores_inactive_rates() {
        let rates = vec![
            rate(Currency::Usd, 36.5, date(2024, 2, 1), true),
            rate(Currency::Usd, 99.0, date(2024, 3, 1), false),
        ];

        let snapshot = RateSnapshot::resolve(&rates, date(2024, 3, 15));
        assert_eq!(snapshot.rate_for(Currency::Usd), Some(36.5));
    }

    #[test]
    fn test_missing_currency_stays_unavailable() {
        let rates = vec![rate(Currency::Usd, 36.5, date(2024, 2, 1), true)];

        let snapshot = RateSnapshot::resolve(&rates, date(2024, 3, 1));
        assert!(snapshot.is_available(Currency::Usd));
        assert!(!snapshot.is_available(Currency::Eur));
        assert_eq!(snapshot.rate_for(Currency::Eur), None);
        assert_eq!(snapshot.from_canonical(100.0, Currency::Eur), None);
    }

    #[test]
    fn test_canonical_always_available() {
        let snapshot = RateSnapshot::default();
        assert!(snapshot.is_available(Currency::Bs));
        assert_eq!(snapshot.rate_for(Currency::Bs), Some(1.0));
        assert_eq!(snapshot.to_canonical(50.0, Currency::Bs), Some(50.0));
    }

    #[test]
    fn test_round_trip_conversion() {
        let rates = vec![rate(Currency::Usd, 36.5, date(2024, 2, 1), true)];
        let snapshot = RateSnapshot::resolve(&rates, date(2024, 2, 1));

        let amount = 1234.56;
        let foreign = snapshot.from_canonical(amount, Currency::Usd).unwrap();
        let back = snapshot.to_canonical(foreign, Currency::Usd).unwrap();
        assert!((back - amount).abs() < 1e-6);
    }
}
