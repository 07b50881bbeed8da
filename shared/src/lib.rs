//! Shared domain types for the order pricing engine
//!
//! Data model consumed by the pricing engine: currencies and exchange-rate
//! snapshots, the read-only catalog shapes (products, categories, attribute
//! definitions), and the order types (lines, discounts, payments, frozen
//! snapshot).

pub mod models;
pub mod order;
pub mod types;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{Catalog, Category, CategoryMap, Currency, ExchangeRate, RateSnapshot};
pub use order::{Order, OrderSnapshot, Totals};
