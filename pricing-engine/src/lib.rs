//! Multi-currency order pricing and payment reconciliation engine
//!
//! Pure computation that turns selected products, chosen attributes,
//! discount settings, a frozen exchange-rate snapshot, and payment entries
//! into a consistent, currency-correct financial breakdown. Every derived
//! value is recomputed from current state on each mutation; there is no
//! memoized state to invalidate.

pub mod discount;
pub mod draft;
pub mod error;
pub mod money;
pub mod pricing;
pub mod reconcile;
pub mod totals;

pub use draft::{DraftContext, OrderDraft, SaleMode};
pub use error::EngineError;
pub use totals::derive_totals;
