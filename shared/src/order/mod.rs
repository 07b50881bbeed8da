//! Order draft and snapshot types
//!
//! The order is assembled in-memory during a single-editor wizard session;
//! every derived monetary field is a pure function of this state. On
//! submission the order is frozen into an [`OrderSnapshot`] and handed to
//! the persistence collaborator.

pub mod payment;
pub mod snapshot;
pub mod types;

pub use payment::{Payment, PaymentInput, PaymentMethod};
pub use snapshot::{CurrencyColumn, LineSnapshot, OrderSnapshot, TotalsProjection};
pub use types::{DiscountInput, DiscountKind, Order, OrderLine, RefInstanceKey, Totals};
