//! Read-only collaborator data shapes
//!
//! Catalog products, categories with their attribute definitions, and
//! exchange rates. The engine never mutates these; they are a one-shot
//! read completed before computation begins.

pub mod attribute;
pub mod category;
pub mod currency;
pub mod product;

pub use attribute::{AttributeKey, AttributeSelection, AttributeValue, AttributeValueType, CategoryAttribute};
pub use category::{Category, CategoryMap};
pub use currency::{Currency, ExchangeRate, RateEntry, RateSnapshot};
pub use product::{Catalog, CatalogProduct};
