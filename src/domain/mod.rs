//! Domain types shared by the pricing engine, the gateway and the front-ends.
//!
//! This module defines:
//!
//! - selection enums (`Country`, `Platform`, `Category`, `Language`)
//! - money types (`CurrencyCode`, `ExchangeRate`, `PriceResult`)
//! - the raw form as typed by the user (`QuoteForm`)
//! - UI label keys and per-language label sets (`LabelKey`, `LabelSet`)

pub mod labels;
pub mod types;

pub use labels::*;
pub use types::*;
