//! Price computation.
//!
//! - raw form field validation (`input`)
//! - the pricing formula and rounding (`engine`)
//!
//! Nothing in here performs I/O; the exchange rate is resolved by the caller.

pub mod engine;
pub mod input;

pub use engine::*;
pub use input::*;
