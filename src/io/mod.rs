//! Input/output helpers.
//!
//! - plain-text quote export (`export`)

pub mod export;

pub use export::*;
