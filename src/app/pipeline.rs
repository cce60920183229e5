//! Shared "quote pipeline" used by both the CLI and the TUI.
//!
//! validate form -> currency for country -> resolve rate -> compute price
//!
//! The front-ends only deal with presentation.

use crate::domain::{CurrencyCode, PriceResult, QuoteForm};
use crate::error::ValidationError;
use crate::gateway::{Fallback, Gateway, RateSource, Translator};
use crate::pricing::{PricingInput, compute_price};

/// Everything a single calculation produced.
#[derive(Debug)]
pub struct QuoteOutput {
    pub result: PriceResult,
    /// Set when the rate lookup degraded to 1.0.
    pub rate_fallbacks: Vec<Fallback>,
}

/// Price a form.
///
/// Validation happens before any network call, so an invalid form never
/// triggers a rate lookup.
pub fn run_quote<R: RateSource, T: Translator>(
    gateway: &Gateway<R, T>,
    form: &QuoteForm,
) -> Result<QuoteOutput, ValidationError> {
    let input = PricingInput::parse(&form.hours, &form.profit, &form.lines, &form.files)?;
    let currency = CurrencyCode::for_country_name(&form.country);
    let rate = gateway.resolve_rate(currency);
    let result = compute_price(&input, rate.value, currency);

    Ok(QuoteOutput {
        result,
        rate_fallbacks: rate.fallbacks,
    })
}
