//! Validation of the four numeric form fields.

use crate::error::ValidationError;

/// Validated numeric inputs of a quote.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingInput {
    pub hours: f64,
    pub hourly_profit: f64,
    pub lines_of_code: u64,
    pub file_count: u64,
}

impl PricingInput {
    /// Parse raw form strings.
    ///
    /// Surrounding whitespace is ignored. Reals must be finite and
    /// non-negative; counts must be non-negative integers. The first field
    /// that fails is reported.
    pub fn parse(hours: &str, profit: &str, lines: &str, files: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            hours: parse_amount("hours", hours)?,
            hourly_profit: parse_amount("profit", profit)?,
            lines_of_code: parse_count("lines", lines)?,
            file_count: parse_count("files", files)?,
        })
    }
}

fn parse_amount(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    let invalid = || ValidationError {
        field,
        value: raw.to_string(),
    };
    let v = raw.trim().parse::<f64>().map_err(|_| invalid())?;
    if v.is_finite() && v >= 0.0 {
        Ok(v)
    } else {
        Err(invalid())
    }
}

fn parse_count(field: &'static str, raw: &str) -> Result<u64, ValidationError> {
    raw.trim().parse::<u64>().map_err(|_| ValidationError {
        field,
        value: raw.to_string(),
    })
}
