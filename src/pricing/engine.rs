//! The pricing formula.
//!
//! ```text
//! base        = hours * hourly_profit
//! complexity  = lines_of_code / 1000 + file_count * 0.5
//! total_usd   = base + complexity * 10
//! converted   = round2(total_usd * rate)
//! ```

use crate::domain::{CurrencyCode, ExchangeRate, PriceResult};

use super::input::PricingInput;

/// USD added per unit of complexity.
const COMPLEXITY_WEIGHT: f64 = 10.0;
const LINES_PER_UNIT: f64 = 1000.0;
const UNITS_PER_FILE: f64 = 0.5;

/// Compute a quote from validated inputs and an already-resolved rate.
pub fn compute_price(input: &PricingInput, rate: ExchangeRate, currency: CurrencyCode) -> PriceResult {
    let base = input.hours * input.hourly_profit;
    let complexity = complexity_bonus(input.lines_of_code, input.file_count);
    let amount_usd = base + complexity * COMPLEXITY_WEIGHT;

    PriceResult {
        amount_usd,
        amount_converted: round2(amount_usd * rate.value()),
        currency,
        rate,
    }
}

/// Complexity units contributed by code size.
pub fn complexity_bonus(lines_of_code: u64, file_count: u64) -> f64 {
    lines_of_code as f64 / LINES_PER_UNIT + file_count as f64 * UNITS_PER_FILE
}

/// Round to 2 decimals, half away from zero, on the value scaled by 100.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(hours: f64, profit: f64, lines: u64, files: u64) -> PricingInput {
        PricingInput {
            hours,
            hourly_profit: profit,
            lines_of_code: lines,
            file_count: files,
        }
    }

    #[test]
    fn usa_scenario() {
        let r = compute_price(&input(10.0, 20.0, 5000, 3), ExchangeRate::IDENTITY, CurrencyCode::Usd);
        assert_eq!(complexity_bonus(5000, 3), 6.5);
        assert_eq!(r.amount_usd, 265.0);
        assert_eq!(r.amount_converted, 265.0);
        assert_eq!(r.currency, CurrencyCode::Usd);
    }

    #[test]
    fn japan_scenario() {
        let rate = ExchangeRate::new(150.0).unwrap();
        let r = compute_price(&input(10.0, 20.0, 5000, 3), rate, CurrencyCode::Jpy);
        assert_eq!(r.amount_usd, 265.0);
        assert_eq!(r.amount_converted, 39750.0);
        assert_eq!(r.display_amount(), "39750.00 JPY");
    }

    #[test]
    fn identity_rate_matches_formula() {
        let hours = [0.0, 1.0, 2.5, 7.25, 160.0];
        let profits = [0.0, 15.0, 33.33, 120.0];
        let lines = [0u64, 1, 999, 1234, 250_000];
        let files = [0u64, 1, 3, 17];

        for &h in &hours {
            for &p in &profits {
                for &l in &lines {
                    for &f in &files {
                        let expected = round2(h * p + ((l as f64 / 1000.0) + (f as f64 * 0.5)) * 10.0);
                        let r = compute_price(&input(h, p, l, f), ExchangeRate::IDENTITY, CurrencyCode::Usd);
                        assert_eq!(r.amount_converted, expected, "h={h} p={p} l={l} f={f}");
                    }
                }
            }
        }
    }

    #[test]
    fn same_arguments_give_same_result() {
        let rate = ExchangeRate::new(0.92).unwrap();
        let i = input(12.5, 41.0, 8200, 14);
        let a = compute_price(&i, rate, CurrencyCode::Eur);
        let b = compute_price(&i, rate, CurrencyCode::Eur);
        assert_eq!(a, b);
    }

    #[test]
    fn converted_amount_has_at_most_two_decimals() {
        let rate = ExchangeRate::new(32.123_456).unwrap();
        let r = compute_price(&input(3.3, 17.77, 1234, 5), rate, CurrencyCode::Try);
        let cents = r.amount_converted * 100.0;
        assert!((cents - cents.round()).abs() < 1e-6, "got {}", r.amount_converted);
    }

    #[test]
    fn round2_is_half_away_from_zero() {
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(2.5), 2.5);
        assert_eq!(round2(-0.125), -0.13);
        assert_eq!(round2(1.234), 1.23);
    }
}
