//! Terminal output for the CLI.
//!
//! Formatting lives here so the pricing and gateway code stay free of
//! presentation concerns.

use crate::domain::{CurrencyCode, LabelKey, LabelSet, PriceResult, QuoteForm};

/// Format a computed quote for the terminal.
///
/// `rate_degraded` flags that the rate lookup failed and 1.0 was used.
pub fn format_quote_summary(
    form: &QuoteForm,
    result: &PriceResult,
    labels: &LabelSet,
    rate_degraded: bool,
) -> String {
    let mut out = String::new();

    out.push_str("=== fq - Freelance Rate Calculation ===\n");
    out.push_str(&format!(
        "{}: {} ({})\n",
        labels.get(LabelKey::Country),
        form.country,
        result.currency
    ));
    out.push_str(&format!("{}: {}\n", labels.get(LabelKey::Platform), form.platform));
    out.push_str(&format!("{}: {}\n", labels.get(LabelKey::Category), form.category));
    out.push_str(&format!(
        "{}: {} | {}: {}\n",
        labels.get(LabelKey::Hours),
        form.hours.trim(),
        labels.get(LabelKey::Profit),
        form.profit.trim(),
    ));
    out.push_str(&format!(
        "{}: {} | {}: {}\n",
        labels.get(LabelKey::Lines),
        form.lines.trim(),
        labels.get(LabelKey::Files),
        form.files.trim(),
    ));

    out.push('\n');
    out.push_str(&format!("Subtotal: {:.2} {}\n", result.amount_usd, CurrencyCode::BASE));
    if result.currency != CurrencyCode::BASE {
        let note = if rate_degraded { " (rate lookup failed)" } else { "" };
        out.push_str(&format!(
            "Rate: 1 {} = {:.4} {}{note}\n",
            CurrencyCode::BASE,
            result.rate.value(),
            result.currency
        ));
    }
    out.push_str(&format!(
        "{}: {}\n",
        labels.get(LabelKey::EstimatedPrice),
        result.display_amount()
    ));

    out
}

/// Format a label set as an aligned `key  text` table.
pub fn format_labels(labels: &LabelSet) -> String {
    let width = labels.keys().map(|k| k.name().len()).max().unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!(
        "Labels ({} / {}):\n",
        labels.language().code(),
        labels.language().display_name()
    ));
    for (key, text) in labels.iter() {
        out.push_str(&format!("  {:<width$}  {text}\n", key.name()));
    }
    out
}
