//! Export a quote to a plain-text file.
//!
//! One `<label>: <value>` line per form field, then the estimated price,
//! with labels in the session's current language:
//!
//! ```text
//! Freelance Rate Calculation
//! Country: Japan
//! ...
//! Estimated Price: 39750.00 JPY
//! ```

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::domain::{CurrencyCode, LabelKey, LabelSet, PriceResult, QuoteForm};
use crate::error::ExportError;

pub const EXPORT_TITLE: &str = "Freelance Rate Calculation";

/// Render the export text.
pub fn render_quote_txt(form: &QuoteForm, result: &PriceResult, labels: &LabelSet) -> String {
    let fields = [
        (LabelKey::Country, form.country.as_str()),
        (LabelKey::Platform, form.platform.as_str()),
        (LabelKey::Category, form.category.as_str()),
        (LabelKey::Hours, form.hours.as_str()),
        (LabelKey::Profit, form.profit.as_str()),
        (LabelKey::Lines, form.lines.as_str()),
        (LabelKey::Files, form.files.as_str()),
    ];

    let mut out = String::new();
    out.push_str(EXPORT_TITLE);
    out.push('\n');
    for (key, value) in fields {
        out.push_str(&format!("{}: {}\n", labels.get(key), value));
    }
    out.push_str(&format!(
        "{}: {}\n",
        labels.get(LabelKey::EstimatedPrice),
        result.display_amount()
    ));
    out
}

/// Write the export text to `path`, replacing any existing file.
pub fn write_quote_txt(
    path: &Path,
    form: &QuoteForm,
    result: &PriceResult,
    labels: &LabelSet,
) -> Result<(), ExportError> {
    let to_export_err = |source: std::io::Error| ExportError {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::create(path).map_err(to_export_err)?;
    file.write_all(render_quote_txt(form, result, labels).as_bytes())
        .map_err(to_export_err)?;
    file.flush().map_err(to_export_err)?;
    Ok(())
}

/// Recover amount and currency from the estimated-price line of an export.
pub fn parse_estimated_price(text: &str, labels: &LabelSet) -> Option<(f64, CurrencyCode)> {
    let prefix = format!("{}: ", labels.get(LabelKey::EstimatedPrice));
    let rest = text
        .lines()
        .rev()
        .find_map(|line| line.strip_prefix(prefix.as_str()))?;

    let mut parts = rest.split_whitespace();
    let amount = parts.next()?.parse::<f64>().ok()?;
    let currency = CurrencyCode::from_code(parts.next()?)?;
    Some((amount, currency))
}

/// `quote_<YYYYMMDD_HHMMSS>.txt` in the working directory.
pub fn default_export_path() -> PathBuf {
    let ts = Local::now().format("%Y%m%d_%H%M%S");
    PathBuf::from(format!("quote_{ts}.txt"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExchangeRate, Language};

    fn japan_form() -> QuoteForm {
        QuoteForm {
            country: "Japan".to_string(),
            platform: "Upwork".to_string(),
            category: "AI/ML".to_string(),
            hours: "10".to_string(),
            profit: "20".to_string(),
            lines: "5000".to_string(),
            files: "3".to_string(),
        }
    }

    fn japan_result() -> PriceResult {
        PriceResult {
            amount_usd: 265.0,
            amount_converted: 39750.0,
            currency: CurrencyCode::Jpy,
            rate: ExchangeRate::new(150.0).unwrap(),
        }
    }

    #[test]
    fn renders_one_line_per_field() {
        let text = render_quote_txt(&japan_form(), &japan_result(), &LabelSet::english_all());
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Freelance Rate Calculation",
                "Country: Japan",
                "Platform: Upwork",
                "Category: AI/ML",
                "Estimated Hours: 10",
                "Hourly Profit ($): 20",
                "Lines of Code: 5000",
                "Number of Files: 3",
                "Estimated Price: 39750.00 JPY",
            ]
        );
    }

    #[test]
    fn uses_localized_labels() {
        let mut labels = LabelSet::new(Language::De);
        labels.insert(LabelKey::Country, "Land");
        labels.insert(LabelKey::EstimatedPrice, "Geschätzter Preis");
        let text = render_quote_txt(&japan_form(), &japan_result(), &labels);
        assert!(text.contains("Land: Japan\n"));
        assert!(text.ends_with("Geschätzter Preis: 39750.00 JPY\n"));
        assert_eq!(parse_estimated_price(&text, &labels), Some((39750.0, CurrencyCode::Jpy)));
    }

    #[test]
    fn written_file_round_trips_price() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quote.txt");
        let labels = LabelSet::english_all();

        let result = PriceResult {
            amount_usd: 1234.5678,
            amount_converted: 1234.57,
            currency: CurrencyCode::Eur,
            rate: ExchangeRate::IDENTITY,
        };
        write_quote_txt(&path, &japan_form(), &result, &labels).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(parse_estimated_price(&text, &labels), Some((1234.57, CurrencyCode::Eur)));
    }

    #[test]
    fn unwritable_path_is_an_export_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("quote.txt");
        let err = write_quote_txt(&path, &japan_form(), &japan_result(), &LabelSet::english_all()).unwrap_err();
        assert_eq!(err.path, path);
    }

    #[test]
    fn parse_rejects_text_without_price_line() {
        assert_eq!(parse_estimated_price("Country: USA\n", &LabelSet::english_all()), None);
        assert_eq!(
            parse_estimated_price("Estimated Price: 12.00 GBP\n", &LabelSet::english_all()),
            None
        );
    }

    #[test]
    fn default_path_is_a_txt_file() {
        let path = default_export_path();
        let name = path.to_string_lossy();
        assert!(name.starts_with("quote_") && name.ends_with(".txt"), "{name}");
    }
}
