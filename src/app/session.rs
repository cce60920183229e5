//! Interactive quote session state.
//!
//! A `QuoteSession` is what a front-end holds on to between user actions:
//! the current language and its labels, the gateway (and with it the label
//! memo), and the last successful calculation together with the form it was
//! computed from. A failed calculation never replaces the last result.

use std::path::Path;

use tracing::{info, warn};

use crate::domain::{LabelKey, LabelSet, Language, PriceResult, QuoteForm};
use crate::error::QuoteError;
use crate::gateway::{Fallback, Gateway, RateSource, Translator};
use crate::io::export::write_quote_txt;

use super::pipeline::run_quote;

#[derive(Debug, Clone)]
struct CurrentQuote {
    form: QuoteForm,
    result: PriceResult,
    rate_degraded: bool,
}

pub struct QuoteSession<R, T> {
    gateway: Gateway<R, T>,
    language: Language,
    labels: LabelSet,
    current: Option<CurrentQuote>,
}

impl<R: RateSource, T: Translator> QuoteSession<R, T> {
    /// Start in English with no result.
    pub fn new(gateway: Gateway<R, T>) -> Self {
        Self {
            gateway,
            language: Language::BASE,
            labels: LabelSet::english_all(),
            current: None,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    pub fn label(&self, key: LabelKey) -> &str {
        self.labels.get(key)
    }

    pub fn gateway(&self) -> &Gateway<R, T> {
        &self.gateway
    }

    /// Last successful result, if any.
    pub fn result(&self) -> Option<&PriceResult> {
        self.current.as_ref().map(|c| &c.result)
    }

    /// Whether the current result was priced with the 1.0 fallback rate.
    pub fn rate_degraded(&self) -> bool {
        self.current.as_ref().is_some_and(|c| c.rate_degraded)
    }

    /// `"<Estimated Price>: 265.00 USD"` in the current language.
    pub fn price_line(&self) -> Option<String> {
        self.result()
            .map(|r| format!("{}: {}", self.label(LabelKey::EstimatedPrice), r.display_amount()))
    }

    /// Switch language, translating every label. Returns the keys that fell
    /// back to English.
    pub fn change_language(&mut self, language: Language) -> Vec<Fallback> {
        let resolved = self.gateway.resolve_labels(&LabelKey::ALL, language);
        self.language = language;
        self.labels = resolved.value;
        resolved.fallbacks
    }

    /// Price `form` and make it the current result.
    pub fn calculate(&mut self, form: &QuoteForm) -> Result<&PriceResult, QuoteError> {
        let output = match run_quote(&self.gateway, form) {
            Ok(output) => output,
            Err(err) => {
                warn!(error = %err, "rejected quote form");
                return Err(err.into());
            }
        };

        info!(
            amount_usd = output.result.amount_usd,
            amount = output.result.amount_converted,
            currency = output.result.currency.code(),
            degraded = !output.rate_fallbacks.is_empty(),
            "calculated quote"
        );

        let current = self.current.insert(CurrentQuote {
            form: form.clone(),
            result: output.result,
            rate_degraded: !output.rate_fallbacks.is_empty(),
        });
        Ok(&current.result)
    }

    /// Write the current result to `path` with the current labels.
    pub fn export(&self, path: &Path) -> Result<(), QuoteError> {
        let current = self.current.as_ref().ok_or(QuoteError::NothingToExport)?;
        if let Err(err) = write_quote_txt(path, &current.form, &current.result, &self.labels) {
            warn!(error = %err, "export failed");
            return Err(err.into());
        }
        info!(path = %path.display(), "exported quote");
        Ok(())
    }

    /// Generic, localized message to show for `err`.
    pub fn message_for(&self, err: &QuoteError) -> &str {
        match err {
            QuoteError::Validation(_) => self.label(LabelKey::InvalidInput),
            QuoteError::Export(_) | QuoteError::NothingToExport => self.label(LabelKey::TxtError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CurrencyCode;
    use crate::gateway::fakes::{FixedRates, Shouty};
    use crate::io::export::parse_estimated_price;

    fn session(rates: &[(CurrencyCode, f64)], failing: &[&'static str]) -> QuoteSession<FixedRates, Shouty> {
        QuoteSession::new(Gateway::new(FixedRates::new(rates), Shouty::new(failing)))
    }

    fn form(country: &str, hours: &str) -> QuoteForm {
        QuoteForm {
            country: country.to_string(),
            platform: "Fiverr".to_string(),
            category: "Mobile".to_string(),
            hours: hours.to_string(),
            profit: "20".to_string(),
            lines: "5000".to_string(),
            files: "3".to_string(),
        }
    }

    #[test]
    fn starts_in_english_without_result() {
        let s = session(&[], &[]);
        assert_eq!(s.language(), Language::En);
        assert_eq!(s.label(LabelKey::Calculate), "Calculate");
        assert!(s.result().is_none());
        assert!(s.price_line().is_none());
    }

    #[test]
    fn calculate_sets_current_result() {
        let mut s = session(&[(CurrencyCode::Jpy, 150.0)], &[]);
        let r = s.calculate(&form("Japan", "10")).unwrap().clone();
        assert_eq!(r.amount_converted, 39750.0);
        assert_eq!(s.result(), Some(&r));
        assert_eq!(s.price_line().as_deref(), Some("Estimated Price: 39750.00 JPY"));
    }

    #[test]
    fn degraded_rate_is_remembered_with_the_result() {
        let mut s = session(&[], &[]);
        s.calculate(&form("Turkey", "10")).unwrap();
        assert!(s.rate_degraded());
        assert_eq!(s.result().map(|r| r.currency), Some(CurrencyCode::Try));

        s.calculate(&form("USA", "10")).unwrap();
        assert!(!s.rate_degraded());
    }

    #[test]
    fn invalid_input_keeps_previous_result() {
        let mut s = session(&[], &[]);
        let first = s.calculate(&form("USA", "10")).unwrap().clone();

        let err = s.calculate(&form("USA", "abc")).unwrap_err();
        assert!(matches!(err, QuoteError::Validation(_)));
        assert_eq!(s.message_for(&err), "Please enter valid numeric values.");
        assert_eq!(s.result(), Some(&first));
    }

    #[test]
    fn export_before_calculation_fails() {
        let s = session(&[], &[]);
        let dir = tempfile::tempdir().unwrap();
        let err = s.export(&dir.path().join("q.txt")).unwrap_err();
        assert!(matches!(err, QuoteError::NothingToExport));
        assert_eq!(s.message_for(&err), "Error saving TXT file.");
    }

    #[test]
    fn export_round_trips_current_result() {
        let mut s = session(&[(CurrencyCode::Jpy, 150.0)], &[]);
        s.calculate(&form("Japan", "10")).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quote.txt");
        s.export(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Platform: Fiverr\n"));
        assert_eq!(parse_estimated_price(&text, s.labels()), Some((39750.0, CurrencyCode::Jpy)));
    }

    #[test]
    fn export_uses_current_language() {
        let mut s = session(&[], &["Lines of Code"]);
        s.calculate(&form("USA", "10")).unwrap();
        let fallbacks = s.change_language(Language::Nl);
        assert_eq!(fallbacks.len(), 1);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quote.txt");
        s.export(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("nl:COUNTRY: USA\n"));
        assert!(text.contains("Lines of Code: 5000\n"));
        assert!(text.contains("nl:ESTIMATED PRICE: 265.00 USD\n"));
        assert_eq!(parse_estimated_price(&text, s.labels()), Some((265.0, CurrencyCode::Usd)));
    }

    #[test]
    fn switching_back_to_a_language_uses_the_memo() {
        let mut s = session(&[], &[]);
        s.change_language(Language::De);
        s.change_language(Language::En);
        assert_eq!(s.label(LabelKey::Hours), "Estimated Hours");
        s.change_language(Language::De);
        assert_eq!(s.label(LabelKey::Hours), "de:ESTIMATED HOURS");
        assert_eq!(s.gateway().translator().calls.borrow().len(), LabelKey::ALL.len());
    }

    #[test]
    fn unwritable_export_is_reported_generically() {
        let mut s = session(&[], &[]);
        s.calculate(&form("USA", "10")).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let err = s.export(&dir.path().join("nope").join("q.txt")).unwrap_err();
        assert!(matches!(err, QuoteError::Export(_)));
        assert_eq!(s.message_for(&err), "Error saving TXT file.");
    }
}
