//! Shared domain types.
//!
//! Selections are closed enums so the TUI can cycle through them, but the
//! quote boundary takes the *names* as strings: an unrecognized country still
//! produces a quote (priced in USD).

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Currencies a quote can be expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    Usd,
    Try,
    Eur,
    Jpy,
}

impl CurrencyCode {
    /// Base currency all internal totals are computed in.
    pub const BASE: CurrencyCode = CurrencyCode::Usd;

    pub const ALL: [CurrencyCode; 4] = [
        CurrencyCode::Usd,
        CurrencyCode::Try,
        CurrencyCode::Eur,
        CurrencyCode::Jpy,
    ];

    /// ISO 4217 code.
    pub fn code(self) -> &'static str {
        match self {
            CurrencyCode::Usd => "USD",
            CurrencyCode::Try => "TRY",
            CurrencyCode::Eur => "EUR",
            CurrencyCode::Jpy => "JPY",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
    }

    /// Currency used for a country selection. Unknown names map to USD.
    pub fn for_country_name(name: &str) -> Self {
        Country::from_name(name)
            .map(Country::currency)
            .unwrap_or(CurrencyCode::BASE)
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Countries offered by the country selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    Usa,
    Turkey,
    Germany,
    France,
    Netherlands,
    Japan,
}

impl Country {
    pub const ALL: [Country; 6] = [
        Country::Usa,
        Country::Turkey,
        Country::Germany,
        Country::France,
        Country::Netherlands,
        Country::Japan,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Country::Usa => "USA",
            Country::Turkey => "Turkey",
            Country::Germany => "Germany",
            Country::France => "France",
            Country::Netherlands => "Netherlands",
            Country::Japan => "Japan",
        }
    }

    /// Case-insensitive lookup by display name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.display_name().eq_ignore_ascii_case(name))
    }

    pub fn currency(self) -> CurrencyCode {
        match self {
            Country::Usa => CurrencyCode::Usd,
            Country::Turkey => CurrencyCode::Try,
            Country::Germany | Country::France | Country::Netherlands => CurrencyCode::Eur,
            Country::Japan => CurrencyCode::Jpy,
        }
    }
}

/// Freelance marketplaces. Only echoed into the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Upwork,
    Freelancer,
    Fiverr,
    PeoplePerHour,
    Toptal,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::Upwork,
        Platform::Freelancer,
        Platform::Fiverr,
        Platform::PeoplePerHour,
        Platform::Toptal,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Platform::Upwork => "Upwork",
            Platform::Freelancer => "Freelancer",
            Platform::Fiverr => "Fiverr",
            Platform::PeoplePerHour => "PeoplePerHour",
            Platform::Toptal => "Toptal",
        }
    }
}

/// Project categories. Only echoed into the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Web,
    Mobile,
    Desktop,
    AiMl,
    Embedded,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Web,
        Category::Mobile,
        Category::Desktop,
        Category::AiMl,
        Category::Embedded,
        Category::Other,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Category::Web => "Web",
            Category::Mobile => "Mobile",
            Category::Desktop => "Desktop",
            Category::AiMl => "AI/ML",
            Category::Embedded => "Embedded",
            Category::Other => "Other",
        }
    }
}

/// UI languages. English is the source of truth for every label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Tr,
    De,
    Fr,
    Nl,
    Ja,
}

impl Language {
    pub const BASE: Language = Language::En;

    pub const ALL: [Language; 6] = [
        Language::En,
        Language::Tr,
        Language::De,
        Language::Fr,
        Language::Nl,
        Language::Ja,
    ];

    /// Code sent to the translation service.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Tr => "tr",
            Language::De => "de",
            Language::Fr => "fr",
            Language::Nl => "nl",
            Language::Ja => "ja",
        }
    }

    /// Name of the language in that language, as shown in the selector.
    pub fn display_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Tr => "Türkçe",
            Language::De => "Deutsch",
            Language::Fr => "Français",
            Language::Nl => "Nederlands",
            Language::Ja => "日本語",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(code))
    }
}

/// USD → target multiplier. Always positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate(f64);

impl ExchangeRate {
    pub const IDENTITY: ExchangeRate = ExchangeRate(1.0);

    pub fn new(value: f64) -> Option<Self> {
        if value.is_finite() && value > 0.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// Outcome of a single calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceResult {
    pub amount_usd: f64,
    /// `amount_usd * rate`, rounded to 2 decimals.
    pub amount_converted: f64,
    pub currency: CurrencyCode,
    pub rate: ExchangeRate,
}

impl PriceResult {
    /// `"39750.00 JPY"`.
    pub fn display_amount(&self) -> String {
        format!("{:.2} {}", self.amount_converted, self.currency)
    }
}

/// The form exactly as the user filled it in.
///
/// Numeric fields stay raw strings here; they are validated when a price is
/// calculated and echoed verbatim into the export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteForm {
    pub country: String,
    pub platform: String,
    pub category: String,
    pub hours: String,
    pub profit: String,
    pub lines: String,
    pub files: String,
}
