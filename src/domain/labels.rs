//! UI label keys and per-language label sets.

use std::collections::BTreeMap;

use super::types::Language;

/// Identifier of one piece of displayable UI text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LabelKey {
    SelectLanguage,
    Country,
    Platform,
    Category,
    Hours,
    Profit,
    Lines,
    Files,
    Calculate,
    EstimatedPrice,
    SaveTxt,
    TxtSaved,
    TxtError,
    Error,
    InvalidInput,
}

impl LabelKey {
    pub const ALL: [LabelKey; 15] = [
        LabelKey::SelectLanguage,
        LabelKey::Country,
        LabelKey::Platform,
        LabelKey::Category,
        LabelKey::Hours,
        LabelKey::Profit,
        LabelKey::Lines,
        LabelKey::Files,
        LabelKey::Calculate,
        LabelKey::EstimatedPrice,
        LabelKey::SaveTxt,
        LabelKey::TxtSaved,
        LabelKey::TxtError,
        LabelKey::Error,
        LabelKey::InvalidInput,
    ];

    /// Stable snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            LabelKey::SelectLanguage => "select_language",
            LabelKey::Country => "country",
            LabelKey::Platform => "platform",
            LabelKey::Category => "category",
            LabelKey::Hours => "hours",
            LabelKey::Profit => "profit",
            LabelKey::Lines => "lines",
            LabelKey::Files => "files",
            LabelKey::Calculate => "calculate",
            LabelKey::EstimatedPrice => "estimated_price",
            LabelKey::SaveTxt => "save_txt",
            LabelKey::TxtSaved => "txt_saved",
            LabelKey::TxtError => "txt_error",
            LabelKey::Error => "error",
            LabelKey::InvalidInput => "invalid_input",
        }
    }

    /// English source text. Every translation starts from here.
    pub fn english(self) -> &'static str {
        match self {
            LabelKey::SelectLanguage => "Select Language",
            LabelKey::Country => "Country",
            LabelKey::Platform => "Platform",
            LabelKey::Category => "Category",
            LabelKey::Hours => "Estimated Hours",
            LabelKey::Profit => "Hourly Profit ($)",
            LabelKey::Lines => "Lines of Code",
            LabelKey::Files => "Number of Files",
            LabelKey::Calculate => "Calculate",
            LabelKey::EstimatedPrice => "Estimated Price",
            LabelKey::SaveTxt => "Save as TXT",
            LabelKey::TxtSaved => "TXT file saved successfully.",
            LabelKey::TxtError => "Error saving TXT file.",
            LabelKey::Error => "Error",
            LabelKey::InvalidInput => "Please enter valid numeric values.",
        }
    }
}

/// Localized display strings for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSet {
    language: Language,
    entries: BTreeMap<LabelKey, String>,
}

impl LabelSet {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            entries: BTreeMap::new(),
        }
    }

    /// English text for the given keys.
    pub fn english(keys: &[LabelKey]) -> Self {
        let mut set = Self::new(Language::BASE);
        for &key in keys {
            set.insert(key, key.english());
        }
        set
    }

    /// English text for every key.
    pub fn english_all() -> Self {
        Self::english(&LabelKey::ALL)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn insert(&mut self, key: LabelKey, text: impl Into<String>) {
        self.entries.insert(key, text.into());
    }

    /// Text for `key`, or the English text if this set does not carry it.
    pub fn get(&self, key: LabelKey) -> &str {
        self.entries
            .get(&key)
            .map(String::as_str)
            .unwrap_or_else(|| key.english())
    }

    pub fn contains(&self, key: LabelKey) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn keys(&self) -> impl Iterator<Item = LabelKey> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (LabelKey, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
