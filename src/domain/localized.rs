//! Parallel localized text values for the supported language set.
//!
//! Every site record carries one `LocalizedEntry` per language. Partial
//! localization is allowed while a record is pending review; the approval
//! transition requires every language to be filled.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Supported site language
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    /// Estonian
    Est,

    /// English
    Eng,

    /// Russian
    Rus,
}

impl Language {
    /// All supported languages, in canonical order
    pub const ALL: [Language; 3] = [Language::Est, Language::Eng, Language::Rus];

    /// ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Language::Est => "et",
            Language::Eng => "en",
            Language::Rus => "ru",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "et" | "est" | "estonian" => Ok(Language::Est),
            "en" | "eng" | "english" => Ok(Language::Eng),
            "ru" | "rus" | "russian" => Ok(Language::Rus),
            _ => anyhow::bail!("Unknown language: {}", s),
        }
    }
}

/// Text fields for a single language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedEntry {
    /// Site name shown on the map and in listings
    pub name: String,

    /// Long-form description
    pub description: String,

    /// Optional usage notes (opening times, etiquette, booking)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_notes: Option<String>,
}

impl LocalizedEntry {
    /// Create an entry with name and description
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            usage_notes: None,
        }
    }

    /// Attach usage notes
    pub fn with_usage_notes(mut self, notes: impl Into<String>) -> Self {
        self.usage_notes = Some(notes.into());
        self
    }

    /// Name and description are both non-empty
    pub fn is_filled(&self) -> bool {
        !self.name.trim().is_empty() && !self.description.trim().is_empty()
    }
}

/// Parallel text values keyed by language
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText(BTreeMap<Language, LocalizedEntry>);

impl LocalizedText {
    /// Create an empty value
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Insert or replace the entry for a language
    pub fn insert(&mut self, language: Language, entry: LocalizedEntry) {
        self.0.insert(language, entry);
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with(mut self, language: Language, entry: LocalizedEntry) -> Self {
        self.insert(language, entry);
        self
    }

    /// Get the entry for a language
    pub fn get(&self, language: Language) -> Option<&LocalizedEntry> {
        self.0.get(&language)
    }

    /// Languages that are absent or not filled
    pub fn missing_languages(&self) -> Vec<Language> {
        Language::ALL
            .iter()
            .copied()
            .filter(|lang| !self.0.get(lang).map(LocalizedEntry::is_filled).unwrap_or(false))
            .collect()
    }

    /// Every supported language is present and filled
    pub fn is_complete(&self) -> bool {
        self.missing_languages().is_empty()
    }

    /// Number of languages present
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// No languages present
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over present entries in canonical language order
    pub fn iter(&self) -> impl Iterator<Item = (Language, &LocalizedEntry)> {
        self.0.iter().map(|(lang, entry)| (*lang, entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_str() {
        assert_eq!("et".parse::<Language>().unwrap(), Language::Est);
        assert_eq!("estonian".parse::<Language>().unwrap(), Language::Est);
        assert_eq!("en".parse::<Language>().unwrap(), Language::Eng);
        assert_eq!("RU".parse::<Language>().unwrap(), Language::Rus);
        assert!("fi".parse::<Language>().is_err());
    }

    #[test]
    fn test_missing_languages() {
        let mut text = LocalizedText::new();
        assert_eq!(text.missing_languages(), Language::ALL.to_vec());

        text.insert(Language::Est, LocalizedEntry::new("Suitsusaun", "Kirjeldus"));
        assert_eq!(
            text.missing_languages(),
            vec![Language::Eng, Language::Rus]
        );

        // A blank entry does not count as filled
        text.insert(Language::Eng, LocalizedEntry::new("", ""));
        assert!(text.missing_languages().contains(&Language::Eng));
    }

    #[test]
    fn test_complete_localization() {
        let text = LocalizedText::new()
            .with(Language::Est, LocalizedEntry::new("Saun", "Kirjeldus"))
            .with(Language::Eng, LocalizedEntry::new("Sauna", "Description"))
            .with(Language::Rus, LocalizedEntry::new("Баня", "Описание"));

        assert!(text.is_complete());
        assert_eq!(text.len(), 3);
    }
}
