//! Localized display labels for category and subcategory keys.
//!
//! Labels are optional everywhere: a missing label is a lookup miss, and
//! callers fall back to the raw key.

use std::collections::BTreeMap;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::document::{self, DocumentFormat};
use crate::error::CatalogError;
use crate::language::Language;

/// Labels for a single language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LanguageLabels {
    #[serde(default)]
    pub categories: IndexMap<String, String>,
    /// `category → subcategory → label`.
    #[serde(default)]
    pub subcategories: IndexMap<String, IndexMap<String, String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translations {
    languages: BTreeMap<Language, LanguageLabels>,
}

impl Translations {
    #[must_use]
    pub fn new(languages: BTreeMap<Language, LanguageLabels>) -> Self {
        Self { languages }
    }

    /// Parse the YAML translation document.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Yaml`] if the document is not valid YAML of the
    /// expected shape.
    pub fn from_yaml_str(content: &str) -> Result<Self, CatalogError> {
        let raw: IndexMap<String, LanguageLabels> =
            document::parse_document(content, DocumentFormat::Yaml, "<inline>")?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: IndexMap<String, LanguageLabels>) -> Self {
        let mut languages = BTreeMap::new();
        for (code, labels) in raw {
            match code.parse::<Language>() {
                Ok(language) => {
                    languages.insert(language, labels);
                }
                Err(_) => {
                    tracing::warn!(language = %code, "skipping translations for unsupported language");
                }
            }
        }
        Self { languages }
    }

    #[must_use]
    pub fn labels(&self, language: Language) -> Option<&LanguageLabels> {
        self.languages.get(&language)
    }

    #[must_use]
    pub fn category_label(&self, language: Language, category: &str) -> Option<&str> {
        self.labels(language)?
            .categories
            .get(category)
            .map(String::as_str)
    }

    #[must_use]
    pub fn subcategory_label(
        &self,
        language: Language,
        category: &str,
        subcategory: &str,
    ) -> Option<&str> {
        self.labels(language)?
            .subcategories
            .get(category)?
            .get(subcategory)
            .map(String::as_str)
    }

    /// Category label, or the key itself when untranslated.
    #[must_use]
    pub fn category_label_or_key<'a>(&'a self, language: Language, category: &'a str) -> &'a str {
        self.category_label(language, category).unwrap_or(category)
    }
}

/// Load translations from a `.yaml`/`.yml` (or `.json`) file.
///
/// # Errors
///
/// Returns `CatalogError` if the file cannot be read or parsed.
pub fn load_translations(path: &Path) -> Result<Translations, CatalogError> {
    let raw: IndexMap<String, LanguageLabels> = document::read_document(path)?;
    let translations = Translations::from_raw(raw);
    tracing::info!(
        path = %path.display(),
        languages = translations.languages.len(),
        "translations loaded"
    );
    Ok(translations)
}
