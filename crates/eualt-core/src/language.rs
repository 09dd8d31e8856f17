use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Display languages the catalog is published in.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Fr,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Fr, Language::En];

    /// Two-letter code used in seed documents, URLs and CLI flags.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fr" => Ok(Language::Fr),
            "en" => Ok(Language::En),
            _ => Err(CatalogError::UnsupportedLanguage(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!("fr".parse::<Language>().unwrap(), Language::Fr);
        assert_eq!(" EN ".parse::<Language>().unwrap(), Language::En);
    }

    #[test]
    fn rejects_unknown_code() {
        let err = "de".parse::<Language>().unwrap_err();
        assert!(matches!(err, CatalogError::UnsupportedLanguage(ref code) if code == "de"));
    }

    #[test]
    fn default_is_french() {
        assert_eq!(Language::default(), Language::Fr);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Language::En).unwrap(), "\"en\"");
    }
}
