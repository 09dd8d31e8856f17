use thiserror::Error;

use crate::language::Language;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("no catalog table for language {0}")]
    LanguageNotFound(Language),

    #[error("category not found: {language}/{category}")]
    CategoryNotFound { language: Language, category: String },

    #[error("product not found: {language}/{category}/{subcategory}")]
    ProductNotFound {
        language: Language,
        category: String,
        subcategory: String,
    },

    #[error("reserved key \"all\" used as a {level} key in {language} ({context})")]
    ReservedKey {
        language: Language,
        level: &'static str,
        context: String,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON document {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse YAML document {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unsupported sort mode: {0}; expected catalog, alphabetical or popular")]
    UnsupportedSortMode(String),

    #[error("unsupported document format for {path}; expected .json, .yaml or .yml")]
    UnsupportedFormat { path: String },
}

impl CatalogError {
    /// Returns `true` for lookup misses (language, category or product).
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CatalogError::LanguageNotFound(_)
                | CatalogError::CategoryNotFound { .. }
                | CatalogError::ProductNotFound { .. }
        )
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
