//! The catalog store: an immutable, language-keyed nested mapping
//! `language → category → subcategory → product`.
//!
//! Iteration order is insertion order at every level. Walking categories
//! then subcategories in that order is the canonical order every listing
//! preserves unless an explicit sort is requested.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use indexmap::{IndexMap, IndexSet};

use crate::document::{self, DocumentFormat};
use crate::error::CatalogError;
use crate::ingest::{ingest, LoadReport, RawDocument};
use crate::language::Language;
use crate::products::{FlattenedProduct, Product};
use crate::query::Selection;

pub type SubcategoryTable = IndexMap<String, Product>;
pub type CategoryTable = IndexMap<String, SubcategoryTable>;

/// A (category, subcategory) key present in some language but missing in another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyIssue {
    /// The language whose table lacks the key.
    pub missing_in: Language,
    pub category: String,
    /// `None` when the whole category is missing.
    pub subcategory: Option<String>,
}

impl fmt::Display for TaxonomyIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subcategory {
            Some(sub) => write!(
                f,
                "{}/{} is missing from the {} table",
                self.category, sub, self.missing_in
            ),
            None => write!(
                f,
                "category {} is missing from the {} table",
                self.category, self.missing_in
            ),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tables: BTreeMap<Language, CategoryTable>,
    report: LoadReport,
}

impl Catalog {
    /// Build a catalog from already-typed tables.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ReservedKey`] if any category or subcategory is
    /// named `"all"`.
    pub fn from_tables<I>(tables: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (Language, CategoryTable)>,
    {
        let tables: BTreeMap<Language, CategoryTable> = tables.into_iter().collect();
        for (language, table) in &tables {
            for (category, subcategories) in table {
                if Selection::is_sentinel(category) {
                    return Err(CatalogError::ReservedKey {
                        language: *language,
                        level: "category",
                        context: category.clone(),
                    });
                }
                if let Some(sub) = subcategories.keys().find(|s| Selection::is_sentinel(s)) {
                    return Err(CatalogError::ReservedKey {
                        language: *language,
                        level: "subcategory",
                        context: format!("{category}/{sub}"),
                    });
                }
            }
        }
        Ok(Self {
            tables,
            report: LoadReport::default(),
        })
    }

    /// Parse a catalog from a JSON seed document.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Json`] for unparseable input and
    /// [`CatalogError::ReservedKey`] for a category or subcategory named `"all"`.
    pub fn from_json_str(content: &str) -> Result<Self, CatalogError> {
        Self::from_document(document::parse_document(
            content,
            DocumentFormat::Json,
            "<inline>",
        )?)
    }

    /// Parse a catalog from a YAML seed document.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Yaml`] for unparseable input and
    /// [`CatalogError::ReservedKey`] for a category or subcategory named `"all"`.
    pub fn from_yaml_str(content: &str) -> Result<Self, CatalogError> {
        Self::from_document(document::parse_document(
            content,
            DocumentFormat::Yaml,
            "<inline>",
        )?)
    }

    fn from_document(raw: RawDocument) -> Result<Self, CatalogError> {
        let (tables, report) = ingest(raw)?;
        Ok(Self { tables, report })
    }

    /// Entries dropped or ignored while the catalog was loaded.
    #[must_use]
    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Languages that have a table, in [`Language`] order.
    #[must_use]
    pub fn languages(&self) -> Vec<Language> {
        self.tables.keys().copied().collect()
    }

    /// Number of products in a language table; `0` for a missing language.
    #[must_use]
    pub fn len(&self, language: Language) -> usize {
        self.tables
            .get(&language)
            .map_or(0, |table| table.values().map(IndexMap::len).sum())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.values().all(|table| table.values().all(IndexMap::is_empty))
    }

    fn table(&self, language: Language) -> Result<&CategoryTable, CatalogError> {
        self.tables
            .get(&language)
            .ok_or(CatalogError::LanguageNotFound(language))
    }

    /// Top-level category keys in natural order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::LanguageNotFound`] if the language has no table.
    pub fn categories(&self, language: Language) -> Result<Vec<&str>, CatalogError> {
        Ok(self.table(language)?.keys().map(String::as_str).collect())
    }

    /// Subcategory keys under `category` in natural order.
    ///
    /// `Selection::All`, an unknown category and a category without entries
    /// all yield an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::LanguageNotFound`] if the language has no table.
    pub fn subcategories(
        &self,
        language: Language,
        category: &Selection,
    ) -> Result<Vec<&str>, CatalogError> {
        let table = self.table(language)?;
        let Selection::Key(category) = category else {
            return Ok(Vec::new());
        };
        Ok(table
            .get(category.as_str())
            .map(|subs| subs.keys().map(String::as_str).collect())
            .unwrap_or_default())
    }

    #[must_use]
    pub fn contains_category(&self, language: Language, category: &str) -> bool {
        self.tables
            .get(&language)
            .is_some_and(|table| table.contains_key(category))
    }

    #[must_use]
    pub fn contains_subcategory(&self, language: Language, category: &str, subcategory: &str) -> bool {
        self.tables
            .get(&language)
            .and_then(|table| table.get(category))
            .is_some_and(|subs| subs.contains_key(subcategory))
    }

    /// Resolve one entry with the keys it is stored under.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::LanguageNotFound`] or
    /// [`CatalogError::ProductNotFound`] when the triple does not resolve.
    pub fn entry(
        &self,
        language: Language,
        category: &str,
        subcategory: &str,
    ) -> Result<FlattenedProduct<'_>, CatalogError> {
        let not_found = || CatalogError::ProductNotFound {
            language,
            category: category.to_string(),
            subcategory: subcategory.to_string(),
        };
        let (category_key, subs) = self
            .table(language)?
            .get_key_value(category)
            .ok_or_else(not_found)?;
        let (subcategory_key, product) = subs.get_key_value(subcategory).ok_or_else(not_found)?;
        Ok(FlattenedProduct {
            category: category_key,
            subcategory: subcategory_key,
            product,
        })
    }

    /// Direct product lookup.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::LanguageNotFound`] or
    /// [`CatalogError::ProductNotFound`] when the triple does not resolve.
    pub fn product(
        &self,
        language: Language,
        category: &str,
        subcategory: &str,
    ) -> Result<&Product, CatalogError> {
        self.entry(language, category, subcategory)
            .map(|entry| entry.product)
    }

    /// Every product of a language in canonical order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::LanguageNotFound`] if the language has no table.
    pub fn flattened(&self, language: Language) -> Result<Vec<FlattenedProduct<'_>>, CatalogError> {
        let table = self.table(language)?;
        Ok(table
            .iter()
            .flat_map(|(category, subs)| flatten_category(category, subs))
            .collect())
    }

    /// Every product under one category, in canonical order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::LanguageNotFound`] or
    /// [`CatalogError::CategoryNotFound`].
    pub fn flattened_category(
        &self,
        language: Language,
        category: &str,
    ) -> Result<Vec<FlattenedProduct<'_>>, CatalogError> {
        let (category_key, subs) = self.table(language)?.get_key_value(category).ok_or_else(|| {
            CatalogError::CategoryNotFound {
                language,
                category: category.to_string(),
            }
        })?;
        Ok(flatten_category(category_key, subs).collect())
    }

    /// Compare key sets across languages.
    ///
    /// Keys are collected in order of first appearance over all languages;
    /// each language lacking a key yields one issue. A whole missing category
    /// is reported once rather than per subcategory.
    #[must_use]
    pub fn check_taxonomy(&self) -> Vec<TaxonomyIssue> {
        let mut union: IndexMap<&str, IndexSet<&str>> = IndexMap::new();
        for table in self.tables.values() {
            for (category, subs) in table {
                let entry = union.entry(category.as_str()).or_default();
                for sub in subs.keys() {
                    entry.insert(sub.as_str());
                }
            }
        }

        let mut issues = Vec::new();
        for (language, table) in &self.tables {
            for (category, subs) in &union {
                let Some(present) = table.get(*category) else {
                    issues.push(TaxonomyIssue {
                        missing_in: *language,
                        category: (*category).to_string(),
                        subcategory: None,
                    });
                    continue;
                };
                for sub in subs {
                    if !present.contains_key(*sub) {
                        issues.push(TaxonomyIssue {
                            missing_in: *language,
                            category: (*category).to_string(),
                            subcategory: Some((*sub).to_string()),
                        });
                    }
                }
            }
        }
        issues
    }
}

fn flatten_category<'a>(
    category: &'a str,
    subs: &'a SubcategoryTable,
) -> impl Iterator<Item = FlattenedProduct<'a>> + 'a {
    subs.iter().map(move |(subcategory, product)| FlattenedProduct {
        category,
        subcategory,
        product,
    })
}

/// Load the catalog seed document (`.json`, `.yaml` or `.yml`).
///
/// Malformed entries and duplicate keys are logged and dropped; taxonomy
/// mismatches between languages are logged as warnings.
///
/// # Errors
///
/// Returns `CatalogError` if the file cannot be read or parsed, or uses the
/// reserved `"all"` key.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let raw: RawDocument = document::read_document(path)?;
    let catalog = Catalog::from_document(raw)?;

    for issue in catalog.check_taxonomy() {
        tracing::warn!(issue = %issue, "catalog taxonomy differs between languages");
    }
    tracing::info!(
        path = %path.display(),
        languages = ?catalog.languages(),
        malformed = catalog.report().malformed.len(),
        "catalog loaded"
    );

    Ok(catalog)
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
