//! Filtering and text search over the catalog.
//!
//! One pass: resolve the scope, apply the text predicate, order the result.
//! Nothing in a pass is fatal. A scope pair that does not resolve is skipped
//! and the pass returns what it built.

use crate::catalog::Catalog;
use crate::language::Language;
use crate::products::{FilteredProduct, FlattenedProduct, Product};
use crate::query::{normalize_text, FilterRequest, Selection, SortMode};
use crate::translations::Translations;

/// Case-insensitive substring match over title, joined alternatives and note.
///
/// `needle` must already be normalized (see [`normalize_text`]); an empty
/// needle matches everything.
#[must_use]
pub fn matches(product: &Product, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    product.title.to_lowercase().contains(needle)
        || product.alternatives_joined().to_lowercase().contains(needle)
        || product.note.to_lowercase().contains(needle)
}

#[derive(Debug, Clone, Copy)]
pub struct FilterEngine<'a> {
    catalog: &'a Catalog,
    translations: &'a Translations,
}

impl<'a> FilterEngine<'a> {
    #[must_use]
    pub fn new(catalog: &'a Catalog, translations: &'a Translations) -> Self {
        Self {
            catalog,
            translations,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    #[must_use]
    pub fn translations(&self) -> &'a Translations {
        self.translations
    }

    /// All matching products for `request`, ordered by `request.sort`.
    #[must_use]
    pub fn filter(&self, language: Language, request: &FilterRequest) -> Vec<FilteredProduct> {
        self.filter_limited(language, request, None)
    }

    /// Like [`FilterEngine::filter`], stopping after `limit` matches.
    ///
    /// The limit applies in catalog order, before any explicit sort.
    #[must_use]
    pub fn filter_limited(
        &self,
        language: Language,
        request: &FilterRequest,
        limit: Option<usize>,
    ) -> Vec<FilteredProduct> {
        let needle = normalize_text(&request.text);
        let limit = limit.unwrap_or(usize::MAX);

        let mut results: Vec<FilteredProduct> = self
            .scope(language, &request.category, &request.subcategory)
            .into_iter()
            .filter(|entry| matches(entry.product, &needle))
            .take(limit)
            .map(|entry| self.to_filtered(language, entry))
            .collect();

        sort_results(&mut results, request.sort);
        results
    }

    /// Localized subcategory title: translation, then the entry's own
    /// label, then the key.
    #[must_use]
    pub fn subcategory_title(&self, language: Language, entry: &FlattenedProduct<'_>) -> String {
        self.translations
            .subcategory_label(language, entry.category, entry.subcategory)
            .or(entry.product.label.as_deref())
            .unwrap_or(entry.subcategory)
            .to_string()
    }

    /// Owned result record for one catalog entry.
    #[must_use]
    pub fn to_filtered(&self, language: Language, entry: FlattenedProduct<'_>) -> FilteredProduct {
        FilteredProduct {
            category: entry.category.to_string(),
            subcategory: entry.subcategory.to_string(),
            subcategory_title: self.subcategory_title(language, &entry),
            product: entry.product.clone(),
        }
    }

    fn scope(
        &self,
        language: Language,
        category: &Selection,
        subcategory: &Selection,
    ) -> Vec<FlattenedProduct<'a>> {
        let catalog = self.catalog;
        match (category, subcategory) {
            (Selection::All, _) => catalog.flattened(language).unwrap_or_else(|err| {
                tracing::warn!(language = %language, error = %err, "no catalog table for language");
                Vec::new()
            }),
            (Selection::Key(category), Selection::All) => catalog
                .flattened_category(language, category)
                .unwrap_or_else(|err| {
                    tracing::debug!(error = %err, "skipping unresolved category scope");
                    Vec::new()
                }),
            (Selection::Key(category), Selection::Key(subcategory)) => {
                match catalog.entry(language, category, subcategory) {
                    Ok(entry) => vec![entry],
                    Err(err) => {
                        tracing::debug!(error = %err, "skipping unresolved product scope");
                        Vec::new()
                    }
                }
            }
        }
    }
}

fn sort_results(results: &mut [FilteredProduct], sort: SortMode) {
    match sort {
        SortMode::Catalog => {}
        SortMode::Alphabetical => {
            results.sort_by_cached_key(|item| item.product.title.to_lowercase());
        }
        SortMode::Popular => {
            results.sort_by_key(|item| !item.product.flags.popular);
        }
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
