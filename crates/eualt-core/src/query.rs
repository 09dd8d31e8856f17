//! Turning raw user input (URL parameters, CLI flags, UI selections) into a
//! well-formed [`FilterRequest`].
//!
//! Normalization never fails: stale or unknown keys degrade to
//! [`Selection::All`] so an old bookmarked URL still shows a sensible list.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::language::Language;

/// Reserved key meaning "no restriction" for a category or subcategory.
pub const ALL_SENTINEL: &str = "all";

/// A category or subcategory choice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Selection {
    #[default]
    All,
    Key(String),
}

impl Selection {
    /// Parse user input. Blank input and `"all"` (any case) select everything.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || Self::is_sentinel(trimmed) {
            Selection::All
        } else {
            Selection::Key(trimmed.to_string())
        }
    }

    /// Returns `true` if `key` is the reserved `"all"` sentinel.
    #[must_use]
    pub fn is_sentinel(key: &str) -> bool {
        key.trim().eq_ignore_ascii_case(ALL_SENTINEL)
    }

    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    /// The concrete key, or `None` for `All`.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Selection::All => None,
            Selection::Key(key) => Some(key),
        }
    }

    /// The key as it appears in URLs: `"all"` for `All`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.key().unwrap_or(ALL_SENTINEL)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Selection {
    fn from(raw: &str) -> Self {
        Selection::parse(raw)
    }
}

impl Serialize for Selection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Selection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Selection::parse(&raw))
    }
}

/// Result ordering. `Catalog` keeps the canonical category-major order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    #[serde(alias = "relevance")]
    Catalog,
    Alphabetical,
    Popular,
}

impl SortMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::Catalog => "catalog",
            SortMode::Alphabetical => "alphabetical",
            SortMode::Popular => "popular",
        }
    }

    /// Parse an optional user value, falling back to `Catalog` for anything
    /// unrecognized.
    #[must_use]
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "catalog" | "relevance" => Ok(SortMode::Catalog),
            "alphabetical" | "alpha" => Ok(SortMode::Alphabetical),
            "popular" => Ok(SortMode::Popular),
            _ => Err(CatalogError::UnsupportedSortMode(s.to_string())),
        }
    }
}

/// Unvalidated query parameters as they arrive from a URL or the CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
}

/// A well-formed filter: keys exist in the catalog (or are `All`), the text
/// is normalized, and `category == All` implies `subcategory == All`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct FilterRequest {
    pub category: Selection,
    pub subcategory: Selection,
    pub text: String,
    pub sort: SortMode,
}

impl FilterRequest {
    /// Everything, unfiltered, in catalog order.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = normalize_text(text);
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }
}

/// Trim and lower-case free text. An empty result means "no text filter".
#[must_use]
pub fn normalize_text(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Validate a raw query against the catalog's taxonomy for `language`.
#[must_use]
pub fn normalize(catalog: &Catalog, language: Language, raw: &RawQuery) -> FilterRequest {
    let category = resolve_category(
        catalog,
        language,
        Selection::parse(raw.category.as_deref().unwrap_or_default()),
    );
    let subcategory = resolve_subcategory(
        catalog,
        language,
        &category,
        Selection::parse(raw.subcategory.as_deref().unwrap_or_default()),
    );

    FilterRequest {
        category,
        subcategory,
        text: normalize_text(raw.q.as_deref().unwrap_or_default()),
        sort: SortMode::parse_lenient(raw.sort.as_deref()),
    }
}

fn resolve_category(catalog: &Catalog, language: Language, selection: Selection) -> Selection {
    match selection {
        Selection::Key(key) if !catalog.contains_category(language, &key) => {
            tracing::debug!(language = %language, category = %key, "unknown category; using all");
            Selection::All
        }
        other => other,
    }
}

fn resolve_subcategory(
    catalog: &Catalog,
    language: Language,
    category: &Selection,
    selection: Selection,
) -> Selection {
    let Selection::Key(category) = category else {
        return Selection::All;
    };
    match selection {
        Selection::Key(key) if !catalog.contains_subcategory(language, category, &key) => {
            tracing::debug!(
                language = %language,
                category = %category,
                subcategory = %key,
                "unknown subcategory; using all"
            );
            Selection::All
        }
        other => other,
    }
}

/// Interactive selection state behind a search page.
///
/// Changing the category always resets the subcategory, because the old
/// subcategory belongs to the old category's taxonomy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    category: Selection,
    subcategory: Selection,
    text: String,
    sort: SortMode,
}

impl FilterState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the state from URL parameters without validating them yet.
    #[must_use]
    pub fn from_raw(raw: &RawQuery) -> Self {
        let category = Selection::parse(raw.category.as_deref().unwrap_or_default());
        let subcategory = if category.is_all() {
            Selection::All
        } else {
            Selection::parse(raw.subcategory.as_deref().unwrap_or_default())
        };
        Self {
            category,
            subcategory,
            text: raw.q.clone().unwrap_or_default(),
            sort: SortMode::parse_lenient(raw.sort.as_deref()),
        }
    }

    #[must_use]
    pub fn category(&self) -> &Selection {
        &self.category
    }

    #[must_use]
    pub fn subcategory(&self) -> &Selection {
        &self.subcategory
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn sort(&self) -> SortMode {
        self.sort
    }

    pub fn select_category(&mut self, category: Selection) {
        if category != self.category {
            self.category = category;
            self.subcategory = Selection::All;
        }
    }

    /// Ignored while the category is `All`.
    pub fn select_subcategory(&mut self, subcategory: Selection) {
        if !self.category.is_all() {
            self.subcategory = subcategory;
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.sort = sort;
    }

    /// Back to all/all with no text.
    pub fn clear(&mut self) {
        self.category = Selection::All;
        self.subcategory = Selection::All;
        self.text.clear();
    }

    /// The state as URL parameters.
    #[must_use]
    pub fn to_raw(&self) -> RawQuery {
        RawQuery {
            q: Some(self.text.clone()).filter(|t| !t.trim().is_empty()),
            category: self.category.key().map(str::to_owned),
            subcategory: self.subcategory.key().map(str::to_owned),
            sort: (self.sort != SortMode::Catalog).then(|| self.sort.as_str().to_owned()),
        }
    }

    /// Build the validated request for the current state.
    #[must_use]
    pub fn request(&self, catalog: &Catalog, language: Language) -> FilterRequest {
        normalize(catalog, language, &self.to_raw())
    }
}

#[cfg(test)]
#[path = "query_test.rs"]
mod tests;
