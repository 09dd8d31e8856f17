//! Type-ahead suggestions for the search box.

use crate::engine::FilterEngine;
use crate::language::Language;
use crate::products::FilteredProduct;
use crate::query::{normalize_text, FilterRequest};

/// Maximum number of suggestions returned for one query.
pub const SUGGESTION_LIMIT: usize = 5;

/// First [`SUGGESTION_LIMIT`] matches for `query` across the whole catalog,
/// in catalog order. A blank query suggests nothing.
#[must_use]
pub fn suggest(engine: &FilterEngine<'_>, language: Language, query: &str) -> Vec<FilteredProduct> {
    let text = normalize_text(query);
    if text.is_empty() {
        return Vec::new();
    }
    let request = FilterRequest {
        text,
        ..FilterRequest::all()
    };
    engine.filter_limited(language, &request, Some(SUGGESTION_LIMIT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::fixtures;
    use crate::translations::Translations;

    fn coffee_catalog() -> Catalog {
        let entries: Vec<String> = [
            "cocoa", "coconut", "coffee", "cola", "cookies", "corn", "cotton", "couscous", "tea",
        ]
        .iter()
        .map(|sub| format!(r#""{sub}": {{"title": "{sub} brand", "eu": "Euro {sub}"}}"#))
        .collect();
        let json = format!(
            r#"{{"en": {{"products": {{"pantry": {{{}}}}}}}}}"#,
            entries.join(",")
        );
        Catalog::from_json_str(&json).expect("fixture should parse")
    }

    #[test]
    fn caps_at_five_in_catalog_order() {
        let catalog = coffee_catalog();
        let translations = Translations::default();
        let engine = FilterEngine::new(&catalog, &translations);

        let results = suggest(&engine, Language::En, "co");
        let subs: Vec<&str> = results.iter().map(|r| r.subcategory.as_str()).collect();
        assert_eq!(subs, vec!["cocoa", "coconut", "coffee", "cola", "cookies"]);
    }

    #[test]
    fn blank_query_suggests_nothing() {
        let catalog = fixtures::catalog();
        let translations = fixtures::translations();
        let engine = FilterEngine::new(&catalog, &translations);

        assert!(suggest(&engine, Language::En, "   ").is_empty());
        assert!(suggest(&engine, Language::En, "").is_empty());
    }

    #[test]
    fn fewer_matches_than_limit() {
        let catalog = fixtures::catalog();
        let translations = fixtures::translations();
        let engine = FilterEngine::new(&catalog, &translations);

        let results = suggest(&engine, Language::Fr, " Breizh");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].key(), "food-drinks");
        assert_eq!(results[0].subcategory_title, "Boissons gazeuses");
    }
}
