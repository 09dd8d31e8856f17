//! Filtered search and type-ahead suggestions.

use eualt_core::{normalize, suggest, FilteredProduct, RawQuery};

use crate::{truncate, Session};

fn print_table(items: &[FilteredProduct]) {
    let header = format!("{:<26}{:<32}EUROPEAN ALTERNATIVES", "SUBCATEGORY", "AMERICAN");
    println!("{header}");
    for item in items {
        println!(
            "{:<26}{:<32}{}",
            truncate(&item.subcategory_title, 23),
            truncate(&item.product.title, 29),
            truncate(&item.product.alternatives_joined(), 60)
        );
    }
}

/// Run a filtered search. Unknown category or subcategory keys widen to `all`.
///
/// # Errors
///
/// Returns an error only if JSON output fails to serialize.
pub(crate) fn run_search(session: &Session, raw: &RawQuery) -> anyhow::Result<()> {
    let request = normalize(&session.catalog, session.language, raw);
    if raw.category.is_some() && request.category.is_all() {
        tracing::warn!(
            category = raw.category.as_deref().unwrap_or_default(),
            "unknown category; searching all categories"
        );
    }

    let items = session.engine().filter(session.language, &request);

    if session.json {
        return crate::print_json(&items);
    }
    if items.is_empty() {
        println!("no results; try other terms or drop the category filter");
        return Ok(());
    }
    print_table(&items);
    println!();
    println!("{} result(s)", items.len());
    Ok(())
}

/// Print at most five suggestions for `query`.
///
/// # Errors
///
/// Returns an error only if JSON output fails to serialize.
pub(crate) fn run_suggest(session: &Session, query: &str) -> anyhow::Result<()> {
    let items = suggest(&session.engine(), session.language, query);

    if session.json {
        return crate::print_json(&items);
    }
    for item in &items {
        println!(
            "{:<24}{} -> {}",
            item.key(),
            item.product.title,
            item.product.alternatives_joined()
        );
    }
    Ok(())
}
