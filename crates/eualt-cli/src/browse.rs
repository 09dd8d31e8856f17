//! Taxonomy listings and single-entry lookup.

use eualt_core::{FilteredProduct, Selection};
use serde::Serialize;

use crate::Session;

#[derive(Debug, Serialize)]
struct TaxonomyRow<'a> {
    key: &'a str,
    label: &'a str,
}

fn print_rows(session: &Session, rows: &[TaxonomyRow<'_>]) -> anyhow::Result<()> {
    if session.json {
        return crate::print_json(&rows);
    }
    println!("{:<16}LABEL", "KEY");
    for row in rows {
        println!("{:<16}{}", row.key, row.label);
    }
    Ok(())
}

/// List top-level categories with their localized labels.
///
/// # Errors
///
/// Returns an error if the catalog has no table for the session language.
pub(crate) fn run_categories(session: &Session) -> anyhow::Result<()> {
    let language = session.language;
    let rows: Vec<TaxonomyRow<'_>> = session
        .catalog
        .categories(language)?
        .into_iter()
        .map(|key| TaxonomyRow {
            key,
            label: session.translations.category_label_or_key(language, key),
        })
        .collect();
    print_rows(session, &rows)
}

/// List the subcategories of `category`. `all` or an unknown key prints nothing.
///
/// # Errors
///
/// Returns an error if the catalog has no table for the session language.
pub(crate) fn run_subcategories(session: &Session, category: &str) -> anyhow::Result<()> {
    let language = session.language;
    let selection = Selection::parse(category);
    let subcategories = session.catalog.subcategories(language, &selection)?;

    if subcategories.is_empty() && !session.json {
        println!("no subcategories for '{category}'; run `categories` to list valid keys");
        return Ok(());
    }

    let rows: Vec<TaxonomyRow<'_>> = subcategories
        .into_iter()
        .map(|key| TaxonomyRow {
            key,
            label: session
                .translations
                .subcategory_label(language, selection.as_str(), key)
                .unwrap_or(key),
        })
        .collect();
    print_rows(session, &rows)
}

/// Print one entry in full.
///
/// # Errors
///
/// Returns an error if the category/subcategory pair does not exist.
pub(crate) fn run_show(session: &Session, category: &str, subcategory: &str) -> anyhow::Result<()> {
    let entry = session
        .catalog
        .entry(session.language, category, subcategory)?;
    let item = session.engine().to_filtered(session.language, entry);

    if session.json {
        return crate::print_json(&item);
    }
    print_detail(&item);
    Ok(())
}

fn print_detail(item: &FilteredProduct) {
    let product = &item.product;
    println!("{} ({})", item.subcategory_title, item.key());
    if let Some(description) = &product.description {
        println!("  {description}");
    }
    println!("  American:  {}", product.title);
    println!("  European:  {}", product.alternatives_joined());
    if !product.note.is_empty() {
        println!("  Note:      {}", product.note);
    }
    let badges = product.flags.badges();
    if !badges.is_empty() {
        println!("  Badges:    {}", badges.join(", "));
    }
}
