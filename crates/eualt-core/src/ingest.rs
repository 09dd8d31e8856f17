//! Conversion of the seed document into typed catalog tables.
//!
//! The seed carries two historical leaf shapes: `title`/`euAlternatives`/
//! `note`/flags, and the older `title`/`description`/`us`/`eu`/`note`. Both
//! are normalized here, once, so nothing downstream inspects raw fields.
//! Leaves without a usable title or alternatives are reported and dropped;
//! an optional field with a bad value is ignored on its own. Only structural
//! problems (reserved keys) fail the load.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use indexmap::IndexMap;
use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::catalog::CategoryTable;
use crate::error::CatalogError;
use crate::language::Language;
use crate::products::{Product, ProductFlags};
use crate::query::Selection;

/// Ordered string-keyed map that keeps the first value for a repeated key and
/// remembers the keys it dropped.
pub(crate) struct FirstWins<V> {
    pub(crate) entries: IndexMap<String, V>,
    pub(crate) duplicates: Vec<String>,
}

impl<V> Default for FirstWins<V> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
            duplicates: Vec::new(),
        }
    }
}

impl<'de, V> Deserialize<'de> for FirstWins<V>
where
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FirstWinsVisitor<V>(PhantomData<V>);

        impl<'de, V> Visitor<'de> for FirstWinsVisitor<V>
        where
            V: Deserialize<'de>,
        {
            type Value = FirstWins<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map with string keys")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut out = FirstWins::default();
                while let Some(key) = map.next_key::<String>()? {
                    if out.entries.contains_key(&key) {
                        map.next_value::<IgnoredAny>()?;
                        out.duplicates.push(key);
                    } else {
                        let value = map.next_value::<V>()?;
                        out.entries.insert(key, value);
                    }
                }
                Ok(out)
            }
        }

        deserializer.deserialize_map(FirstWinsVisitor(PhantomData))
    }
}

/// Top level of the seed document: language code → language section.
pub(crate) type RawDocument = FirstWins<RawLanguage>;

#[derive(Deserialize)]
pub(crate) struct RawLanguage {
    #[serde(default)]
    products: FirstWins<FirstWins<RawEntry>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Product(RawProduct),
    Other(IgnoredAny),
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProduct {
    title: Option<Lenient<String>>,
    description: Option<Lenient<String>>,
    us: Option<Lenient<String>>,
    #[serde(alias = "eu_alternatives")]
    eu_alternatives: Option<Lenient<TextOrList>>,
    eu: Option<Lenient<TextOrList>>,
    note: Option<Lenient<String>>,
    flags: Option<Lenient<RawFlags>>,
    popular: Option<Lenient<bool>>,
    new: Option<Lenient<bool>>,
    recommended: Option<Lenient<bool>>,
}

/// A field value that is kept when it has the expected type and otherwise
/// swallowed, so one bad field never costs the whole entry.
#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Valid(T),
    Invalid(IgnoredAny),
}

/// Collects the names of fields whose values were ignored.
#[derive(Default)]
struct Ignored(Vec<&'static str>);

impl Ignored {
    fn take<T>(&mut self, name: &'static str, field: Option<Lenient<T>>) -> Option<T> {
        match field? {
            Lenient::Valid(value) => Some(value),
            Lenient::Invalid(_) => {
                self.0.push(name);
                None
            }
        }
    }

    fn push_unknown_flag(&mut self) {
        if !self.0.contains(&"flags") {
            self.0.push("flags");
        }
    }
}

/// Flags as a list of badge names or as an object of booleans.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawFlags {
    Names(Vec<String>),
    Object {
        #[serde(default)]
        popular: Option<Lenient<bool>>,
        #[serde(default)]
        new: Option<Lenient<bool>>,
        #[serde(default)]
        recommended: Option<Lenient<bool>>,
    },
}

impl RawFlags {
    fn into_flags(self, ignored: &mut Ignored) -> ProductFlags {
        match self {
            RawFlags::Object {
                popular,
                new,
                recommended,
            } => ProductFlags {
                popular: ignored.take("flags.popular", popular).unwrap_or(false),
                new: ignored.take("flags.new", new).unwrap_or(false),
                recommended: ignored
                    .take("flags.recommended", recommended)
                    .unwrap_or(false),
            },
            RawFlags::Names(names) => {
                let mut flags = ProductFlags::default();
                for name in names {
                    match name.trim().to_lowercase().as_str() {
                        "popular" => flags.popular = true,
                        "new" => flags.new = true,
                        "recommended" => flags.recommended = true,
                        _ => ignored.push_unknown_flag(),
                    }
                }
                flags
            }
        }
    }
}

/// Alternatives arrive either as one comma-separated string or pre-split.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextOrList {
    Text(String),
    List(Vec<String>),
}

impl TextOrList {
    fn into_items(self) -> Vec<String> {
        let items: Vec<String> = match self {
            TextOrList::Text(text) => text.split(',').map(str::to_owned).collect(),
            TextOrList::List(list) => list,
        };
        items
            .into_iter()
            .map(|item| item.trim().to_owned())
            .filter(|item| !item.is_empty())
            .collect()
    }
}

/// A leaf that was present in the document but could not become a [`Product`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedEntry {
    pub language: Language,
    pub category: String,
    pub subcategory: String,
    pub reason: String,
}

impl fmt::Display for MalformedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}: {}",
            self.language, self.category, self.subcategory, self.reason
        )
    }
}

/// What ingestion dropped or ignored while building the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub malformed: Vec<MalformedEntry>,
    /// Repeated keys, as `lang`, `lang/category` or `lang/category/subcategory`.
    pub duplicates: Vec<String>,
    /// Top-level keys that are not a supported language code.
    pub skipped_languages: Vec<String>,
}

impl LoadReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.malformed.is_empty() && self.duplicates.is_empty() && self.skipped_languages.is_empty()
    }
}

/// Convert a parsed seed document into per-language tables.
///
/// # Errors
///
/// Returns [`CatalogError::ReservedKey`] if `"all"` is used as a category or
/// subcategory key.
pub(crate) fn ingest(
    document: RawDocument,
) -> Result<(BTreeMap<Language, CategoryTable>, LoadReport), CatalogError> {
    let mut report = LoadReport::default();
    report.duplicates.extend(document.duplicates);

    let mut tables = BTreeMap::new();
    for (code, section) in document.entries {
        let Ok(language) = code.parse::<Language>() else {
            tracing::warn!(language = %code, "skipping unsupported language section");
            report.skipped_languages.push(code);
            continue;
        };
        let table = ingest_language(language, section, &mut report)?;
        tables.insert(language, table);
    }

    for path in &report.duplicates {
        tracing::warn!(key = %path, "duplicate catalog key; keeping the first occurrence");
    }

    Ok((tables, report))
}

fn ingest_language(
    language: Language,
    section: RawLanguage,
    report: &mut LoadReport,
) -> Result<CategoryTable, CatalogError> {
    let products = section.products;
    report
        .duplicates
        .extend(products.duplicates.into_iter().map(|c| format!("{language}/{c}")));

    let mut table = CategoryTable::new();
    for (category, raw_subcategories) in products.entries {
        if Selection::is_sentinel(&category) {
            return Err(CatalogError::ReservedKey {
                language,
                level: "category",
                context: category,
            });
        }

        report.duplicates.extend(
            raw_subcategories
                .duplicates
                .into_iter()
                .map(|s| format!("{language}/{category}/{s}")),
        );

        let mut subcategories = IndexMap::new();
        for (subcategory, entry) in raw_subcategories.entries {
            if Selection::is_sentinel(&subcategory) {
                return Err(CatalogError::ReservedKey {
                    language,
                    level: "subcategory",
                    context: format!("{category}/{subcategory}"),
                });
            }

            match normalize_entry(entry) {
                Ok(Normalized { product, ignored }) => {
                    for field in ignored {
                        tracing::warn!(
                            language = %language,
                            category = %category,
                            subcategory = %subcategory,
                            field,
                            "ignoring catalog field with an unexpected value"
                        );
                    }
                    subcategories.insert(subcategory, product);
                }
                Err(reason) => {
                    tracing::warn!(
                        language = %language,
                        category = %category,
                        subcategory = %subcategory,
                        reason = %reason,
                        "excluding malformed catalog entry"
                    );
                    report.malformed.push(MalformedEntry {
                        language,
                        category: category.clone(),
                        subcategory,
                        reason,
                    });
                }
            }
        }

        table.insert(category, subcategories);
    }

    Ok(table)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}

/// A kept entry plus the names of fields whose values were ignored.
struct Normalized {
    product: Product,
    ignored: Vec<&'static str>,
}

fn normalize_entry(entry: RawEntry) -> Result<Normalized, String> {
    let RawEntry::Product(raw) = entry else {
        return Err("entry is not an object of product fields".to_string());
    };
    let mut ignored = Ignored::default();

    // In the older shape `us` lists the American products and `title` is the
    // row's display label.
    let title_field = non_empty(ignored.take("title", raw.title));
    let (title, label) = match non_empty(ignored.take("us", raw.us)) {
        Some(us) => (Some(us), title_field),
        None => (title_field, None),
    };

    let eu_alternatives = ignored
        .take("euAlternatives", raw.eu_alternatives)
        .or(ignored.take("eu", raw.eu))
        .map(TextOrList::into_items)
        .unwrap_or_default();

    let Some(title) = title else {
        return Err("missing title".to_string());
    };
    if eu_alternatives.is_empty() {
        return Err("missing European alternatives".to_string());
    }

    let explicit = ignored
        .take("flags", raw.flags)
        .map(|flags| flags.into_flags(&mut ignored))
        .unwrap_or_default();
    let flags = ProductFlags {
        popular: explicit.popular || ignored.take("popular", raw.popular).unwrap_or(false),
        new: explicit.new || ignored.take("new", raw.new).unwrap_or(false),
        recommended: explicit.recommended
            || ignored.take("recommended", raw.recommended).unwrap_or(false),
    };

    let product = Product {
        title,
        description: non_empty(ignored.take("description", raw.description)),
        eu_alternatives,
        note: non_empty(ignored.take("note", raw.note)).unwrap_or_default(),
        flags,
        label,
    };
    Ok(Normalized {
        product,
        ignored: ignored.0,
    })
}

#[cfg(test)]
#[path = "ingest_test.rs"]
mod tests;
