use serde::{Deserialize, Serialize};

/// Display badges attached to a product. Independent of each other and never
/// used for inclusion or default ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFlags {
    #[serde(default)]
    pub popular: bool,
    #[serde(default)]
    pub new: bool,
    #[serde(default)]
    pub recommended: bool,
}

impl ProductFlags {
    /// Returns `true` if no badge is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.popular || self.new || self.recommended)
    }

    /// Badge names in display order, e.g. `["popular", "new"]`.
    #[must_use]
    pub fn badges(&self) -> Vec<&'static str> {
        [
            (self.popular, "popular"),
            (self.new, "new"),
            (self.recommended, "recommended"),
        ]
        .into_iter()
        .filter_map(|(set, name)| set.then_some(name))
        .collect()
    }
}

/// One alternative-suggestion record: the American products being replaced
/// and the European alternatives offered for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// American product or brand names, e.g. `"Coca-Cola, Pepsi"`.
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// European alternatives in display order, split once at load time.
    pub eu_alternatives: Vec<String>,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub flags: ProductFlags,
    /// Per-entry display label carried by legacy seed rows (e.g. `"Soft Drinks"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Product {
    /// Alternatives joined back into their comma-separated source form.
    #[must_use]
    pub fn alternatives_joined(&self) -> String {
        self.eu_alternatives.join(", ")
    }
}

/// A product together with the catalog keys it is stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlattenedProduct<'a> {
    pub category: &'a str,
    pub subcategory: &'a str,
    pub product: &'a Product,
}

/// A search result: the product plus its resolved location and localized
/// subcategory title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilteredProduct {
    pub category: String,
    pub subcategory: String,
    pub subcategory_title: String,
    #[serde(flatten)]
    pub product: Product,
}

impl FilteredProduct {
    /// Stable display key, e.g. `"food-drinks"`.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}-{}", self.category, self.subcategory)
    }
}
