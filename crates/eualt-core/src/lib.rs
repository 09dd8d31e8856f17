pub mod app_config;
pub mod cache;
pub mod catalog;
pub mod config;
mod document;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod language;
pub mod products;
pub mod query;
pub mod suggest;
pub mod translations;

#[cfg(test)]
mod fixtures;

pub use app_config::{AppConfig, Environment};
pub use cache::FilterCache;
pub use catalog::{load_catalog, Catalog, CategoryTable, SubcategoryTable, TaxonomyIssue};
pub use config::{load_app_config, load_app_config_from_env};
pub use engine::{matches, FilterEngine};
pub use error::{CatalogError, ConfigError};
pub use ingest::{LoadReport, MalformedEntry};
pub use language::Language;
pub use products::{FilteredProduct, FlattenedProduct, Product, ProductFlags};
pub use query::{
    normalize, normalize_text, FilterRequest, FilterState, RawQuery, Selection, SortMode,
    ALL_SENTINEL,
};
pub use suggest::{suggest, SUGGESTION_LIMIT};
pub use translations::{load_translations, LanguageLabels, Translations};
