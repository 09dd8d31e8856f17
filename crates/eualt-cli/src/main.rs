mod browse;
mod check;
mod search;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eualt_core::{Catalog, FilterEngine, Language, SortMode, Translations};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "eualt")]
#[command(about = "Browse and search European alternatives to American products")]
struct Cli {
    /// Display language (`fr` or `en`); defaults to `EUALT_DEFAULT_LANGUAGE`.
    #[arg(long, global = true, value_parser = parse_language)]
    lang: Option<Language>,

    /// Print JSON instead of a table.
    #[arg(long, global = true)]
    json: bool,

    /// Catalog seed document; defaults to `EUALT_CATALOG_PATH`.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Translation labels; defaults to `EUALT_TRANSLATIONS_PATH`.
    #[arg(long, global = true)]
    translations: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List top-level categories.
    Categories,
    /// List the subcategories of one category.
    Subcategories { category: String },
    /// Filter the catalog by category, subcategory and free text.
    Search {
        query: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        subcategory: Option<String>,
        #[arg(long, value_parser = parse_sort, default_value = "catalog")]
        sort: SortMode,
    },
    /// Type-ahead suggestions for a query.
    Suggest { query: String },
    /// Show one catalog entry.
    Show {
        category: String,
        subcategory: String,
    },
    /// Validate the seed documents and report taxonomy gaps.
    Check,
}

fn parse_language(raw: &str) -> Result<Language, String> {
    raw.parse().map_err(|e: eualt_core::CatalogError| e.to_string())
}

fn parse_sort(raw: &str) -> Result<SortMode, String> {
    raw.parse().map_err(|e: eualt_core::CatalogError| e.to_string())
}

/// Loaded documents plus the global output options.
pub(crate) struct Session {
    pub catalog: Catalog,
    pub translations: Translations,
    pub language: Language,
    pub json: bool,
}

impl Session {
    pub(crate) fn engine(&self) -> FilterEngine<'_> {
        FilterEngine::new(&self.catalog, &self.translations)
    }
}

/// Truncate to `max` characters, marking the cut with `...`.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}

pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// `RUST_LOG` wins; otherwise the configured level applies.
fn log_filter(level: &str) -> anyhow::Result<EnvFilter> {
    Ok(EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("eualt: run `eualt --help` for available commands");
        return Ok(());
    };

    dotenvy::dotenv().ok();
    let config = eualt_core::load_app_config()?;
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&config.log_level)?)
        .with_writer(std::io::stderr)
        .init();

    let catalog_path = cli.catalog.unwrap_or(config.catalog_path);
    let translations_path = cli.translations.unwrap_or(config.translations_path);

    let session = Session {
        catalog: eualt_core::load_catalog(&catalog_path)?,
        translations: eualt_core::load_translations(&translations_path)?,
        language: cli.lang.unwrap_or(config.default_language),
        json: cli.json,
    };

    match command {
        Commands::Categories => browse::run_categories(&session),
        Commands::Subcategories { category } => browse::run_subcategories(&session, &category),
        Commands::Show {
            category,
            subcategory,
        } => browse::run_show(&session, &category, &subcategory),
        Commands::Search {
            query,
            category,
            subcategory,
            sort,
        } => search::run_search(
            &session,
            &eualt_core::RawQuery {
                q: query,
                category,
                subcategory,
                sort: Some(sort.as_str().to_string()),
            },
        ),
        Commands::Suggest { query } => search::run_suggest(&session, &query),
        Commands::Check => check::run_check(&session),
    }
}
