use super::*;
use crate::fixtures;

fn raw(q: &str, category: &str, subcategory: &str) -> RawQuery {
    RawQuery {
        q: Some(q.to_string()),
        category: Some(category.to_string()),
        subcategory: Some(subcategory.to_string()),
        sort: None,
    }
}

fn key(value: &str) -> Selection {
    Selection::Key(value.to_string())
}

#[test]
fn normalize_text_trims_and_lowercases() {
    assert_eq!(normalize_text("  BREIZH "), "breizh");
    assert_eq!(normalize_text("Écoute"), "écoute");
    assert_eq!(normalize_text("   "), "");
}

#[test]
fn selection_parse_handles_sentinel_and_blank() {
    assert_eq!(Selection::parse("all"), Selection::All);
    assert_eq!(Selection::parse(" ALL "), Selection::All);
    assert_eq!(Selection::parse(""), Selection::All);
    assert_eq!(Selection::parse(" food "), key("food"));
    assert_eq!(Selection::All.to_string(), "all");
    assert_eq!(key("food").as_str(), "food");
}

#[test]
fn selection_serializes_as_plain_string() {
    let json = serde_json::to_string(&Selection::All).unwrap();
    assert_eq!(json, r#""all""#);
    let parsed: Selection = serde_json::from_str(r#""tech""#).unwrap();
    assert_eq!(parsed, key("tech"));
}

#[test]
fn sort_mode_parsing() {
    assert_eq!("relevance".parse::<SortMode>().unwrap(), SortMode::Catalog);
    assert_eq!("Alphabetical".parse::<SortMode>().unwrap(), SortMode::Alphabetical);
    assert_eq!("popular".parse::<SortMode>().unwrap(), SortMode::Popular);
    assert!(matches!(
        "price".parse::<SortMode>(),
        Err(CatalogError::UnsupportedSortMode(_))
    ));
    assert_eq!(SortMode::parse_lenient(Some("price")), SortMode::Catalog);
    assert_eq!(SortMode::parse_lenient(None), SortMode::Catalog);
}

#[test]
fn sort_mode_serde_accepts_relevance_alias() {
    let mode: SortMode = serde_json::from_str(r#""relevance""#).unwrap();
    assert_eq!(mode, SortMode::Catalog);
    assert_eq!(serde_json::to_string(&SortMode::Popular).unwrap(), r#""popular""#);
}

#[test]
fn normalize_keeps_valid_keys() {
    let catalog = fixtures::catalog();
    let request = normalize(&catalog, Language::En, &raw(" Breizh ", "food", "drinks"));
    assert_eq!(request.category, key("food"));
    assert_eq!(request.subcategory, key("drinks"));
    assert_eq!(request.text, "breizh");
    assert_eq!(request.sort, SortMode::Catalog);
}

#[test]
fn unknown_category_degrades_to_all() {
    let catalog = fixtures::catalog();
    let request = normalize(&catalog, Language::En, &raw("", "spacecraft", "drinks"));
    assert_eq!(request.category, Selection::All);
    assert_eq!(request.subcategory, Selection::All);
}

#[test]
fn subcategory_from_other_category_degrades_to_all() {
    let catalog = fixtures::catalog();
    let request = normalize(&catalog, Language::En, &raw("", "tech", "drinks"));
    assert_eq!(request.category, key("tech"));
    assert_eq!(request.subcategory, Selection::All);
}

#[test]
fn category_all_forces_subcategory_all() {
    let catalog = fixtures::catalog();
    let request = normalize(&catalog, Language::En, &raw("", "all", "drinks"));
    assert_eq!(request.category, Selection::All);
    assert_eq!(request.subcategory, Selection::All);
}

#[test]
fn missing_language_degrades_to_all() {
    let catalog = Catalog::default();
    let request = normalize(&catalog, Language::En, &raw("cola", "food", "drinks"));
    assert_eq!(request, FilterRequest::all().with_text("cola"));
}

#[test]
fn raw_query_deserializes_from_url_params() {
    let query: RawQuery =
        serde_json::from_value(serde_json::json!({"q": "cola", "category": "food"})).unwrap();
    assert_eq!(query.q.as_deref(), Some("cola"));
    assert_eq!(query.subcategory, None);
}

#[test]
fn changing_category_resets_subcategory() {
    let mut state = FilterState::new();
    state.select_category(key("food"));
    state.select_subcategory(key("drinks"));
    assert_eq!(state.subcategory(), &key("drinks"));

    state.select_category(key("food"));
    assert_eq!(state.subcategory(), &key("drinks"), "same category keeps subcategory");

    state.select_category(key("tech"));
    assert_eq!(state.subcategory(), &Selection::All);
}

#[test]
fn subcategory_is_ignored_while_category_is_all() {
    let mut state = FilterState::new();
    state.select_subcategory(key("drinks"));
    assert_eq!(state.subcategory(), &Selection::All);
}

#[test]
fn clear_resets_selection_and_text() {
    let mut state = FilterState::new();
    state.select_category(key("food"));
    state.select_subcategory(key("coffee"));
    state.set_text("Malongo");
    state.set_sort(SortMode::Popular);
    state.clear();

    assert_eq!(state.category(), &Selection::All);
    assert_eq!(state.subcategory(), &Selection::All);
    assert_eq!(state.text(), "");
    assert_eq!(state.sort(), SortMode::Popular);
}

#[test]
fn state_request_is_normalized() {
    let catalog = fixtures::catalog();
    let mut state = FilterState::from_raw(&raw("  COLA ", "food", "drinks"));
    assert_eq!(state.text(), "  COLA ");

    let request = state.request(&catalog, Language::Fr);
    assert_eq!(request.category, key("food"));
    assert_eq!(request.subcategory, key("drinks"));
    assert_eq!(request.text, "cola");

    state.select_category(key("garden"));
    let request = state.request(&catalog, Language::Fr);
    assert_eq!(request.category, Selection::All);
}

#[test]
fn to_raw_omits_defaults() {
    let state = FilterState::new();
    assert_eq!(state.to_raw(), RawQuery::default());
}
