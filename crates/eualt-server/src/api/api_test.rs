use axum::body::{to_bytes, Body};
use axum::http::Request;
use tower::ServiceExt;

use super::*;

const CATALOG: &str = r#"{
  "fr": {"products": {
    "food": {
      "drinks": {"title": "Coca-Cola, Pepsi", "euAlternatives": ["Breizh Cola", "Fritz-kola"],
                 "note": "Sodas artisanaux.", "flags": {"popular": true}},
      "coffee": {"title": "Starbucks", "euAlternatives": ["Malongo"], "note": "Torréfacteurs."}
    },
    "digital": {
      "search": {"title": "Google, Bing", "euAlternatives": ["Qwant", "Ecosia"], "note": ""}
    }
  }},
  "en": {"products": {
    "food": {
      "drinks": {"title": "Coca-Cola, Pepsi", "euAlternatives": ["Breizh Cola", "Fritz-kola"],
                 "note": "Craft sodas.", "flags": {"popular": true}},
      "coffee": {"title": "Starbucks", "euAlternatives": ["Malongo"], "note": "Roasters."}
    },
    "digital": {
      "search": {"title": "Google, Bing", "euAlternatives": ["Qwant", "Ecosia"], "note": ""}
    }
  }}
}"#;

const TRANSLATIONS: &str = r"
fr:
  categories:
    food: Alimentation
  subcategories:
    food:
      drinks: Boissons gazeuses
en:
  categories:
    food: Food & Beverages
  subcategories:
    food:
      drinks: Soft Drinks
";

fn test_app() -> Router {
    let catalog = Catalog::from_json_str(CATALOG).expect("catalog");
    let translations = Translations::from_yaml_str(TRANSLATIONS).expect("translations");
    build_app(AppState::new(catalog, translations, 16, Language::Fr))
}

async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
    (status, json)
}

#[test]
fn api_error_not_found_maps_to_404() {
    let response = ApiError::new("req-1", "not_found", "missing").into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn api_error_unknown_code_maps_to_500() {
    let response = ApiError::new("req-1", "internal_error", "boom").into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn health_reports_catalog_summary() {
    let (status, json) = get_json("/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["data"]["languages"], serde_json::json!(["fr", "en"]));
    assert_eq!(json["data"]["default_language"], "fr");
    assert_eq!(json["data"]["products"], 6);
    assert!(json["meta"]["request_id"].is_string());
}

#[tokio::test]
async fn categories_are_labelled_in_order() {
    let (status, json) = get_json("/api/v1/en/categories").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"][0]["key"], "food");
    assert_eq!(json["data"][0]["label"], "Food & Beverages");
    assert_eq!(json["data"][1]["key"], "digital");
    assert_eq!(json["data"][1]["label"], "digital");
}

#[tokio::test]
async fn unsupported_language_is_bad_request() {
    let (status, json) = get_json("/api/v1/de/categories").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "bad_request");
}

#[tokio::test]
async fn subcategories_for_known_and_all() {
    let (status, json) = get_json("/api/v1/fr/categories/food/subcategories").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"][0]["key"], "drinks");
    assert_eq!(json["data"][0]["label"], "Boissons gazeuses");
    assert_eq!(json["data"][1]["label"], "coffee");

    let (status, json) = get_json("/api/v1/fr/categories/all/subcategories").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"], serde_json::json!([]));
}

#[tokio::test]
async fn products_search_finds_breizh() {
    let (status, json) = get_json("/api/v1/en/products?q=Breizh").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["count"], 1);
    assert_eq!(json["data"]["items"][0]["subcategory_title"], "Soft Drinks");
    assert_eq!(json["data"]["filter"]["text"], "breizh");
}

#[tokio::test]
async fn stale_category_degrades_to_all() {
    let (status, json) =
        get_json("/api/v1/fr/products?category=spacecraft&subcategory=drinks").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["filter"]["category"], "all");
    assert_eq!(json["data"]["filter"]["subcategory"], "all");
    assert_eq!(json["data"]["count"], 3);
}

#[tokio::test]
async fn products_respect_scope_and_sort() {
    let (_, json) = get_json("/api/v1/en/products?category=food&sort=alphabetical").await;
    assert_eq!(json["data"]["count"], 2);
    assert_eq!(json["data"]["items"][0]["title"], "Coca-Cola, Pepsi");
    assert_eq!(json["data"]["items"][1]["title"], "Starbucks");
    assert_eq!(json["data"]["filter"]["sort"], "alphabetical");
}

#[tokio::test]
async fn single_product_lookup() {
    let (status, json) = get_json("/api/v1/fr/products/digital/search").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["eu_alternatives"][0], "Qwant");
    assert_eq!(json["data"]["subcategory_title"], "search");
}

#[tokio::test]
async fn unknown_product_is_not_found() {
    let (status, json) = get_json("/api/v1/fr/products/food/rockets").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn suggestions_match_and_blank_query_is_empty() {
    let (status, json) = get_json("/api/v1/en/suggestions?q=qwant").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"][0]["category"], "digital");

    let (_, json) = get_json("/api/v1/en/suggestions?q=%20").await;
    assert_eq!(json["data"], serde_json::json!([]));
}

#[tokio::test]
async fn routes_without_lang_use_default_language() {
    let (status, json) = get_json("/api/v1/products?q=breizh").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["language"], "fr");
    assert_eq!(json["data"]["items"][0]["subcategory_title"], "Boissons gazeuses");

    let (_, json) = get_json("/api/v1/categories").await;
    assert_eq!(json["data"][0]["label"], "Alimentation");

    let (_, json) = get_json("/api/v1/categories/food/subcategories").await;
    assert_eq!(json["data"][0]["label"], "Boissons gazeuses");

    let (status, json) = get_json("/api/v1/products/food/coffee").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["note"], "Torréfacteurs.");

    let (_, json) = get_json("/api/v1/suggestions?q=qwant").await;
    assert_eq!(json["data"][0]["subcategory"], "search");
}

#[tokio::test]
async fn malformed_query_string_gets_error_envelope() {
    let (status, json) = get_json("/api/v1/en/products?q=cola&q=kola").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "bad_request");
    assert!(json["meta"]["request_id"].is_string());

    let (status, json) = get_json("/api/v1/suggestions?q=a&q=b").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "bad_request");
}
