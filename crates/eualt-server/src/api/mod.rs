mod catalog;
mod search;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use eualt_core::{Catalog, CatalogError, FilterCache, FilterEngine, Language, Translations};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId};

/// Shared, read-only service state. The cache is the only interior mutability.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub translations: Arc<Translations>,
    pub cache: Arc<FilterCache>,
    pub default_language: Language,
}

impl AppState {
    #[must_use]
    pub fn new(
        catalog: Catalog,
        translations: Translations,
        cache_capacity: usize,
        default_language: Language,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            translations: Arc::new(translations),
            cache: Arc::new(FilterCache::new(cache_capacity)),
            default_language,
        }
    }

    pub(super) fn engine(&self) -> FilterEngine<'_> {
        FilterEngine::new(&self.catalog, &self.translations)
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    languages: Vec<Language>,
    default_language: Language,
    products: usize,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Path of the routes whose only parameter is `{lang}`.
#[derive(Debug, Deserialize)]
pub(super) struct LangPath {
    lang: String,
}

/// Parse the `{lang}` path segment.
pub(super) fn parse_language(request_id: &str, raw: &str) -> Result<Language, ApiError> {
    raw.parse::<Language>()
        .map_err(|e| ApiError::new(request_id, "bad_request", e.to_string()))
}

/// Routes without a `{lang}` segment serve the configured default language.
pub(super) fn resolve_language(
    state: &AppState,
    request_id: &str,
    raw: Option<&str>,
) -> Result<Language, ApiError> {
    raw.map_or(Ok(state.default_language), |raw| parse_language(request_id, raw))
}

pub(super) fn map_catalog_error(request_id: String, error: &CatalogError) -> ApiError {
    if error.is_not_found() {
        return ApiError::new(request_id, "not_found", error.to_string());
    }
    match error {
        CatalogError::UnsupportedLanguage(_) | CatalogError::UnsupportedSortMode(_) => {
            ApiError::new(request_id, "bad_request", error.to_string())
        }
        _ => {
            tracing::error!(error = %error, "catalog lookup failed");
            ApiError::new(request_id, "internal_error", "catalog lookup failed")
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/categories", get(catalog::list_default_categories))
        .route(
            "/api/v1/categories/{category}/subcategories",
            get(catalog::list_subcategories),
        )
        .route("/api/v1/products", get(search::list_default_products))
        .route(
            "/api/v1/products/{category}/{subcategory}",
            get(catalog::get_product),
        )
        .route("/api/v1/suggestions", get(search::list_default_suggestions))
        .route("/api/v1/{lang}/categories", get(catalog::list_categories))
        .route(
            "/api/v1/{lang}/categories/{category}/subcategories",
            get(catalog::list_subcategories),
        )
        .route("/api/v1/{lang}/products", get(search::list_products))
        .route(
            "/api/v1/{lang}/products/{category}/{subcategory}",
            get(catalog::get_product),
        )
        .route("/api/v1/{lang}/suggestions", get(search::list_suggestions))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let languages = state.catalog.languages();
    let products = languages.iter().map(|l| state.catalog.len(*l)).sum();
    Json(ApiResponse {
        data: HealthData {
            status: "ok",
            languages,
            default_language: state.default_language,
            products,
        },
        meta: ResponseMeta::new(req_id.0),
    })
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
