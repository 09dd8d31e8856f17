use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Extension, Json,
};
use eualt_core::{normalize, suggest, FilterRequest, FilteredProduct, Language, RawQuery};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{resolve_language, ApiError, ApiResponse, AppState, LangPath, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct ProductList {
    language: Language,
    /// The request after normalization; stale parameters show up here as `all`.
    filter: FilterRequest,
    count: usize,
    items: Arc<[FilteredProduct]>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SuggestionQuery {
    #[serde(default)]
    pub q: String,
}

/// Turn a query-string rejection into the JSON error envelope.
fn query_or_bad_request<T>(
    req_id: &RequestId,
    query: Result<Query<T>, QueryRejection>,
) -> Result<T, ApiError> {
    query
        .map(|Query(value)| value)
        .map_err(|rejection| ApiError::new(req_id.0.as_str(), "bad_request", rejection.body_text()))
}

pub(super) async fn list_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(path): Path<LangPath>,
    query: Result<Query<RawQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<ProductList>>, ApiError> {
    products(&state, req_id, Some(&path.lang), query)
}

pub(super) async fn list_default_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<RawQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<ProductList>>, ApiError> {
    products(&state, req_id, None, query)
}

fn products(
    state: &AppState,
    req_id: RequestId,
    lang: Option<&str>,
    query: Result<Query<RawQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<ProductList>>, ApiError> {
    let language = resolve_language(state, &req_id.0, lang)?;
    let query = query_or_bad_request(&req_id, query)?;
    let filter = normalize(&state.catalog, language, &query);
    let items = state.cache.get_or_filter(&state.engine(), language, &filter);

    tracing::debug!(
        language = %language,
        category = %filter.category,
        subcategory = %filter.subcategory,
        results = items.len(),
        "filtered products"
    );

    Ok(Json(ApiResponse {
        data: ProductList {
            language,
            count: items.len(),
            filter,
            items,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn list_suggestions(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(path): Path<LangPath>,
    query: Result<Query<SuggestionQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<FilteredProduct>>>, ApiError> {
    suggestions(&state, req_id, Some(&path.lang), query)
}

pub(super) async fn list_default_suggestions(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<SuggestionQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<FilteredProduct>>>, ApiError> {
    suggestions(&state, req_id, None, query)
}

fn suggestions(
    state: &AppState,
    req_id: RequestId,
    lang: Option<&str>,
    query: Result<Query<SuggestionQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<FilteredProduct>>>, ApiError> {
    let language = resolve_language(state, &req_id.0, lang)?;
    let query = query_or_bad_request(&req_id, query)?;
    let data = suggest(&state.engine(), language, &query.q);

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
