use axum::{
    extract::{Path, State},
    Extension, Json,
};
use eualt_core::{FilteredProduct, Selection};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{
    map_catalog_error, resolve_language, ApiError, ApiResponse, AppState, LangPath,
    ResponseMeta,
};

/// A taxonomy key with its localized label (the key itself when untranslated).
#[derive(Debug, Serialize)]
pub(super) struct TaxonomyItem {
    key: String,
    label: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct SubcategoriesPath {
    lang: Option<String>,
    category: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct ProductPath {
    lang: Option<String>,
    category: String,
    subcategory: String,
}

pub(super) async fn list_categories(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(path): Path<LangPath>,
) -> Result<Json<ApiResponse<Vec<TaxonomyItem>>>, ApiError> {
    categories(&state, req_id, Some(&path.lang))
}

pub(super) async fn list_default_categories(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<TaxonomyItem>>>, ApiError> {
    categories(&state, req_id, None)
}

fn categories(
    state: &AppState,
    req_id: RequestId,
    lang: Option<&str>,
) -> Result<Json<ApiResponse<Vec<TaxonomyItem>>>, ApiError> {
    let language = resolve_language(state, &req_id.0, lang)?;
    let categories = state
        .catalog
        .categories(language)
        .map_err(|e| map_catalog_error(req_id.0.clone(), &e))?;

    let data = categories
        .into_iter()
        .map(|key| TaxonomyItem {
            key: key.to_string(),
            label: state.translations.category_label_or_key(language, key).to_string(),
        })
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn list_subcategories(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(path): Path<SubcategoriesPath>,
) -> Result<Json<ApiResponse<Vec<TaxonomyItem>>>, ApiError> {
    let language = resolve_language(&state, &req_id.0, path.lang.as_deref())?;
    let selection = Selection::parse(&path.category);
    let subcategories = state
        .catalog
        .subcategories(language, &selection)
        .map_err(|e| map_catalog_error(req_id.0.clone(), &e))?;

    let data = subcategories
        .into_iter()
        .map(|key| TaxonomyItem {
            key: key.to_string(),
            label: state
                .translations
                .subcategory_label(language, selection.as_str(), key)
                .unwrap_or(key)
                .to_string(),
        })
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(path): Path<ProductPath>,
) -> Result<Json<ApiResponse<FilteredProduct>>, ApiError> {
    let language = resolve_language(&state, &req_id.0, path.lang.as_deref())?;
    let entry = state
        .catalog
        .entry(language, &path.category, &path.subcategory)
        .map_err(|e| map_catalog_error(req_id.0.clone(), &e))?;

    let data = state.engine().to_filtered(language, entry);

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
