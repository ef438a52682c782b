//! Catalog API Endpoints
//! Mission: Public listing plus admin-only CRUD behind the authorization gate

use crate::catalog::{
    models::{Herb, HerbInput, HerbListQuery},
    store::HerbStore,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

/// Shared catalog state.
#[derive(Clone)]
pub struct CatalogState {
    pub herbs: Arc<HerbStore>,
}

/// Public listing - GET /api/herbs
pub async fn list_herbs(
    State(state): State<CatalogState>,
    Query(query): Query<HerbListQuery>,
) -> Result<Json<Vec<Herb>>, CatalogApiError> {
    let herbs = state.herbs.list(&query).map_err(internal)?;
    Ok(Json(herbs))
}

/// Public single herb - GET /api/herbs/:id
pub async fn get_herb(
    State(state): State<CatalogState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Herb>, CatalogApiError> {
    state
        .herbs
        .get(id)
        .map_err(internal)?
        .map(Json)
        .ok_or(CatalogApiError::NotFound)
}

/// Admin create - POST /api/herbs
pub async fn create_herb(
    State(state): State<CatalogState>,
    Json(input): Json<HerbInput>,
) -> Result<(StatusCode, Json<Herb>), CatalogApiError> {
    validate_herb(&input)?;
    let herb = state.herbs.create(input).map_err(internal)?;
    Ok((StatusCode::CREATED, Json(herb)))
}

/// Admin update - PUT /api/herbs/:id
pub async fn update_herb(
    State(state): State<CatalogState>,
    Path(id): Path<Uuid>,
    Json(input): Json<HerbInput>,
) -> Result<Json<Herb>, CatalogApiError> {
    validate_herb(&input)?;
    state
        .herbs
        .update(id, input)
        .map_err(internal)?
        .map(Json)
        .ok_or(CatalogApiError::NotFound)
}

/// Admin delete - DELETE /api/herbs/:id
pub async fn delete_herb(
    State(state): State<CatalogState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, CatalogApiError> {
    if state.herbs.delete(id).map_err(internal)? {
        Ok(Json(json!({ "message": "Deleted" })))
    } else {
        Err(CatalogApiError::NotFound)
    }
}

fn validate_herb(input: &HerbInput) -> Result<(), CatalogApiError> {
    if input.name.trim().is_empty() {
        return Err(CatalogApiError::Validation("name is required".to_string()));
    }
    if input.min_price < 0.0 || input.max_price < 0.0 {
        return Err(CatalogApiError::Validation(
            "prices must be non-negative".to_string(),
        ));
    }
    if input.whatsapp_number.trim().is_empty() {
        return Err(CatalogApiError::Validation(
            "whatsapp_number is required".to_string(),
        ));
    }
    Ok(())
}

fn internal<E: std::fmt::Display>(e: E) -> CatalogApiError {
    error!("Catalog internal error: {}", e);
    CatalogApiError::Internal
}

/// Catalog API errors.
#[derive(Debug)]
pub enum CatalogApiError {
    Validation(String),
    NotFound,
    Internal,
}

impl IntoResponse for CatalogApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            CatalogApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            CatalogApiError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
            CatalogApiError::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
