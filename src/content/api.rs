//! Content API Endpoints
//! Mission: Public page/carousel reads plus admin-only editing

use crate::content::{
    models::{CarouselInput, CarouselItem, CarouselUpdate, PageContent, PageContentUpdate, PageType},
    store::ContentStore,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

/// Shared content state.
#[derive(Clone)]
pub struct ContentState {
    pub content: Arc<ContentStore>,
}

/// Public page content - GET /api/page-content/:page_type
///
/// Returns built-in defaults when nothing has been stored yet.
pub async fn get_page_content(
    State(state): State<ContentState>,
    Path(page_type): Path<String>,
) -> Result<Json<PageContent>, ContentApiError> {
    let page_type = parse_page_type(&page_type)?;

    let content = state
        .content
        .get_page(page_type)
        .map_err(internal)?
        .unwrap_or_else(|| PageContent::default_for(page_type));

    Ok(Json(content))
}

/// Admin page content update - PUT /api/page-content/:page_type
///
/// Merges the provided fields into the stored content (or the defaults when
/// no record exists yet) and persists the result.
pub async fn update_page_content(
    State(state): State<ContentState>,
    Path(page_type): Path<String>,
    Json(update): Json<PageContentUpdate>,
) -> Result<Json<PageContent>, ContentApiError> {
    let page_type = parse_page_type(&page_type)?;

    let mut content = state
        .content
        .get_page(page_type)
        .map_err(internal)?
        .unwrap_or_else(|| PageContent::default_for(page_type));
    content.apply(update);

    let stored = state.content.save_page(&content).map_err(internal)?;
    Ok(Json(stored))
}

/// Public carousel - GET /api/carousel
pub async fn get_carousel(
    State(state): State<ContentState>,
) -> Result<Json<Vec<CarouselItem>>, ContentApiError> {
    let items = state.content.active_carousel_items().map_err(internal)?;
    Ok(Json(items))
}

/// Admin carousel listing (includes inactive) - GET /api/carousel/all
pub async fn get_all_carousel(
    State(state): State<ContentState>,
) -> Result<Json<Vec<CarouselItem>>, ContentApiError> {
    let items = state.content.all_carousel_items().map_err(internal)?;
    Ok(Json(items))
}

/// Admin carousel create - POST /api/carousel
pub async fn create_carousel_item(
    State(state): State<ContentState>,
    Json(input): Json<CarouselInput>,
) -> Result<(StatusCode, Json<CarouselItem>), ContentApiError> {
    if input.image_url.trim().is_empty() {
        return Err(ContentApiError::Validation(
            "image_url is required".to_string(),
        ));
    }

    let item = state.content.create_carousel_item(input).map_err(internal)?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Admin carousel update - PUT /api/carousel/:id
pub async fn update_carousel_item(
    State(state): State<ContentState>,
    Path(id): Path<Uuid>,
    Json(update): Json<CarouselUpdate>,
) -> Result<Json<CarouselItem>, ContentApiError> {
    state
        .content
        .update_carousel_item(id, update)
        .map_err(internal)?
        .map(Json)
        .ok_or(ContentApiError::NotFound)
}

/// Admin carousel delete - DELETE /api/carousel/:id
pub async fn delete_carousel_item(
    State(state): State<ContentState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ContentApiError> {
    if state.content.delete_carousel_item(id).map_err(internal)? {
        Ok(Json(json!({ "message": "Carousel item deleted" })))
    } else {
        Err(ContentApiError::NotFound)
    }
}

fn parse_page_type(raw: &str) -> Result<PageType, ContentApiError> {
    PageType::from_str(raw).ok_or(ContentApiError::Validation("Invalid page type".to_string()))
}

fn internal<E: std::fmt::Display>(e: E) -> ContentApiError {
    error!("Content internal error: {}", e);
    ContentApiError::Internal
}

/// Content API errors.
#[derive(Debug)]
pub enum ContentApiError {
    Validation(String),
    NotFound,
    Internal,
}

impl IntoResponse for ContentApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ContentApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ContentApiError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
            ContentApiError::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
