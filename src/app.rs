//! HTTP Router Assembly
//! Mission: Wire public, auth, and admin surfaces around the middleware chain

use crate::{
    auth::{api as auth_api, require_admin, require_auth, AccountStore, AuthState, TokenService},
    catalog::{api as catalog_api, CatalogState, HerbStore},
    chat,
    content::{api as content_api, ContentState, ContentStore},
};
use axum::{
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;

/// Shared handles wired into the routers.
#[derive(Clone)]
pub struct AppContext {
    pub accounts: Arc<AccountStore>,
    pub herbs: Arc<HerbStore>,
    pub content: Arc<ContentStore>,
    pub tokens: Arc<TokenService>,
}

/// Build the full application router.
///
/// Admin routes run the authenticator middleware first and the admin gate
/// second; everything else is public or login-only.
pub fn build_router(ctx: AppContext) -> Router {
    let auth_state = AuthState {
        accounts: ctx.accounts.clone(),
        tokens: ctx.tokens.clone(),
    };
    let catalog_state = CatalogState {
        herbs: ctx.herbs.clone(),
    };
    let content_state = ContentState {
        content: ctx.content.clone(),
    };

    let auth_router = Router::new()
        .route("/api/auth/signup", post(auth_api::signup))
        .route("/api/auth/login", post(auth_api::login))
        .with_state(auth_state);

    let authed_router = Router::new()
        .route("/api/auth/me", get(auth_api::get_current_user))
        .route_layer(middleware::from_fn_with_state(
            ctx.tokens.clone(),
            require_auth,
        ));

    let public_router = Router::new()
        .route("/api/health", get(health_check))
        .route("/api/herbs", get(catalog_api::list_herbs))
        .route("/api/herbs/:id", get(catalog_api::get_herb))
        .route("/api/chat/link/:herb_id", get(chat::get_chat_link))
        .with_state(catalog_state.clone())
        .merge(
            Router::new()
                .route("/api/carousel", get(content_api::get_carousel))
                .route(
                    "/api/page-content/:page_type",
                    get(content_api::get_page_content),
                )
                .with_state(content_state.clone()),
        );

    let admin_router = Router::new()
        .route("/api/herbs", post(catalog_api::create_herb))
        .route(
            "/api/herbs/:id",
            put(catalog_api::update_herb).delete(catalog_api::delete_herb),
        )
        .with_state(catalog_state)
        .merge(
            Router::new()
                .route(
                    "/api/page-content/:page_type",
                    put(content_api::update_page_content),
                )
                .route("/api/carousel", post(content_api::create_carousel_item))
                .route("/api/carousel/all", get(content_api::get_all_carousel))
                .route(
                    "/api/carousel/:id",
                    put(content_api::update_carousel_item)
                        .delete(content_api::delete_carousel_item),
                )
                .with_state(content_state),
        )
        // Layers run outermost-last: the authenticator attaches identity,
        // then the gate checks the role.
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(
            ctx.tokens.clone(),
            require_auth,
        ));

    Router::new()
        .merge(public_router)
        .merge(auth_router)
        .merge(authed_router)
        .merge(admin_router)
}

/// Health check endpoint.
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "ok": true, "now": Utc::now().to_rfc3339() }))
}
