//! Rising Herb - Catalog Storefront Backend
//! Mission: Herb catalog API with credential-backed admin access control

use anyhow::{Context, Result};
use axum::middleware;
use dotenv::dotenv;
use risingherb_backend::{
    app::{build_router, AppContext},
    auth::{seed::seed_admins, AccountStore, TokenService},
    catalog::HerbStore,
    config::Config,
    content::ContentStore,
    middleware::{
        rate_limit::{rate_limit_middleware, RateLimiter, RateLimiterConfig},
        request_logging,
    },
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenv();
    init_tracing();

    // Refuses to start without a signing secret.
    let config = Config::from_env()?;

    info!("🌿 Rising Herb backend starting");

    let accounts = Arc::new(
        AccountStore::new(&config.database_path).context("Failed to open account store")?,
    );
    let herbs =
        Arc::new(HerbStore::new(&config.database_path).context("Failed to open herb store")?);
    let content = Arc::new(
        ContentStore::new(&config.database_path).context("Failed to open content store")?,
    );
    let tokens = Arc::new(
        TokenService::new(config.jwt_secret.clone()).with_lifetime_days(config.token_lifetime_days),
    );

    info!("📦 Database initialized at: {}", config.database_path);

    // Seed privileged accounts before the listener binds. Per-entry failures
    // are logged inside and never prevent startup.
    if config.admin_accounts.is_empty() {
        info!("🔐 No admin accounts configured (set ADMIN_ACCOUNTS to seed)");
    } else {
        let seeded = seed_admins(&accounts, &config.admin_accounts);
        info!(
            "🔐 Admin seeding complete: {} created, {} configured",
            seeded,
            config.admin_accounts.len()
        );
    }

    let limiter = RateLimiter::new(RateLimiterConfig {
        max_requests: config.rate_limit_per_minute,
        window: Duration::from_secs(60),
    });

    // Periodically drop stale rate-limit windows.
    let cleanup_limiter = limiter.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(300));
        loop {
            ticker.tick().await;
            cleanup_limiter.cleanup();
        }
    });

    let ctx = AppContext {
        accounts,
        herbs,
        content,
        tokens,
    };

    let app = build_router(ctx)
        .layer(middleware::from_fn_with_state(limiter, rate_limit_middleware))
        .layer(middleware::from_fn(request_logging))
        .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("🎯 API server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "risingherb_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
