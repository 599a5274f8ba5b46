mod cache;
mod config;
mod db;
mod downloads;
mod errors;
mod i18n;
mod models;
mod notify;
mod render;
mod resume;
mod routes;
mod session;
mod state;
mod stores;

#[cfg(test)]
mod testing;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cache::redis_cache::RedisCache;
use crate::cache::CacheKeys;
use crate::config::Config;
use crate::db::create_pool;
use crate::downloads::S3PdfGenerator;
use crate::notify::SlackNotifier;
use crate::render::PageRenderer;
use crate::routes::build_router;
use crate::state::AppState;
use crate::stores::postgres::PgStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    let store = Arc::new(PgStore::new(db));

    // Initialize Redis
    let redis = redis::Client::open(config.redis_url.clone())?;
    let cache = RedisCache::connect(&redis).await?;

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized");

    let downloads = S3PdfGenerator::new(
        s3,
        config.s3_bucket.clone(),
        config.s3_public_url.clone(),
        config.pdf_service_url.clone(),
    )?;

    if config.slack_webhook_url.is_none() {
        info!("SLACK_WEBHOOK_URL not set, notifications will only be logged");
    }
    let notifier = SlackNotifier::new(config.slack_webhook_url.clone());

    let pages = PageRenderer::new()?;

    // Build app state
    let state = AppState {
        config: config.clone(),
        resumes: store.clone(),
        pubs: store.clone(),
        users: store.clone(),
        shares: store,
        cache: Arc::new(cache),
        cache_keys: CacheKeys::new(config.cache_namespace.clone()),
        notifier: Arc::new(notifier),
        downloads: Arc::new(downloads),
        pages: Arc::new(pages),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to APP_URL once the web client is served from it

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// S3 client for the PDF bucket. Path-style addressing keeps MinIO endpoints working.
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "resume-api-static",
    );

    let shared = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    let s3_config = aws_sdk_s3::config::Builder::from(&shared)
        .force_path_style(true)
        .build();
    aws_sdk_s3::Client::from_conf(s3_config)
}
