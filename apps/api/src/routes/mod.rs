pub mod health;

use axum::{
    middleware,
    routing::{get, patch},
    Router,
};

use crate::cache::middleware::{cache_public_resume, invalidate_cache};
use crate::resume::{handlers, pages};
use crate::session::load_session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let public_resume = get(handlers::get_pub_resume).route_layer(
        middleware::from_fn_with_state(state.clone(), cache_public_resume),
    );

    Router::new()
        .route("/health", get(health::health_handler))
        // Own resume
        .route(
            "/api/resume",
            get(handlers::get_resume).put(handlers::set_resume),
        )
        .route("/api/resume/download", get(handlers::download_resume))
        // Sharing
        .route("/api/resume/shared", get(handlers::get_resume_status))
        .route("/api/resume/shared/public", public_resume)
        .route("/api/resume/shared/records", get(handlers::get_share_records))
        .route("/api/resume/shared/:hash", get(handlers::get_pub_resume_status))
        .route(
            "/api/resume/shared/status",
            patch(handlers::set_resume_share_status),
        )
        .route(
            "/api/resume/shared/template",
            patch(handlers::set_resume_share_template),
        )
        .route(
            "/api/resume/shared/github",
            patch(handlers::set_resume_github_status),
        )
        .route(
            "/api/resume/shared/github/sections",
            patch(handlers::set_github_share_section),
        )
        // Pages
        .route("/resume/sharepage", get(pages::get_resume_share_page))
        .route("/resume/:hash", get(pages::get_pub_resume_page))
        .route("/resume/:hash/mobile", get(pages::get_pub_resume_page_mobile))
        .layer(middleware::from_fn_with_state(state.clone(), invalidate_cache))
        .layer(middleware::from_fn_with_state(state.clone(), load_session))
        .with_state(state)
}
