use std::sync::Arc;

use crate::cache::{Cache, CacheKeys};
use crate::config::Config;
use crate::downloads::ArtifactGenerator;
use crate::notify::Notifier;
use crate::render::PageRenderer;
use crate::stores::{PubResumeStore, ResumeStore, ShareAnalyticsStore, UserStore};

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Every collaborator sits behind a trait object so handlers stay ignorant of the
/// Postgres/Redis/S3 backends wired up in `main`.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub resumes: Arc<dyn ResumeStore>,
    pub pubs: Arc<dyn PubResumeStore>,
    pub users: Arc<dyn UserStore>,
    pub shares: Arc<dyn ShareAnalyticsStore>,
    pub cache: Arc<dyn Cache>,
    pub cache_keys: CacheKeys,
    pub notifier: Arc<dyn Notifier>,
    pub downloads: Arc<dyn ArtifactGenerator>,
    pub pages: Arc<PageRenderer>,
}
