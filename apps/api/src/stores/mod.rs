//! Data-access seams for the handlers.
//!
//! Each store is a trait so `AppState` can carry `Arc<dyn ...>` and swap the
//! Postgres backend for in-memory doubles in tests. "Not found" is `Ok(None)`;
//! `Err` is reserved for real backend failures.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::models::resume::{PubResume, PubResumePatch};
use crate::models::share::ShareAnalytics;
use crate::models::user::User;

pub mod postgres;

#[cfg(test)]
pub mod memory;

#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn get_resume(&self, user_id: Uuid) -> Result<Option<Value>>;

    /// Returns `false` when the content was rejected and nothing was written.
    async fn update_resume(&self, user_id: Uuid, content: &Value) -> Result<bool>;
}

#[async_trait]
pub trait PubResumeStore: Send + Sync {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<PubResume>>;

    async fn find_by_hash(&self, resume_hash: &str) -> Result<Option<PubResume>>;

    /// Creates the user's published record, or returns the existing one.
    async fn add_pub_resume(&self, user_id: Uuid) -> Result<PubResume>;

    async fn update_pub_resume(
        &self,
        user_id: Uuid,
        resume_hash: &str,
        patch: PubResumePatch,
    ) -> Result<()>;

    /// Last update time of the resume published under `resume_hash`.
    async fn get_update_time(&self, resume_hash: &str) -> Result<Option<DateTime<Utc>>>;

    /// Resume content published under `resume_hash`.
    async fn get_pub_resume(&self, resume_hash: &str) -> Result<Option<Value>>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user_by_id(&self, user_id: Uuid) -> Result<Option<User>>;
}

#[async_trait]
pub trait ShareAnalyticsStore: Send + Sync {
    async fn find_share(&self, url: &str, user_id: Uuid) -> Result<Option<ShareAnalytics>>;
}
