use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::resume::{PubResume, PubResumePatch};
use crate::models::share::{ShareAnalytics, ShareAnalyticsRow};
use crate::models::user::User;
use crate::stores::{PubResumeStore, ResumeStore, ShareAnalyticsStore, UserStore};

/// All four stores backed by one Postgres pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeStore for PgStore {
    async fn get_resume(&self, user_id: Uuid) -> Result<Option<Value>> {
        Ok(
            sqlx::query_scalar::<_, Value>("SELECT content FROM resumes WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn update_resume(&self, user_id: Uuid, content: &Value) -> Result<bool> {
        if !content.is_object() {
            warn!("Rejected resume update for user {user_id}: content is not an object");
            return Ok(false);
        }

        // Last write wins; concurrent saves are not coordinated.
        let result = sqlx::query(
            r#"
            INSERT INTO resumes (user_id, content)
            VALUES ($1, $2)
            ON CONFLICT (user_id)
            DO UPDATE SET content = EXCLUDED.content, updated_at = now()
            "#,
        )
        .bind(user_id)
        .bind(content)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}

#[async_trait]
impl PubResumeStore for PgStore {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<PubResume>> {
        Ok(
            sqlx::query_as::<_, PubResume>("SELECT * FROM resume_pubs WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn find_by_hash(&self, resume_hash: &str) -> Result<Option<PubResume>> {
        Ok(
            sqlx::query_as::<_, PubResume>("SELECT * FROM resume_pubs WHERE resume_hash = $1")
                .bind(resume_hash)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn add_pub_resume(&self, user_id: Uuid) -> Result<PubResume> {
        let fresh = PubResume::new_for(user_id);

        // The UNIQUE(user_id) constraint keeps a racing second insert from
        // creating another record; the loser re-reads the winner's row.
        let inserted = sqlx::query_as::<_, PubResume>(
            r#"
            INSERT INTO resume_pubs (user_id, resume_hash, github, template, use_github, open_share)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(fresh.user_id)
        .bind(&fresh.resume_hash)
        .bind(&fresh.github)
        .bind(&fresh.template)
        .bind(fresh.use_github)
        .bind(fresh.open_share)
        .fetch_optional(&self.pool)
        .await?;

        match inserted {
            Some(record) => {
                info!(
                    "Published record {} created for user {user_id}",
                    record.resume_hash
                );
                Ok(record)
            }
            None => self
                .find_by_user(user_id)
                .await?
                .ok_or_else(|| anyhow::anyhow!("published record for {user_id} vanished")),
        }
    }

    async fn update_pub_resume(
        &self,
        user_id: Uuid,
        resume_hash: &str,
        patch: PubResumePatch,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE resume_pubs
            SET github = COALESCE($3, github),
                template = COALESCE($4, template),
                use_github = COALESCE($5, use_github),
                open_share = COALESCE($6, open_share),
                updated_at = now()
            WHERE user_id = $1 AND resume_hash = $2
            "#,
        )
        .bind(user_id)
        .bind(resume_hash)
        .bind(patch.github)
        .bind(patch.template)
        .bind(patch.use_github)
        .bind(patch.open_share)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_update_time(&self, resume_hash: &str) -> Result<Option<DateTime<Utc>>> {
        Ok(sqlx::query_scalar::<_, DateTime<Utc>>(
            r#"
            SELECT r.updated_at
            FROM resumes r
            JOIN resume_pubs p ON p.user_id = r.user_id
            WHERE p.resume_hash = $1
            "#,
        )
        .bind(resume_hash)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn get_pub_resume(&self, resume_hash: &str) -> Result<Option<Value>> {
        Ok(sqlx::query_scalar::<_, Value>(
            r#"
            SELECT r.content
            FROM resumes r
            JOIN resume_pubs p ON p.user_id = r.user_id
            WHERE p.resume_hash = $1
            "#,
        )
        .bind(resume_hash)
        .fetch_optional(&self.pool)
        .await?)
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_user_by_id(&self, user_id: Uuid) -> Result<Option<User>> {
        Ok(
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }
}

#[async_trait]
impl ShareAnalyticsStore for PgStore {
    async fn find_share(&self, url: &str, user_id: Uuid) -> Result<Option<ShareAnalytics>> {
        let row = sqlx::query_as::<_, ShareAnalyticsRow>(
            r#"
            SELECT view_devices, view_sources, page_views
            FROM share_analyses
            WHERE url = $1 AND user_id = $2
            "#,
        )
        .bind(url)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ShareAnalytics::from))
    }
}
