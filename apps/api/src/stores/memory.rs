//! In-memory stores for handler tests.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::models::resume::{PubResume, PubResumePatch};
use crate::models::share::ShareAnalytics;
use crate::models::user::User;
use crate::stores::{PubResumeStore, ResumeStore, ShareAnalyticsStore, UserStore};

#[derive(Default)]
pub struct MemoryStore {
    resumes: Mutex<HashMap<Uuid, (Value, DateTime<Utc>)>>,
    pubs: Mutex<Vec<PubResume>>,
    users: Mutex<HashMap<Uuid, User>>,
    shares: Mutex<HashMap<(String, Uuid), ShareAnalytics>>,
    pub_resume_reads: Mutex<u32>,
}

impl MemoryStore {
    pub fn insert_user(&self, github_login: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.users.lock().unwrap().insert(
            id,
            User {
                id,
                github_login: github_login.to_string(),
                email: None,
                created_at: Utc::now(),
            },
        );
        id
    }

    pub fn insert_resume(&self, user_id: Uuid, content: Value, updated_at: DateTime<Utc>) {
        self.resumes
            .lock()
            .unwrap()
            .insert(user_id, (content, updated_at));
    }

    pub fn insert_pub(&self, record: PubResume) {
        self.pubs.lock().unwrap().push(record);
    }

    pub fn insert_share(&self, url: &str, user_id: Uuid, analytics: ShareAnalytics) {
        self.shares
            .lock()
            .unwrap()
            .insert((url.to_string(), user_id), analytics);
    }

    pub fn pub_count(&self, user_id: Uuid) -> usize {
        self.pubs
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.user_id == user_id)
            .count()
    }

    pub fn pub_for(&self, user_id: Uuid) -> Option<PubResume> {
        self.pubs
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.user_id == user_id)
            .cloned()
    }

    pub fn pub_resume_reads(&self) -> u32 {
        *self.pub_resume_reads.lock().unwrap()
    }
}

#[async_trait]
impl ResumeStore for MemoryStore {
    async fn get_resume(&self, user_id: Uuid) -> Result<Option<Value>> {
        Ok(self
            .resumes
            .lock()
            .unwrap()
            .get(&user_id)
            .map(|(content, _)| content.clone()))
    }

    async fn update_resume(&self, user_id: Uuid, content: &Value) -> Result<bool> {
        if !content.is_object() {
            return Ok(false);
        }
        self.insert_resume(user_id, content.clone(), Utc::now());
        Ok(true)
    }
}

#[async_trait]
impl PubResumeStore for MemoryStore {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<PubResume>> {
        Ok(self.pub_for(user_id))
    }

    async fn find_by_hash(&self, resume_hash: &str) -> Result<Option<PubResume>> {
        Ok(self
            .pubs
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.resume_hash == resume_hash)
            .cloned())
    }

    async fn add_pub_resume(&self, user_id: Uuid) -> Result<PubResume> {
        let mut pubs = self.pubs.lock().unwrap();
        if let Some(existing) = pubs.iter().find(|p| p.user_id == user_id) {
            return Ok(existing.clone());
        }
        let record = PubResume::new_for(user_id);
        pubs.push(record.clone());
        Ok(record)
    }

    async fn update_pub_resume(
        &self,
        user_id: Uuid,
        resume_hash: &str,
        patch: PubResumePatch,
    ) -> Result<()> {
        let mut pubs = self.pubs.lock().unwrap();
        if let Some(record) = pubs
            .iter_mut()
            .find(|p| p.user_id == user_id && p.resume_hash == resume_hash)
        {
            patch.apply(record);
        }
        Ok(())
    }

    async fn get_update_time(&self, resume_hash: &str) -> Result<Option<DateTime<Utc>>> {
        let Some(record) = self.find_by_hash(resume_hash).await? else {
            return Ok(None);
        };
        Ok(self
            .resumes
            .lock()
            .unwrap()
            .get(&record.user_id)
            .map(|(_, updated_at)| *updated_at))
    }

    async fn get_pub_resume(&self, resume_hash: &str) -> Result<Option<Value>> {
        *self.pub_resume_reads.lock().unwrap() += 1;
        let Some(record) = self.find_by_hash(resume_hash).await? else {
            return Ok(None);
        };
        self.get_resume(record.user_id).await
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_id(&self, user_id: Uuid) -> Result<Option<User>> {
        Ok(self.users.lock().unwrap().get(&user_id).cloned())
    }
}

#[async_trait]
impl ShareAnalyticsStore for MemoryStore {
    async fn find_share(&self, url: &str, user_id: Uuid) -> Result<Option<ShareAnalytics>> {
        Ok(self
            .shares
            .lock()
            .unwrap()
            .get(&(url.to_string(), user_id))
            .cloned())
    }
}
