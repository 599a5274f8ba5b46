use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;
use uuid::Uuid;

/// GitHub sections a published resume can show or hide.
pub const GITHUB_SECTIONS: [&str; 7] = [
    "hotmap",
    "info",
    "repos",
    "course",
    "orgs",
    "languages",
    "commits",
];

pub const DEFAULT_TEMPLATE: &str = "v1";

/// The published record behind a public, hash-addressed resume page.
/// One per user; `resume_hash` never changes once issued.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PubResume {
    pub user_id: Uuid,
    pub resume_hash: String,
    pub github: Value,
    pub template: String,
    pub use_github: bool,
    pub open_share: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PubResume {
    /// A fresh record for `user_id` with every GitHub section switched on.
    pub fn new_for(user_id: Uuid) -> Self {
        let now = Utc::now();
        PubResume {
            user_id,
            resume_hash: new_resume_hash(),
            github: Value::Object(default_github_sections()),
            template: DEFAULT_TEMPLATE.to_string(),
            use_github: false,
            open_share: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Path of the public page, without host or query.
    pub fn share_path(&self) -> String {
        format!("resume/{}", self.resume_hash)
    }

    pub fn share_url(&self, locale: &str) -> String {
        format!("{}?locale={locale}", self.share_path())
    }
}

/// Partial update of a published record; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PubResumePatch {
    pub github: Option<Value>,
    pub template: Option<String>,
    pub use_github: Option<bool>,
    pub open_share: Option<bool>,
}

impl PubResumePatch {
    pub fn apply(&self, record: &mut PubResume) {
        if let Some(github) = &self.github {
            record.github = github.clone();
        }
        if let Some(template) = &self.template {
            record.template = template.clone();
        }
        if let Some(use_github) = self.use_github {
            record.use_github = use_github;
        }
        if let Some(open_share) = self.open_share {
            record.open_share = open_share;
        }
        record.updated_at = Utc::now();
    }
}

pub fn new_resume_hash() -> String {
    Uuid::new_v4().simple().to_string()
}

pub fn default_github_sections() -> Map<String, Value> {
    GITHUB_SECTIONS
        .iter()
        .map(|section| (section.to_string(), Value::Bool(true)))
        .collect()
}
