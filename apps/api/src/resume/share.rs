//! Shaping of share status and analytics payloads, and GitHub section merging.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::i18n;
use crate::models::resume::{PubResume, GITHUB_SECTIONS};
use crate::models::share::ShareAnalytics;
use crate::resume::envelope::Envelope;

/// How a published resume is presented.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareStatus {
    pub github: Value,
    pub template: String,
    pub open_share: bool,
    pub use_github: bool,
    pub resume_hash: String,
    pub url: String,
    pub github_url: Option<String>,
}

impl ShareStatus {
    pub fn from_record(record: &PubResume, locale: &str) -> Self {
        ShareStatus {
            github: record.github.clone(),
            template: record.template.clone(),
            open_share: record.open_share,
            use_github: record.use_github,
            resume_hash: record.resume_hash.clone(),
            url: record.share_url(locale),
            github_url: None,
        }
    }
}

/// Share status envelope; an unpublished resume yields `result: null` with an error.
pub fn share_status_envelope(
    record: Option<&PubResume>,
    locale: &str,
) -> Envelope<Option<ShareStatus>> {
    match record {
        Some(record) => Envelope::ok(Some(ShareStatus::from_record(record, locale))),
        None => Envelope::ok(None).with_error(not_published(locale)),
    }
}

pub fn not_published(locale: &str) -> String {
    i18n::t(locale, "messages.resume.notPublished")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRecords {
    pub url: String,
    pub open_share: bool,
    #[serde(flatten)]
    pub analytics: ShareAnalytics,
}

impl ShareRecords {
    /// Shape returned before anything has been published.
    pub fn placeholder() -> Self {
        ShareRecords {
            url: String::new(),
            open_share: false,
            analytics: ShareAnalytics::default(),
        }
    }
}

/// Picks the known GitHub section toggles out of a request body.
/// Non-boolean values and unknown keys are dropped.
pub fn github_sections(body: &Map<String, Value>) -> Map<String, Value> {
    body.iter()
        .filter(|(key, value)| GITHUB_SECTIONS.contains(&key.as_str()) && value.is_boolean())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Overlays `sections` on `existing`, keeping every key the update does not name.
pub fn merge_github(existing: &Value, sections: Map<String, Value>) -> Value {
    let mut merged = existing.as_object().cloned().unwrap_or_default();
    merged.extend(sections);
    Value::Object(merged)
}
