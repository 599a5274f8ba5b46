//! Axum route handlers for the resume JSON API.
//!
//! Operations that need a published record all follow the same shape: look the
//! record up, and when it is missing answer `{error, success: true}` instead of
//! an HTTP error.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::cache::{CacheInvalidation, Cacheable, DOWNLOAD_FIELD, STATS_HASH};
use crate::downloads::{resume_file_title, ArtifactOptions};
use crate::errors::AppError;
use crate::i18n;
use crate::models::resume::{PubResume, PubResumePatch};
use crate::notify::Notice;
use crate::resume::envelope::Envelope;
use crate::resume::share::{
    github_sections, merge_github, not_published, share_status_envelope, ShareRecords,
    ShareStatus,
};
use crate::session::{locale_of, Session};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SaveResumeRequest {
    #[serde(default)]
    pub resume: Value,
}

#[derive(Debug, Deserialize)]
pub struct HashQuery {
    pub hash: String,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    #[serde(default)]
    pub enable: bool,
}

#[derive(Debug, Deserialize)]
pub struct TemplateRequest {
    pub template: String,
}

/// Returned by a successful save so the editor can offer the share link.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeInfo {
    pub url: String,
    pub use_github: bool,
    pub open_share: bool,
}

async fn own_record(state: &AppState, session: &Session) -> Result<Option<PubResume>, AppError> {
    Ok(state.pubs.find_by_user(session.user_id).await?)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/resume
pub async fn get_resume(
    State(state): State<AppState>,
    session: Session,
) -> Result<Envelope<Option<Value>>, AppError> {
    let resume = state.resumes.get_resume(session.user_id).await?;
    Ok(Envelope::ok(resume))
}

/// PUT /api/resume
///
/// Saves the resume, creates the published record on first save and marks the
/// cached public page for invalidation. A rejected save still answers
/// `success: true`, with `result: null`.
pub async fn set_resume(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<SaveResumeRequest>,
) -> Result<(Extension<CacheInvalidation>, Envelope<Option<ResumeInfo>>), AppError> {
    let user_id = session.user_id;
    let saved = state.resumes.update_resume(user_id, &request.resume).await?;
    info!("[RESUME:UPDATE][{}]", session.github_login);

    let mut record = None;
    let mut resume_info = None;
    if saved {
        let existing = match state.pubs.find_by_user(user_id).await? {
            Some(existing) => existing,
            None => state.pubs.add_pub_resume(user_id).await?,
        };
        resume_info = Some(ResumeInfo {
            url: existing.share_url(&session.locale),
            use_github: existing.use_github,
            open_share: existing.open_share,
        });
        record = Some(existing);
    } else {
        warn!("Resume update for {} was rejected", session.github_login);
    }

    let record = match record {
        Some(record) => Some(record),
        None => state.pubs.find_by_user(user_id).await?,
    };
    let stale_keys = record
        .iter()
        .map(|r| state.cache_keys.public_resume(&r.resume_hash))
        .collect();

    state
        .notifier
        .notify(Notice::resume_saved(&session.github_login));

    Ok((
        Extension(CacheInvalidation(stale_keys)),
        Envelope::ok(resume_info).with_message(i18n::t(&session.locale, "messages.success.save")),
    ))
}

/// GET /api/resume/download?hash=
pub async fn download_resume(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<HashQuery>,
) -> Result<Envelope<String>, AppError> {
    let hash = query.hash;
    let updated_at = state.pubs.get_update_time(&hash).await?;
    let title = resume_file_title(updated_at);

    let resume_url = format!(
        "{}/resume/{hash}?locale={}&userId={}&notrace=true",
        state.config.app_url, session.locale, session.user_id
    );
    state
        .notifier
        .notify(Notice::resume_downloaded(&resume_url, &session.github_login));
    info!("[RESUME:DOWNLOAD][{resume_url}]");

    if let Err(e) = state
        .cache
        .hincr(&state.cache_keys.key(STATS_HASH), DOWNLOAD_FIELD, 1)
        .await
    {
        warn!("Download counter update failed: {e}");
    }

    let result = state
        .downloads
        .resume(
            &resume_url,
            ArtifactOptions {
                folder: session.github_login,
                title,
            },
        )
        .await?;

    Ok(Envelope::ok(result))
}

/// GET /api/resume/shared/public?hash=
///
/// A found resume is marked [`Cacheable`] for the response cache in front of
/// this route. Not found still answers `success: true`, with only a message.
pub async fn get_pub_resume(
    State(state): State<AppState>,
    session: Option<Session>,
    Query(query): Query<HashQuery>,
) -> Result<Response, AppError> {
    match state.pubs.get_pub_resume(&query.hash).await? {
        Some(resume) => {
            let mut response = Envelope::ok(resume).into_response();
            response.extensions_mut().insert(Cacheable {
                key: state.cache_keys.public_resume(&query.hash),
            });
            Ok(response)
        }
        None => {
            let locale = locale_of(session.as_ref());
            Ok(Envelope::<Value>::empty()
                .with_message(i18n::t(locale, "messages.resume.notFound"))
                .into_response())
        }
    }
}

/// GET /api/resume/shared/:hash
///
/// Visitors coming from the download flow also get a link to the owner's
/// GitHub page.
pub async fn get_pub_resume_status(
    State(state): State<AppState>,
    session: Option<Session>,
    Path(hash): Path<String>,
) -> Result<Envelope<Option<ShareStatus>>, AppError> {
    let locale = locale_of(session.as_ref()).to_string();
    let from_download = session.as_ref().is_some_and(|s| s.from_download);
    let record = state.pubs.find_by_hash(&hash).await?;
    let mut envelope = share_status_envelope(record.as_ref(), &locale);

    if let (Some(record), Some(Some(status))) = (record.as_ref(), envelope.result.as_mut()) {
        if from_download {
            match state.users.find_user_by_id(record.user_id).await? {
                Some(user) => {
                    status.github_url = Some(format!(
                        "{}/github/{}?locale={locale}",
                        state.config.app_url, user.github_login
                    ));
                }
                None => warn!("Owner {} of resume {hash} not found", record.user_id),
            }
        }
    }

    Ok(envelope)
}

/// GET /api/resume/shared
pub async fn get_resume_status(
    State(state): State<AppState>,
    session: Session,
) -> Result<Envelope<Option<ShareStatus>>, AppError> {
    let record = own_record(&state, &session).await?;
    Ok(share_status_envelope(record.as_ref(), &session.locale))
}

/// PATCH /api/resume/shared/status
pub async fn set_resume_share_status(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<ToggleRequest>,
) -> Result<Envelope, AppError> {
    let Some(record) = own_record(&state, &session).await? else {
        return Ok(Envelope::empty().with_error(not_published(&session.locale)));
    };

    state
        .pubs
        .update_pub_resume(
            session.user_id,
            &record.resume_hash,
            PubResumePatch {
                open_share: Some(request.enable),
                ..Default::default()
            },
        )
        .await?;

    let key = if request.enable {
        "messages.share.toggleOpen"
    } else {
        "messages.share.toggleClose"
    };
    Ok(Envelope::empty().with_message(i18n::t(&session.locale, key)))
}

/// PATCH /api/resume/shared/template
pub async fn set_resume_share_template(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<TemplateRequest>,
) -> Result<Envelope, AppError> {
    let Some(record) = own_record(&state, &session).await? else {
        return Ok(Envelope::empty().with_error(not_published(&session.locale)));
    };

    state
        .pubs
        .update_pub_resume(
            session.user_id,
            &record.resume_hash,
            PubResumePatch {
                template: Some(request.template),
                ..Default::default()
            },
        )
        .await?;

    Ok(Envelope::empty().with_message(i18n::t(&session.locale, "messages.resume.template")))
}

/// PATCH /api/resume/shared/github
pub async fn set_resume_github_status(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<ToggleRequest>,
) -> Result<Envelope, AppError> {
    let Some(record) = own_record(&state, &session).await? else {
        return Ok(Envelope::empty().with_error(not_published(&session.locale)));
    };

    state
        .pubs
        .update_pub_resume(
            session.user_id,
            &record.resume_hash,
            PubResumePatch {
                use_github: Some(request.enable),
                ..Default::default()
            },
        )
        .await?;

    let key = if request.enable {
        "messages.resume.linkGithub"
    } else {
        "messages.resume.unlinkGithub"
    };
    Ok(Envelope::empty().with_message(i18n::t(&session.locale, key)))
}

/// PATCH /api/resume/shared/github/sections
pub async fn set_github_share_section(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<Map<String, Value>>,
) -> Result<Envelope, AppError> {
    let Some(record) = own_record(&state, &session).await? else {
        return Ok(Envelope::empty().with_error(not_published(&session.locale)));
    };

    let github = merge_github(&record.github, github_sections(&body));
    state
        .pubs
        .update_pub_resume(
            session.user_id,
            &record.resume_hash,
            PubResumePatch {
                github: Some(github),
                ..Default::default()
            },
        )
        .await?;

    Ok(Envelope::empty())
}

/// GET /api/resume/shared/records
pub async fn get_share_records(
    State(state): State<AppState>,
    session: Session,
) -> Result<Envelope<ShareRecords>, AppError> {
    let Some(record) = own_record(&state, &session).await? else {
        return Ok(Envelope::ok(ShareRecords::placeholder())
            .with_error(not_published(&session.locale)));
    };

    let analytics = state
        .shares
        .find_share(&record.share_path(), session.user_id)
        .await?
        .unwrap_or_default();

    Ok(Envelope::ok(ShareRecords {
        url: record.share_url(&session.locale),
        open_share: record.open_share,
        analytics,
    }))
}
