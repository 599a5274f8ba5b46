//! Request-scoped identity: the login session and the client's device kind.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::i18n::DEFAULT_LOCALE;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "sid";

const MOBILE_MARKERS: [&str; 6] = ["Mobile", "Android", "iPhone", "iPad", "iPod", "Windows Phone"];

/// Session document written by the login flow and stored in the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: Uuid,
    pub github_login: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Set when the visitor arrived through the PDF download flow.
    #[serde(default)]
    pub from_download: bool,
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

/// Locale of an optional session, falling back to the default.
pub fn locale_of(session: Option<&Session>) -> &str {
    session.map(|s| s.locale.as_str()).unwrap_or(DEFAULT_LOCALE)
}

/// Resolves the `sid` cookie to a [`Session`] and stores it in request extensions.
/// Unknown or malformed sessions leave the request anonymous.
pub async fn load_session(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    if let Some(sid) = extract_cookie(request.headers(), SESSION_COOKIE) {
        let key = state.cache_keys.session(&sid);
        match state.cache.get(&key).await {
            Ok(Some(raw)) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) => {
                    request.extensions_mut().insert(session);
                }
                Err(e) => warn!("Malformed session document under {key}: {e}"),
            },
            Ok(None) => debug!("No session stored for sid cookie"),
            Err(e) => warn!("Session lookup failed: {e}"),
        }
    }

    next.run(request).await
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Whether the client looks like a phone or tablet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Device {
    pub is_mobile: bool,
}

impl Device {
    pub fn from_user_agent(user_agent: &str) -> Self {
        Device {
            is_mobile: MOBILE_MARKERS.iter().any(|m| user_agent.contains(m)),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Device
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_agent = parts
            .headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        Ok(Device::from_user_agent(user_agent))
    }
}

/// Extract a cookie value from headers
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(header::COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            (key == name && !value.is_empty()).then(|| value.to_string())
        })
}
