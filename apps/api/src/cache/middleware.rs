use axum::{
    body::{to_bytes, Body},
    extract::{Query, Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::cache::{CacheInvalidation, Cacheable};
use crate::state::AppState;

/// Cached bodies are small JSON documents; anything larger is passed through.
const MAX_CACHED_BODY_BYTES: usize = 1024 * 1024;

/// Deletes the keys a handler listed in its [`CacheInvalidation`] extension.
/// A failed delete is logged; the handler's response is returned regardless.
pub async fn invalidate_cache(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;

    if let Some(CacheInvalidation(keys)) = response.extensions().get::<CacheInvalidation>() {
        if let Err(e) = state.cache.delete(keys).await {
            warn!("Cache invalidation of {keys:?} failed: {e}");
        } else {
            debug!("Invalidated cache keys {keys:?}");
        }
    }

    response
}

#[derive(Debug, Deserialize)]
pub struct HashQuery {
    pub hash: Option<String>,
}

/// Serves the public resume body from cache, and stores bodies the handler
/// marked [`Cacheable`].
pub async fn cache_public_resume(
    State(state): State<AppState>,
    Query(query): Query<HashQuery>,
    request: Request,
    next: Next,
) -> Response {
    let Some(hash) = query.hash.filter(|h| !h.is_empty()) else {
        return next.run(request).await;
    };
    let key = state.cache_keys.public_resume(&hash);

    match state.cache.get(&key).await {
        Ok(Some(body)) => {
            debug!("Public resume cache hit for {key}");
            return (
                [
                    (header::CONTENT_TYPE, HeaderValue::from_static("application/json")),
                    (
                        header::HeaderName::from_static("x-cache"),
                        HeaderValue::from_static("hit"),
                    ),
                ],
                body,
            )
                .into_response();
        }
        Ok(None) => {}
        Err(e) => warn!("Public resume cache read for {key} failed: {e}"),
    }

    let response = next.run(request).await;
    if response.status() != StatusCode::OK {
        return response;
    }
    let Some(Cacheable { key }) = response.extensions().get::<Cacheable>().cloned() else {
        return response;
    };

    let (parts, body) = response.into_parts();
    let bytes = match to_bytes(body, MAX_CACHED_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Could not buffer public resume body for caching: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "response body too large").into_response();
        }
    };

    match std::str::from_utf8(&bytes) {
        Ok(text) => {
            if let Err(e) = state
                .cache
                .set_ex(&key, text, state.config.public_resume_cache_ttl_secs)
                .await
            {
                warn!("Public resume cache write for {key} failed: {e}");
            }
        }
        Err(e) => warn!("Public resume body for {key} is not UTF-8: {e}"),
    }

    Response::from_parts(parts, Body::from(bytes))
}
