//! Server-rendered share pages and the redirect to the caller's own page.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::errors::AppError;
use crate::i18n;
use crate::render::{mobile_menu, MOBILE_SHARE_PAGE, SHARE_PAGE};
use crate::session::{locale_of, Device, Session};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub user_name: Option<String>,
    pub user_login: Option<String>,
    pub is_admin: Option<String>,
}

impl PageQuery {
    fn display_name(&self) -> &str {
        self.user_name
            .as_deref()
            .or(self.user_login.as_deref())
            .unwrap_or_default()
    }
}

/// Plain 302 redirect.
fn found(location: String) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

/// GET /resume/sharepage
pub async fn get_resume_share_page(
    State(state): State<AppState>,
    session: Session,
    device: Device,
) -> Result<Response, AppError> {
    let Some(record) = state.pubs.find_by_user(session.user_id).await? else {
        return Ok(found("/404".to_string()));
    };

    if device.is_mobile {
        return Ok(found(format!("/resume/{}/mobile", record.resume_hash)));
    }
    Ok(found(format!("/resume/{}", record.resume_hash)))
}

/// GET /resume/:hash
pub async fn get_pub_resume_page(
    State(state): State<AppState>,
    session: Option<Session>,
    Path(hash): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    let locale = locale_of(session.as_ref());
    let html = state.pages.render(
        SHARE_PAGE,
        json!({
            "title": i18n::t_with(locale, "resumePage.title", query.display_name()),
            "resumeHash": hash,
            "login": query.user_login.as_deref().unwrap_or_default(),
            "hideFooter": true,
        }),
    )?;
    Ok(Html(html))
}

/// GET /resume/:hash/mobile
pub async fn get_pub_resume_page_mobile(
    State(state): State<AppState>,
    session: Option<Session>,
    Path(hash): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    let locale = locale_of(session.as_ref());
    let is_admin = query.is_admin.as_deref() == Some("true");
    let html = state.pages.render(
        MOBILE_SHARE_PAGE,
        json!({
            "title": i18n::t_with(locale, "resumePage.title", query.display_name()),
            "resumeHash": hash,
            "login": query.user_login.as_deref().unwrap_or_default(),
            "menu": mobile_menu(session.as_ref()),
            "user": { "isAdmin": is_admin },
            "hideFooter": true,
        }),
    )?;
    Ok(Html(html))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;

    fn location(response: &Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap()
    }

    #[tokio::test]
    async fn test_share_page_redirects_to_404_without_record() {
        let h = Harness::new();
        let (_, session) = h.user("ada");
        let response = get_resume_share_page(
            State(h.state()),
            session,
            Device { is_mobile: false },
        )
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/404");
    }

    #[tokio::test]
    async fn test_share_page_redirect_depends_on_device() {
        let h = Harness::new();
        let (user_id, session) = h.user("ada");
        let record = h.publish(user_id);

        let desktop = get_resume_share_page(
            State(h.state()),
            session.clone(),
            Device { is_mobile: false },
        )
        .await
        .unwrap();
        assert_eq!(location(&desktop), format!("/resume/{}", record.resume_hash));

        let mobile = get_resume_share_page(State(h.state()), session, Device { is_mobile: true })
            .await
            .unwrap();
        assert_eq!(
            location(&mobile),
            format!("/resume/{}/mobile", record.resume_hash)
        );
    }

    #[tokio::test]
    async fn test_desktop_page_renders_title_and_hash() {
        let h = Harness::new();
        let Html(html) = get_pub_resume_page(
            State(h.state()),
            None,
            Path("abc123".to_string()),
            Query(PageQuery {
                user_name: Some("Ada Lovelace".to_string()),
                user_login: Some("ada".to_string()),
                is_admin: None,
            }),
        )
        .await
        .unwrap();
        assert!(html.contains("<title>Ada Lovelace"));
        assert!(html.contains(r#"data-resume-hash="abc123""#));
        assert!(html.contains(r#"data-login="ada""#));
    }

    #[tokio::test]
    async fn test_mobile_page_renders_menu_for_session() {
        let h = Harness::new();
        let (_, session) = h.user("ada");
        let Html(html) = get_pub_resume_page_mobile(
            State(h.state()),
            Some(session),
            Path("abc123".to_string()),
            Query(PageQuery {
                user_name: None,
                user_login: Some("ada".to_string()),
                is_admin: Some("true".to_string()),
            }),
        )
        .await
        .unwrap();
        assert!(html.contains(">Resume</a>"));
        assert!(html.contains(r#"data-admin="true""#));
    }

    #[tokio::test]
    async fn test_pages_without_login_render_empty_attribute() {
        let h = Harness::new();
        let Html(desktop) = get_pub_resume_page(
            State(h.state()),
            None,
            Path("abc".to_string()),
            Query(PageQuery::default()),
        )
        .await
        .unwrap();
        assert!(desktop.contains(r#"data-login="""#));
        assert!(!desktop.contains("None"));

        let Html(mobile) = get_pub_resume_page_mobile(
            State(h.state()),
            None,
            Path("abc".to_string()),
            Query(PageQuery::default()),
        )
        .await
        .unwrap();
        assert!(mobile.contains(r#"data-login="""#));
        assert!(!mobile.contains("None"));
    }
}
