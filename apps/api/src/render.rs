//! Server-rendered share pages.

use minijinja::Environment;
use serde::Serialize;

use crate::i18n;
use crate::session::Session;

pub const SHARE_PAGE: &str = "resume/share.html";
pub const MOBILE_SHARE_PAGE: &str = "user/mobile/resume.html";

/// Template environment with every page compiled in at build time.
pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(SHARE_PAGE, include_str!("../templates/resume/share.html"))?;
        env.add_template(
            MOBILE_SHARE_PAGE,
            include_str!("../templates/user/mobile/resume.html"),
        )?;
        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, name: &str, context: S) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(context)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuItem {
    pub id: &'static str,
    pub url: String,
    pub title: String,
    pub enabled: bool,
}

/// Mobile navigation for the signed-in visitor; empty for anonymous visitors.
pub fn mobile_menu(session: Option<&Session>) -> Vec<MenuItem> {
    let Some(session) = session else {
        return Vec::new();
    };
    let locale = session.locale.as_str();
    vec![
        MenuItem {
            id: "github",
            url: format!("/github/{}/mobile?locale={locale}", session.github_login),
            title: i18n::t(locale, "mobile.menu.github"),
            enabled: false,
        },
        MenuItem {
            id: "resume",
            url: "/resume/sharepage".to_string(),
            title: i18n::t(locale, "mobile.menu.resume"),
            enabled: true,
        },
    ]
}
