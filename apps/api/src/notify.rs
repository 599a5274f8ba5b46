//! Fire-and-forget team notifications.

use std::fmt;

use reqwest::Client;
use serde_json::json;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Resume,
    Download,
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoticeKind::Resume => f.write_str("resume"),
            NoticeKind::Download => f.write_str("download"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn resume_saved(github_login: &str) -> Self {
        Notice {
            kind: NoticeKind::Resume,
            text: format!(
                "Resume create or update by <https://github.com/{github_login}|{github_login}>"
            ),
        }
    }

    pub fn resume_downloaded(resume_url: &str, github_login: &str) -> Self {
        Notice {
            kind: NoticeKind::Download,
            text: format!("<{resume_url}|{github_login} resume>"),
        }
    }
}

/// Delivery never blocks or fails the calling request.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Posts notices to a Slack incoming webhook on a detached task.
#[derive(Clone)]
pub struct SlackNotifier {
    client: Client,
    webhook_url: Option<String>,
}

impl SlackNotifier {
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            webhook_url,
        }
    }
}

impl Notifier for SlackNotifier {
    fn notify(&self, notice: Notice) {
        let Some(url) = self.webhook_url.clone() else {
            debug!("Slack disabled, dropping [{}] {}", notice.kind, notice.text);
            return;
        };
        let client = self.client.clone();

        tokio::spawn(async move {
            let payload = json!({ "text": format!("[{}] {}", notice.kind, notice.text) });
            match client.post(&url).json(&payload).send().await {
                Ok(response) if !response.status().is_success() => {
                    warn!("Slack webhook returned {}", response.status());
                }
                Ok(_) => {}
                Err(e) => warn!("Slack notification failed: {e}"),
            }
        });
    }
}
