//! PDF artifacts of published resumes.
//!
//! The renderer service turns a resume page URL into PDF bytes; the result is
//! stored in S3 under `{folder}/{title}` and served from the public bucket URL.
//! Titles embed the resume's update time, so an unchanged resume is never
//! rendered twice.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::json;
use tracing::info;

use crate::errors::AppError;

const RENDER_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactOptions {
    pub folder: String,
    pub title: String,
}

impl ArtifactOptions {
    pub fn key(&self) -> String {
        format!("{}/{}", self.folder, self.title)
    }
}

/// File name for a resume last updated at `updated_at`; "now" when unknown.
pub fn resume_file_title(updated_at: Option<DateTime<Utc>>) -> String {
    let seconds = updated_at.unwrap_or_else(Utc::now).timestamp();
    format!("{seconds}-resume.pdf")
}

#[async_trait]
pub trait ArtifactGenerator: Send + Sync {
    /// Produces a PDF of the page at `url` and returns where it can be downloaded.
    async fn resume(&self, url: &str, options: ArtifactOptions) -> Result<String, AppError>;
}

pub struct S3PdfGenerator {
    http: Client,
    s3: aws_sdk_s3::Client,
    bucket: String,
    public_url: String,
    renderer_url: String,
}

impl S3PdfGenerator {
    pub fn new(
        s3: aws_sdk_s3::Client,
        bucket: String,
        public_url: String,
        renderer_url: String,
    ) -> reqwest::Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(RENDER_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            s3,
            bucket,
            public_url,
            renderer_url,
        })
    }

    async fn exists(&self, key: &str) -> Result<bool, AppError> {
        match self
            .s3
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) if e.as_service_error().is_some_and(|se| se.is_not_found()) => Ok(false),
            Err(e) => Err(AppError::Storage(format!("S3 head_object failed: {e}"))),
        }
    }

    async fn render(&self, url: &str) -> Result<Bytes, AppError> {
        let response = self
            .http
            .post(&self.renderer_url)
            .json(&json!({ "url": url }))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.bytes().await?)
    }
}

#[async_trait]
impl ArtifactGenerator for S3PdfGenerator {
    async fn resume(&self, url: &str, options: ArtifactOptions) -> Result<String, AppError> {
        let key = options.key();
        let download_url = format!("{}/{}", self.public_url, key);

        if self.exists(&key).await? {
            info!("PDF already rendered at s3://{}/{}", self.bucket, key);
            return Ok(download_url);
        }

        let pdf = self.render(url).await?;
        self.s3
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(pdf))
            .content_type("application/pdf")
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("S3 upload failed: {e}")))?;

        info!("Uploaded resume PDF to s3://{}/{}", self.bucket, key);
        Ok(download_url)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_title_uses_unix_seconds() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(resume_file_title(Some(at)), "1704164645-resume.pdf");
    }

    #[test]
    fn test_unknown_update_time_uses_now() {
        let before = Utc::now().timestamp();
        let title = resume_file_title(None);
        let seconds: i64 = title.trim_end_matches("-resume.pdf").parse().unwrap();
        assert!(seconds >= before);
    }

    #[test]
    fn test_key_joins_folder_and_title() {
        let options = ArtifactOptions {
            folder: "octocat".to_string(),
            title: "1-resume.pdf".to_string(),
        };
        assert_eq!(options.key(), "octocat/1-resume.pdf");
    }

    #[test]
    fn test_generator_builds_with_renderer_client() {
        let s3 = aws_sdk_s3::Client::from_conf(
            aws_sdk_s3::Config::builder()
                .behavior_version(aws_sdk_s3::config::BehaviorVersion::latest())
                .region(aws_sdk_s3::config::Region::new("us-east-1"))
                .build(),
        );
        let generator = S3PdfGenerator::new(
            s3,
            "resumes".to_string(),
            "https://cdn.resume.test".to_string(),
            "http://renderer.test/pdf".to_string(),
        )
        .unwrap();
        assert_eq!(generator.bucket, "resumes");
        assert_eq!(generator.renderer_url, "http://renderer.test/pdf");
    }
}
