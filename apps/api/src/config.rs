use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    /// Public base URL of the web app, used to build share and download links.
    pub app_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    /// Base URL under which uploaded PDFs are publicly reachable.
    pub s3_public_url: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub pdf_service_url: String,
    pub slack_webhook_url: Option<String>,
    pub cache_namespace: String,
    pub public_resume_cache_ttl_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            app_url: require_env("APP_URL")?.trim_end_matches('/').to_string(),
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            s3_public_url: require_env("S3_PUBLIC_URL")?
                .trim_end_matches('/')
                .to_string(),
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            pdf_service_url: require_env("PDF_SERVICE_URL")?,
            slack_webhook_url: std::env::var("SLACK_WEBHOOK_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            cache_namespace: std::env::var("CACHE_NAMESPACE")
                .unwrap_or_else(|_| "resume-api".to_string()),
            public_resume_cache_ttl_secs: std::env::var("PUBLIC_RESUME_CACHE_TTL_SECS")
                .unwrap_or_else(|_| "600".to_string())
                .parse::<u64>()
                .context("PUBLIC_RESUME_CACHE_TTL_SECS must be a number of seconds")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

#[cfg(test)]
impl Config {
    /// Fixed configuration for handler tests. Nothing here is ever dialed.
    pub fn for_tests() -> Self {
        Config {
            database_url: "postgres://localhost/resume_test".to_string(),
            redis_url: "redis://localhost:6379".to_string(),
            app_url: "https://resume.test".to_string(),
            s3_bucket: "resumes".to_string(),
            s3_endpoint: "http://localhost:9000".to_string(),
            s3_public_url: "https://cdn.resume.test".to_string(),
            aws_access_key_id: "test".to_string(),
            aws_secret_access_key: "test".to_string(),
            pdf_service_url: "http://localhost:3000/pdf".to_string(),
            slack_webhook_url: None,
            cache_namespace: "resume-test".to_string(),
            public_resume_cache_ttl_secs: 600,
            port: 8080,
            rust_log: "debug".to_string(),
        }
    }
}
