use anyhow::{Context, Result};

use crate::auth::provider::DEFAULT_IDENTITY_ENDPOINT;

const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_PAGE_SIZE: i64 = 20;

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub anthropic_api_key: String,
    pub identity_api_key: String,
    pub identity_endpoint: String,
    /// Origin of the web client; share links point here.
    pub public_base_url: String,
    /// Records per experience page.
    pub page_size: i64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            identity_api_key: require_env("IDENTITY_API_KEY")?,
            identity_endpoint: optional_env("IDENTITY_ENDPOINT", DEFAULT_IDENTITY_ENDPOINT),
            public_base_url: optional_env("PUBLIC_BASE_URL", DEFAULT_PUBLIC_BASE_URL),
            page_size: parse_page_size(std::env::var("PAGE_SIZE").ok().as_deref())?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_page_size(raw: Option<&str>) -> Result<i64> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_PAGE_SIZE);
    };
    let size = raw
        .trim()
        .parse::<i64>()
        .context("PAGE_SIZE must be an integer")?;
    anyhow::ensure!(size > 0, "PAGE_SIZE must be positive, got {size}");
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_defaults_and_validates() {
        assert_eq!(parse_page_size(None).unwrap(), DEFAULT_PAGE_SIZE);
        assert_eq!(parse_page_size(Some(" 50 ")).unwrap(), 50);
        assert!(parse_page_size(Some("0")).is_err());
        assert!(parse_page_size(Some("twenty")).is_err());
    }
}
