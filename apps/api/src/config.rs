use anyhow::{Context, Result};

const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    /// When unset the in-memory candidate store is used.
    pub database_url: Option<String>,
    pub github_api_url: String,
    pub github_token: Option<String>,
    pub archive: Option<ArchiveConfig>,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

/// Object storage settings for archiving uploaded resumes. Present only when `S3_BUCKET` is set.
#[derive(Debug, Clone)]
pub struct ArchiveConfig {
    pub bucket: String,
    pub endpoint: Option<String>,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let archive = match optional_env("S3_BUCKET") {
            Some(bucket) => Some(ArchiveConfig {
                bucket,
                endpoint: optional_env("S3_ENDPOINT"),
                region: optional_env("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string()),
                access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
                secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            }),
            None => None,
        };

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            database_url: optional_env("DATABASE_URL"),
            github_api_url: optional_env("GITHUB_API_URL")
                .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string()),
            github_token: optional_env("GITHUB_TOKEN"),
            archive,
            max_upload_bytes: match optional_env("MAX_UPLOAD_BYTES") {
                Some(v) => v
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
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

/// Reads an optional variable, treating an empty value as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
