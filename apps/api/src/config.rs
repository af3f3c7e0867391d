use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
const DEFAULT_REFERER: &str = "http://localhost:5500";
const DEFAULT_TITLE: &str = "cv-analyzer";
const DEFAULT_UPLOADS_DIR: &str = "./uploads";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Startup fails if the API key is missing or a value does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub openrouter_api_key: String,
    pub openrouter_api_url: String,
    pub openrouter_referer: String,
    pub openrouter_title: String,
    pub uploads_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    /// `None` means the upstream call waits for as long as the remote takes.
    pub upstream_timeout: Option<Duration>,
    /// Report analysis failures as 502 instead of wrapping them in a 200.
    pub strict_upstream_status: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_source<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            openrouter_api_key: lookup("OPENROUTER_API_KEY")
                .context("Required environment variable 'OPENROUTER_API_KEY' is not set")?,
            openrouter_api_url: get_or("OPENROUTER_API_URL", DEFAULT_API_URL),
            openrouter_referer: get_or("OPENROUTER_REFERER", DEFAULT_REFERER),
            openrouter_title: get_or("OPENROUTER_TITLE", DEFAULT_TITLE),
            uploads_dir: PathBuf::from(get_or("UPLOADS_DIR", DEFAULT_UPLOADS_DIR)),
            port: match lookup("PORT") {
                Some(raw) => raw.parse::<u16>().context("PORT must be a valid port number")?,
                None => DEFAULT_PORT,
            },
            rust_log: get_or("RUST_LOG", "info"),
            max_upload_bytes: match lookup("MAX_UPLOAD_BYTES") {
                Some(raw) => raw
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
            upstream_timeout: lookup("UPSTREAM_TIMEOUT_SECS")
                .map(|raw| {
                    raw.parse::<u64>()
                        .map(Duration::from_secs)
                        .context("UPSTREAM_TIMEOUT_SECS must be a whole number of seconds")
                })
                .transpose()?,
            strict_upstream_status: match lookup("STRICT_UPSTREAM_STATUS") {
                Some(raw) => parse_flag(&raw)
                    .context("STRICT_UPSTREAM_STATUS must be true or false")?,
                None => false,
            },
        })
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("unrecognised flag value '{other}'"),
    }
}
