use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// A missing API credential is the only fatal startup condition.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub archive_dir: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            archive_dir: std::env::var("ARCHIVE_DIR").unwrap_or_else(|_| "archive".to_string()),
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
