use anyhow::{Context, Result};

use crate::errors::AppError;

const DEFAULT_ASSISTANT_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
const DEFAULT_ASSISTANT_MODEL: &str = "openai/gpt-4";
const DEFAULT_ASSISTANT_REFERER: &str = "https://your-app-name.streamlit.app";
const DEFAULT_ASSISTANT_TITLE: &str = "Resume Scoring App";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Environment variable holding the assistant API key.
/// Read on every question, never at startup.
pub const API_KEY_VAR: &str = "OPENROUTER_API_KEY";

/// Application configuration loaded from environment variables.
/// Everything has a default; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub assistant_api_url: String,
    pub assistant_model: String,
    pub assistant_referer: String,
    pub assistant_title: String,
    /// Body limit for uploads. Belongs to the hosting layer, not the scoring core.
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            assistant_api_url: env_or("ASSISTANT_API_URL", DEFAULT_ASSISTANT_API_URL),
            assistant_model: env_or("ASSISTANT_MODEL", DEFAULT_ASSISTANT_MODEL),
            assistant_referer: env_or("ASSISTANT_REFERER", DEFAULT_ASSISTANT_REFERER),
            assistant_title: env_or("ASSISTANT_TITLE", DEFAULT_ASSISTANT_TITLE),
            max_upload_bytes: match std::env::var("MAX_UPLOAD_BYTES") {
                Ok(raw) => parse_upload_limit(&raw)?,
                Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
            },
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            assistant_api_url: DEFAULT_ASSISTANT_API_URL.to_string(),
            assistant_model: DEFAULT_ASSISTANT_MODEL.to_string(),
            assistant_referer: DEFAULT_ASSISTANT_REFERER.to_string(),
            assistant_title: DEFAULT_ASSISTANT_TITLE.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Source of the assistant credential. Queried once per question; the
/// value is never cached by the caller.
pub trait SecretSource: Send + Sync {
    fn api_key(&self) -> Result<String, AppError>;
}

/// Reads the key from the process environment at call time.
pub struct EnvSecrets;

impl SecretSource for EnvSecrets {
    fn api_key(&self) -> Result<String, AppError> {
        non_blank(std::env::var(API_KEY_VAR).ok())
    }
}

/// A blank value counts as missing.
fn non_blank(value: Option<String>) -> Result<String, AppError> {
    value
        .filter(|key| !key.trim().is_empty())
        .ok_or(AppError::MissingCredential)
}

fn parse_upload_limit(raw: &str) -> Result<usize> {
    let limit = raw
        .trim()
        .parse::<usize>()
        .context("MAX_UPLOAD_BYTES must be a positive integer")?;
    anyhow::ensure!(limit > 0, "MAX_UPLOAD_BYTES must be a positive integer");
    Ok(limit)
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
