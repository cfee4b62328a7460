use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::llm_client::transport::DEFAULT_BASE_URL;
use crate::llm_client::{AiSettings, DEFAULT_MODEL};

/// Application configuration loaded from environment variables.
/// A missing API key is not an error: AI features simply report unavailable.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub ai_request_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_blank = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let timeout_secs = match non_blank("AI_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .context("AI_REQUEST_TIMEOUT_SECS must be a whole number of seconds")?,
            None => 30,
        };
        if timeout_secs == 0 {
            bail!("AI_REQUEST_TIMEOUT_SECS must be greater than zero");
        }

        Ok(Config {
            openai_api_key: non_blank("OPENAI_API_KEY").or_else(|| non_blank("VITE_OPENAI_API_KEY")),
            openai_model: non_blank("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            openai_base_url: non_blank("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            ai_request_timeout: Duration::from_secs(timeout_secs),
            port: non_blank("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// The credential and model handed to the completion client.
    pub fn ai_settings(&self) -> AiSettings {
        AiSettings::new(self.openai_api_key.clone(), self.openai_model.clone())
    }
}
