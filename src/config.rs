// src/config.rs

use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub rust_log: String,
    /// API key for the OpenAI-compatible summary endpoint. When unset,
    /// AI analysis degrades to the fixed unavailable message.
    pub llm_api_key: Option<String>,
    /// Alternative API base, for self-hosted or proxied endpoints.
    pub llm_api_base: Option<String>,
    pub summary_model: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://lexmaturity.db?mode=rwc".to_string());

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let llm_api_key = env::var("LLM_API_KEY").ok();
        let llm_api_base = env::var("LLM_API_BASE").ok();
        let summary_model =
            env::var("SUMMARY_MODEL").unwrap_or_else(|_| "gpt-4.1-mini".to_string());

        Self {
            database_url,
            rust_log,
            llm_api_key,
            llm_api_base,
            summary_model,
        }
    }
}
