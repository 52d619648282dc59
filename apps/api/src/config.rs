use std::time::Duration;

use anyhow::{bail, Context, Result};

pub const DEFAULT_LLM_API_URL: &str = "https://api.deepseek.com/chat/completions";
pub const DEFAULT_LLM_MODEL: &str = "deepseek-chat";
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 8;
const DEFAULT_MAX_CANDIDATES: usize = 50;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub search: SearchConfig,
    pub port: u16,
    pub rust_log: String,
}

/// Everything the candidate ranker needs to reach its scoring backend.
/// Passed explicitly into `Ranker` so test and production setups can coexist.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub model: String,
    /// Upper bound on the primary scoring path. A hung backend degrades to fallback scoring.
    pub timeout: Duration,
    /// Candidates beyond this count are not sent to the backend.
    pub max_candidates_per_call: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_LLM_API_URL.to_string(),
            api_key: None,
            model: DEFAULT_LLM_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS),
            max_candidates_per_call: DEFAULT_MAX_CANDIDATES,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            search: SearchConfig::from_env()?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl SearchConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = SearchConfig::default();
        let lookup = |key: &str| {
            get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = lookup("LLM_API_KEY").or_else(|| lookup("DEEPSEEK_API_KEY"));

        let timeout_secs = parse_positive(
            "LLM_TIMEOUT_SECS",
            lookup("LLM_TIMEOUT_SECS"),
            DEFAULT_LLM_TIMEOUT_SECS as usize,
        )?;
        let max_candidates_per_call = parse_positive(
            "RANK_MAX_CANDIDATES",
            lookup("RANK_MAX_CANDIDATES"),
            DEFAULT_MAX_CANDIDATES,
        )?;

        Ok(SearchConfig {
            api_url: lookup("LLM_API_URL").unwrap_or(defaults.api_url),
            api_key,
            model: lookup("LLM_MODEL").unwrap_or(defaults.model),
            timeout: Duration::from_secs(timeout_secs as u64),
            max_candidates_per_call,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_positive(key: &str, raw: Option<String>, default: usize) -> Result<usize> {
    let value = match raw {
        Some(raw) => raw
            .parse::<usize>()
            .with_context(|| format!("{key} must be a positive integer"))?,
        None => default,
    };
    if value == 0 {
        bail!("{key} must be greater than zero");
    }
    Ok(value)
}
