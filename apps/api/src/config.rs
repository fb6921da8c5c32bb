use std::fmt::Display;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::matching::ranking::DEFAULT_TOP_K;

/// Sampling parameters shared by the local and hosted generators.
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    /// Upper bound on generated tokens.
    pub max_length: u32,
    pub temperature: f64,
    /// Seed applied before every local sampling run.
    pub seed: i64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_length: 300,
            temperature: 0.7,
            seed: 42,
        }
    }
}

/// Application configuration loaded from environment variables.
/// Every value has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub job_match_top_k: usize,
    pub generation: GenerationSettings,
    pub openai_base_url: String,
    pub openai_completion_model: String,
    pub hosted_request_timeout_secs: u64,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = GenerationSettings::default();

        let config = Config {
            port: env_or("PORT", 8000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            job_match_top_k: env_or("JOB_MATCH_TOP_K", DEFAULT_TOP_K)?,
            generation: GenerationSettings {
                max_length: env_or("GENERATION_MAX_LENGTH", defaults.max_length)?,
                temperature: env_or("GENERATION_TEMPERATURE", defaults.temperature)?,
                seed: env_or("GENERATION_SEED", defaults.seed)?,
            },
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            openai_completion_model: std::env::var("OPENAI_COMPLETION_MODEL")
                .unwrap_or_else(|_| "gpt-3.5-turbo-instruct".to_string()),
            hosted_request_timeout_secs: env_or("HOSTED_REQUEST_TIMEOUT_SECS", 120)?,
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", 5 * 1024 * 1024)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that parse but would make every request fail.
    pub fn validate(&self) -> Result<()> {
        if self.job_match_top_k == 0 {
            anyhow::bail!("Environment variable 'JOB_MATCH_TOP_K' must be at least 1");
        }
        Ok(())
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    parse_or(key, std::env::var(key).ok(), default)
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("Environment variable '{key}' has invalid value '{value}'")),
    }
}
