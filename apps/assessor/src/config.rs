use std::time::Duration;

use anyhow::{Context, Result};

use crate::evaluation::{EvaluatorConfig, ExtractorConfig, Instructions, InvocationStyle};
use crate::llm_client::{ClientSettings, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::models::criterion::ThresholdTable;

/// Runtime configuration loaded from environment variables (and `.env` if present).
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub model: String,
    pub max_tokens: Option<u32>,
    pub request_timeout_secs: u64,
    pub invocation_style: InvocationStyle,
    pub thresholds: ThresholdTable,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            optional(key)
                .with_context(|| format!("Required environment variable '{key}' is not set"))
        };

        let mut invocation_style = optional("ASSESSOR_INVOCATION_STYLE")
            .unwrap_or_else(|| "chat".to_string())
            .parse::<InvocationStyle>()
            .map_err(anyhow::Error::msg)
            .context("ASSESSOR_INVOCATION_STYLE must be 'chat' or 'prompt'")?;
        if let (InvocationStyle::Chat { system_prompt }, Some(custom)) = (
            &mut invocation_style,
            optional("ASSESSOR_SYSTEM_PROMPT"),
        ) {
            *system_prompt = Some(custom);
        }

        let thresholds = match optional("ASSESSOR_THRESHOLDS") {
            Some(value) => load_thresholds(&value)?,
            None => ThresholdTable::default(),
        };

        Ok(Config {
            openai_api_key: required("OPENAI_API_KEY")?,
            openai_base_url: optional("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: optional("ASSESSOR_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens: optional("ASSESSOR_MAX_TOKENS")
                .map(|v| v.trim().parse::<u32>())
                .transpose()
                .context("ASSESSOR_MAX_TOKENS must be a positive integer")?,
            request_timeout_secs: optional("ASSESSOR_TIMEOUT_SECS")
                .unwrap_or_else(|| "120".to_string())
                .trim()
                .parse::<u64>()
                .context("ASSESSOR_TIMEOUT_SECS must be a whole number of seconds")?,
            invocation_style,
            thresholds,
            rust_log: optional("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.openai_base_url.clone(),
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            timeout: Duration::from_secs(self.request_timeout_secs),
            ..ClientSettings::new(self.openai_api_key.clone())
        }
    }

    pub fn evaluator_config(&self) -> EvaluatorConfig {
        EvaluatorConfig {
            extractor: ExtractorConfig {
                instructions: Instructions::default(),
                style: self.invocation_style.clone(),
            },
            thresholds: self.thresholds.clone(),
        }
    }
}

/// `standard` / `lenient` select a built-in profile; anything else is read as
/// the path of a JSON threshold table.
pub fn load_thresholds(value: &str) -> Result<ThresholdTable> {
    if let Ok(table) = ThresholdTable::from_profile(value) {
        return Ok(table);
    }
    let json = std::fs::read_to_string(value)
        .with_context(|| format!("Failed to read threshold table '{value}'"))?;
    ThresholdTable::from_json(&json)
        .with_context(|| format!("Invalid threshold table in '{value}'"))
}
