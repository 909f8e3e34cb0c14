//! Assessor — extracts evidence for the eight petition criteria from a CV via
//! a generative-text model and rates each criterion low / medium / high.
//!
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! use std::sync::Arc;
//! use assessor::{Config, Document, Evaluator, LlmClient};
//!
//! let config = Config::from_env()?;
//! assessor::telemetry::init_tracing(&config.rust_log);
//! let client = LlmClient::new(config.client_settings())?;
//! let evaluator = Evaluator::new(Arc::new(client), config.evaluator_config());
//! let report = evaluator.process_cv(&Document::text("Jane Doe ...")).await?;
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod errors;
pub mod evaluation;
pub mod ingest;
pub mod llm_client;
pub mod models;
pub mod telemetry;

pub use config::Config;
pub use errors::{DecodeError, PipelineError};
pub use evaluation::{Evaluator, EvaluatorConfig, ExtractorConfig, Instructions, InvocationStyle};
pub use ingest::normalize;
pub use llm_client::{ClientSettings, Invocation, LlmClient, LlmError, TextGenerator};
pub use models::{
    Assessment, Criterion, CvReport, Document, ExtractedInfo, Rating, ThresholdTable, Thresholds,
};
