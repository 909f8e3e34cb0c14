//! CV evaluation pipeline: normalize → extract → assess.
//!
//! `Evaluator` holds the generative-text backend as an `Arc<dyn TextGenerator>`
//! so the HTTP client can be swapped for any other implementation.

pub mod assessor;
pub mod extractor;
pub mod prompts;

use std::sync::Arc;

use tracing::info;

use crate::errors::PipelineError;
use crate::ingest::normalize;
use crate::llm_client::TextGenerator;
use crate::models::criterion::ThresholdTable;
use crate::models::document::Document;
use crate::models::report::{Assessment, CvReport};

pub use assessor::{assess, count_segments};
pub use extractor::{extract, ExtractorConfig, Instructions, InvocationStyle};

/// Static configuration for one evaluator, fixed at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluatorConfig {
    pub extractor: ExtractorConfig,
    pub thresholds: ThresholdTable,
}

#[derive(Clone)]
pub struct Evaluator {
    generator: Arc<dyn TextGenerator>,
    config: EvaluatorConfig,
}

impl Evaluator {
    pub fn new(generator: Arc<dyn TextGenerator>, config: EvaluatorConfig) -> Self {
        Self { generator, config }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Runs the full pipeline and returns both the extracted evidence and the ratings.
    pub async fn process_cv(&self, document: &Document) -> Result<CvReport, PipelineError> {
        let text = normalize(document)?;
        info!("Normalized CV: {} chars", text.chars().count());

        let extracted_info =
            extract(&text, &self.config.extractor, self.generator.as_ref()).await?;
        let assessment = assess(&extracted_info, &self.config.thresholds);

        Ok(CvReport {
            extracted_info,
            assessment,
        })
    }

    /// Runs the full pipeline and keeps only the ratings.
    pub async fn assess_cv(&self, document: &Document) -> Result<Assessment, PipelineError> {
        Ok(self.process_cv(document).await?.assessment)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::llm_client::{Invocation, LlmError, TextGenerator};

    /// Owned copy of an `Invocation`, for asserting on what was sent.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum OwnedInvocation {
        Chat { system: Option<String>, user: String },
        Prompt { prompt: String },
    }

    impl OwnedInvocation {
        pub fn prompt_text(&self) -> &str {
            match self {
                OwnedInvocation::Chat { user, .. } => user,
                OwnedInvocation::Prompt { prompt } => prompt,
            }
        }
    }

    type Responder = Box<dyn Fn(&str) -> String + Send + Sync>;

    /// In-memory generator: answers every call through `respond`, optionally
    /// failing on the n-th call (1-based).
    pub struct ScriptedGenerator {
        respond: Responder,
        fail_on: Option<usize>,
        calls: Mutex<Vec<OwnedInvocation>>,
    }

    impl ScriptedGenerator {
        pub fn new(respond: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
            Self {
                respond: Box::new(respond),
                fail_on: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn constant(response: &str) -> Self {
            let response = response.to_string();
            Self::new(move |_| response.clone())
        }

        /// Responds with the first line of the prompt, i.e. the instruction.
        pub fn echo_criterion() -> Self {
            Self::new(|prompt| prompt.lines().next().unwrap_or_default().to_string())
        }

        pub fn failing_on(mut self, call: usize) -> Self {
            self.fail_on = Some(call);
            self
        }

        pub fn calls(&self) -> Vec<OwnedInvocation> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn complete(&self, invocation: &Invocation<'_>) -> Result<String, LlmError> {
            let owned = match *invocation {
                Invocation::Chat { system, user } => OwnedInvocation::Chat {
                    system: system.map(str::to_string),
                    user: user.to_string(),
                },
                Invocation::Prompt { prompt } => OwnedInvocation::Prompt {
                    prompt: prompt.to_string(),
                },
            };
            let prompt = owned.prompt_text().to_string();
            let call_number = {
                let mut calls = self.calls.lock().unwrap();
                calls.push(owned);
                calls.len()
            };

            if self.fail_on == Some(call_number) {
                return Err(LlmError::Api {
                    status: 500,
                    message: "scripted failure".to_string(),
                });
            }
            Ok((self.respond)(&prompt))
        }
    }
}
