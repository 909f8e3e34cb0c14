//! Criterion Extractor — one independent generative-text call per criterion.
//!
//! Calls run sequentially in the fixed criterion order. The first failure
//! aborts the extraction; later criteria are never queried and nothing
//! partial is returned.

use std::collections::BTreeMap;
use std::str::FromStr;

use tracing::{debug, info};

use crate::evaluation::prompts::{build_prompt, default_instruction};
use crate::llm_client::prompts::HELPFUL_ASSISTANT_SYSTEM;
use crate::llm_client::{Invocation, LlmError, TextGenerator};
use crate::models::criterion::Criterion;
use crate::models::report::ExtractedInfo;

/// Which call shape the extractor uses against the generative-text capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationStyle {
    /// Chat completion; the system message is sent first when present.
    Chat { system_prompt: Option<String> },
    /// Single-prompt completion.
    Prompt,
}

impl Default for InvocationStyle {
    fn default() -> Self {
        InvocationStyle::Chat {
            system_prompt: Some(HELPFUL_ASSISTANT_SYSTEM.to_string()),
        }
    }
}

impl FromStr for InvocationStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chat" => Ok(InvocationStyle::default()),
            "prompt" | "completion" => Ok(InvocationStyle::Prompt),
            other => Err(format!(
                "unknown invocation style '{other}' (expected 'chat' or 'prompt')"
            )),
        }
    }
}

impl InvocationStyle {
    fn invocation<'a>(&'a self, prompt: &'a str) -> Invocation<'a> {
        match self {
            InvocationStyle::Chat { system_prompt } => Invocation::Chat {
                system: system_prompt.as_deref(),
                user: prompt,
            },
            InvocationStyle::Prompt => Invocation::Prompt { prompt },
        }
    }
}

/// Criterion → instruction text. Always covers all eight criteria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instructions(BTreeMap<Criterion, String>);

impl Instructions {
    /// Replaces one criterion's instruction.
    pub fn with(mut self, criterion: Criterion, instruction: impl Into<String>) -> Self {
        self.0.insert(criterion, instruction.into());
        self
    }

    pub fn get(&self, criterion: Criterion) -> &str {
        &self.0[&criterion]
    }
}

impl Default for Instructions {
    fn default() -> Self {
        Self(
            Criterion::ALL
                .iter()
                .map(|&c| (c, default_instruction(c).to_string()))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractorConfig {
    pub instructions: Instructions,
    pub style: InvocationStyle,
}

/// Queries the generator once per criterion and records each trimmed response.
pub async fn extract(
    cv_text: &str,
    config: &ExtractorConfig,
    generator: &dyn TextGenerator,
) -> Result<ExtractedInfo, LlmError> {
    let mut extracted = BTreeMap::new();

    for criterion in Criterion::ALL {
        let prompt = build_prompt(config.instructions.get(criterion), cv_text);
        let invocation = config.style.invocation(&prompt);

        debug!("Querying criterion '{criterion}' ({} prompt chars)", prompt.len());
        let completion = generator.complete(&invocation).await?;
        let evidence = completion.trim().to_string();

        info!(
            "Extracted evidence for '{criterion}': {} chars",
            evidence.len()
        );
        extracted.insert(criterion, evidence);
    }

    Ok(ExtractedInfo::from_complete(extracted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::testing::{OwnedInvocation, ScriptedGenerator};

    #[test]
    fn test_invocation_style_from_str() {
        assert_eq!("chat".parse::<InvocationStyle>().unwrap(), InvocationStyle::default());
        assert_eq!("Prompt".parse::<InvocationStyle>().unwrap(), InvocationStyle::Prompt);
        assert_eq!("completion".parse::<InvocationStyle>().unwrap(), InvocationStyle::Prompt);
        assert!("batch".parse::<InvocationStyle>().is_err());
    }

    #[tokio::test]
    async fn test_extract_queries_every_criterion_in_order() {
        let generator = ScriptedGenerator::echo_criterion();
        let info = extract("Jane Doe", &ExtractorConfig::default(), &generator)
            .await
            .unwrap();

        assert_eq!(info.len(), 8);
        let calls = generator.calls();
        assert_eq!(calls.len(), 8);
        for (call, criterion) in calls.iter().zip(Criterion::ALL) {
            let expected_prompt = build_prompt(default_instruction(criterion), "Jane Doe");
            assert_eq!(
                call,
                &OwnedInvocation::Chat {
                    system: Some("You are a helpful assistant.".to_string()),
                    user: expected_prompt,
                }
            );
        }
        let keys: Vec<_> = info.iter().map(|(c, _)| c).collect();
        assert_eq!(keys, Criterion::ALL.to_vec());
    }

    #[tokio::test]
    async fn test_extract_trims_responses() {
        let generator = ScriptedGenerator::constant("\n  Award A\nAward B \n\n");
        let info = extract("cv", &ExtractorConfig::default(), &generator)
            .await
            .unwrap();
        assert_eq!(info.get(Criterion::Awards), "Award A\nAward B");
    }

    #[tokio::test]
    async fn test_extract_prompt_style_sends_bare_prompt() {
        let config = ExtractorConfig {
            style: InvocationStyle::Prompt,
            ..ExtractorConfig::default()
        };
        let generator = ScriptedGenerator::constant("none");
        extract("cv body", &config, &generator).await.unwrap();

        let calls = generator.calls();
        assert_eq!(
            calls[0],
            OwnedInvocation::Prompt {
                prompt: build_prompt(default_instruction(Criterion::Awards), "cv body"),
            }
        );
    }

    #[tokio::test]
    async fn test_extract_chat_without_system_prompt() {
        let config = ExtractorConfig {
            style: InvocationStyle::Chat {
                system_prompt: None,
            },
            ..ExtractorConfig::default()
        };
        let generator = ScriptedGenerator::constant("none");
        extract("cv", &config, &generator).await.unwrap();
        assert!(matches!(
            &generator.calls()[0],
            OwnedInvocation::Chat { system: None, .. }
        ));
    }

    #[tokio::test]
    async fn test_custom_instruction_is_used() {
        let config = ExtractorConfig {
            instructions: Instructions::default().with(Criterion::Judging, "List judging roles."),
            ..ExtractorConfig::default()
        };
        let generator = ScriptedGenerator::constant("none");
        extract("cv", &config, &generator).await.unwrap();

        let judging_call = &generator.calls()[3];
        match judging_call {
            OwnedInvocation::Chat { user, .. } => {
                assert_eq!(user, "List judging roles.\n\nCV:\ncv")
            }
            other => panic!("unexpected invocation {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failure_aborts_remaining_criteria() {
        let generator = ScriptedGenerator::constant("Award A").failing_on(3);
        let result = extract("cv", &ExtractorConfig::default(), &generator).await;

        assert!(matches!(result, Err(LlmError::Api { status: 500, .. })));
        assert_eq!(generator.calls().len(), 3);
    }
}
