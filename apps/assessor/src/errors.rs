use std::string::FromUtf8Error;

use thiserror::Error;

use crate::llm_client::LlmError;

/// The document could not be turned into plain text.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Document is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),

    #[error("Failed to parse PDF: {0}")]
    Pdf(String),
}

/// Pipeline-level error. Nothing is caught or retried at this level; the first
/// failure ends the run and no partial output is produced.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Upstream error: {0}")]
    Upstream(#[from] LlmError),
}

impl PipelineError {
    pub fn is_decode(&self) -> bool {
        matches!(self, PipelineError::Decode(_))
    }

    pub fn is_upstream(&self) -> bool {
        matches!(self, PipelineError::Upstream(_))
    }
}
