// Document ingestion: turns uploaded CVs into the plain text the extractor prompts with.

pub mod normalizer;

pub use normalizer::{normalize, normalize_content};
