pub mod criterion;
pub mod document;
pub mod report;

pub use criterion::{Criterion, Rating, ThresholdError, ThresholdTable, Thresholds};
pub use document::Document;
pub use report::{Assessment, CvReport, ExtractedInfo};
