//! Qualification Assessor: newline-segment count mapped through per-criterion thresholds.
//!
//! The count is a literal `split('\n')`: an empty response is one segment and
//! a trailing newline contributes an extra empty segment.

use tracing::debug;

use crate::models::criterion::ThresholdTable;
use crate::models::report::{Assessment, ExtractedInfo};

pub fn count_segments(text: &str) -> usize {
    text.split('\n').count()
}

pub fn assess(extracted: &ExtractedInfo, thresholds: &ThresholdTable) -> Assessment {
    let ratings = extracted
        .iter()
        .map(|(criterion, text)| {
            let count = count_segments(text);
            let rating = thresholds.get(criterion).rate(count);
            debug!("'{criterion}': {count} segment(s) -> {rating}");
            (criterion, rating)
        })
        .collect();

    Assessment::from_complete(ratings)
}
