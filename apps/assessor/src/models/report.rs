//! Per-run outputs: extracted evidence, ratings, and the combined report.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::criterion::{Criterion, Rating};

/// Trimmed model response per criterion, iterating in fixed criterion order.
///
/// Only the extractor builds one, after every criterion has a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedInfo(BTreeMap<Criterion, String>);

impl ExtractedInfo {
    pub(crate) fn from_complete(entries: BTreeMap<Criterion, String>) -> Self {
        debug_assert_eq!(entries.len(), Criterion::ALL.len());
        Self(entries)
    }

    pub fn get(&self, criterion: Criterion) -> &str {
        &self.0[&criterion]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Criterion, &str)> {
        self.0.iter().map(|(c, text)| (*c, text.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Rating per criterion, iterating in fixed criterion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assessment(BTreeMap<Criterion, Rating>);

impl Assessment {
    pub(crate) fn from_complete(entries: BTreeMap<Criterion, Rating>) -> Self {
        debug_assert_eq!(entries.len(), Criterion::ALL.len());
        Self(entries)
    }

    pub fn get(&self, criterion: Criterion) -> Rating {
        self.0[&criterion]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Criterion, Rating)> + '_ {
        self.0.iter().map(|(c, r)| (*c, *r))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Full output of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CvReport {
    pub extracted_info: ExtractedInfo,
    pub assessment: Assessment,
}
