//! The eight fixed petition criteria and their static configuration records.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// One of the eight petition evaluation categories.
///
/// Declaration order is the fixed evaluation order; `Ord` follows it so every
/// criterion-keyed map iterates deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Criterion {
    Awards,
    Membership,
    Press,
    Judging,
    OriginalContribution,
    ScholarlyArticles,
    CriticalEmployment,
    HighRemuneration,
}

impl Criterion {
    pub const ALL: [Criterion; 8] = [
        Criterion::Awards,
        Criterion::Membership,
        Criterion::Press,
        Criterion::Judging,
        Criterion::OriginalContribution,
        Criterion::ScholarlyArticles,
        Criterion::CriticalEmployment,
        Criterion::HighRemuneration,
    ];

    /// Display name, also used as the key in serialized reports and threshold files.
    pub fn name(self) -> &'static str {
        match self {
            Criterion::Awards => "Awards",
            Criterion::Membership => "Membership",
            Criterion::Press => "Press",
            Criterion::Judging => "Judging",
            Criterion::OriginalContribution => "Original contribution",
            Criterion::ScholarlyArticles => "Scholarly articles",
            Criterion::CriticalEmployment => "Critical employment",
            Criterion::HighRemuneration => "High remuneration",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Criterion {
    type Err = ThresholdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Criterion::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| ThresholdError::UnknownCriterion(s.to_string()))
    }
}

impl Serialize for Criterion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Criterion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Ordinal qualification label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Low,
    Medium,
    High,
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Rating::Low => "low",
            Rating::Medium => "medium",
            Rating::High => "high",
        })
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ThresholdError {
    #[error("Unknown criterion '{0}'")]
    UnknownCriterion(String),

    #[error("Threshold table is missing criterion '{0}'")]
    MissingCriterion(Criterion),

    #[error("Thresholds for '{criterion}' must satisfy low <= medium <= high (got {low}/{medium}/{high})")]
    NotAscending {
        criterion: Criterion,
        low: u32,
        medium: u32,
        high: u32,
    },

    #[error("Unknown threshold profile '{0}'")]
    UnknownProfile(String),

    #[error("Threshold file is not valid JSON: {0}")]
    Parse(String),
}

/// Segment-count cut-points for one criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Carried for configuration fidelity; the step function never consults it.
    pub low: u32,
    pub medium: u32,
    pub high: u32,
}

impl Thresholds {
    pub const fn new(low: u32, medium: u32, high: u32) -> Self {
        Self { low, medium, high }
    }

    /// Step function: `high` is checked first, both comparisons are inclusive.
    pub fn rate(&self, count: usize) -> Rating {
        let count = count as u64;
        if count >= u64::from(self.high) {
            Rating::High
        } else if count >= u64::from(self.medium) {
            Rating::Medium
        } else {
            Rating::Low
        }
    }

    fn validate(&self, criterion: Criterion) -> Result<(), ThresholdError> {
        if self.low <= self.medium && self.medium <= self.high {
            Ok(())
        } else {
            Err(ThresholdError::NotAscending {
                criterion,
                low: self.low,
                medium: self.medium,
                high: self.high,
            })
        }
    }
}

/// Criterion → thresholds, always covering all eight criteria.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThresholdTable(BTreeMap<Criterion, Thresholds>);

impl ThresholdTable {
    /// {low: 1, medium: 2, high: 3} for every criterion.
    pub fn standard() -> Self {
        Self::uniform(Thresholds::new(1, 2, 3))
    }

    /// {low: 0, medium: 1, high: 2} for every criterion.
    pub fn lenient() -> Self {
        Self::uniform(Thresholds::new(0, 1, 2))
    }

    pub fn uniform(thresholds: Thresholds) -> Self {
        Self(Criterion::ALL.iter().map(|&c| (c, thresholds)).collect())
    }

    pub fn from_profile(name: &str) -> Result<Self, ThresholdError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::standard()),
            "lenient" => Ok(Self::lenient()),
            other => Err(ThresholdError::UnknownProfile(other.to_string())),
        }
    }

    /// Builds a table from explicit entries; every criterion must appear exactly
    /// once with ascending cut-points.
    pub fn new(entries: BTreeMap<Criterion, Thresholds>) -> Result<Self, ThresholdError> {
        for criterion in Criterion::ALL {
            let thresholds = entries
                .get(&criterion)
                .ok_or(ThresholdError::MissingCriterion(criterion))?;
            thresholds.validate(criterion)?;
        }
        Ok(Self(entries))
    }

    /// Parses `{"Awards": {"low": 1, "medium": 2, "high": 3}, ...}`.
    pub fn from_json(json: &str) -> Result<Self, ThresholdError> {
        let raw: BTreeMap<String, Thresholds> =
            serde_json::from_str(json).map_err(|e| ThresholdError::Parse(e.to_string()))?;
        let entries = raw
            .into_iter()
            .map(|(name, t)| name.parse::<Criterion>().map(|c| (c, t)))
            .collect::<Result<BTreeMap<_, _>, _>>()?;
        Self::new(entries)
    }

    pub fn get(&self, criterion: Criterion) -> Thresholds {
        // Construction guarantees all eight keys.
        self.0[&criterion]
    }
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_criteria_in_fixed_order() {
        let names: Vec<_> = Criterion::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            vec![
                "Awards",
                "Membership",
                "Press",
                "Judging",
                "Original contribution",
                "Scholarly articles",
                "Critical employment",
                "High remuneration",
            ]
        );
        let mut sorted = Criterion::ALL;
        sorted.sort();
        assert_eq!(sorted, Criterion::ALL);
    }

    #[test]
    fn test_criterion_serde_uses_display_name() {
        let json = serde_json::to_string(&Criterion::OriginalContribution).unwrap();
        assert_eq!(json, r#""Original contribution""#);
        let back: Criterion = serde_json::from_str(r#""High remuneration""#).unwrap();
        assert_eq!(back, Criterion::HighRemuneration);
        assert!(serde_json::from_str::<Criterion>(r#""Patents""#).is_err());
    }

    #[test]
    fn test_rating_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Rating::Medium).unwrap(), r#""medium""#);
        assert_eq!(Rating::High.to_string(), "high");
    }

    #[test]
    fn test_rate_boundaries_are_inclusive() {
        let t = Thresholds::new(1, 2, 3);
        assert_eq!(t.rate(0), Rating::Low);
        assert_eq!(t.rate(1), Rating::Low);
        assert_eq!(t.rate(2), Rating::Medium);
        assert_eq!(t.rate(3), Rating::High);
        assert_eq!(t.rate(40), Rating::High);
    }

    #[test]
    fn test_lenient_profile_shifts_boundaries() {
        let t = ThresholdTable::lenient().get(Criterion::Press);
        assert_eq!(t.rate(0), Rating::Low);
        assert_eq!(t.rate(1), Rating::Medium);
        assert_eq!(t.rate(2), Rating::High);
    }

    #[test]
    fn test_from_profile() {
        assert_eq!(ThresholdTable::from_profile("Standard").unwrap(), ThresholdTable::standard());
        assert_eq!(ThresholdTable::from_profile("lenient").unwrap(), ThresholdTable::lenient());
        assert_eq!(
            ThresholdTable::from_profile("strict"),
            Err(ThresholdError::UnknownProfile("strict".to_string()))
        );
    }

    #[test]
    fn test_from_json_accepts_full_table() {
        let json = serde_json::to_string(&ThresholdTable::lenient()).unwrap();
        let table = ThresholdTable::from_json(&json).unwrap();
        assert_eq!(table, ThresholdTable::lenient());
    }

    #[test]
    fn test_from_json_rejects_missing_criterion() {
        let json = r#"{"Awards": {"low": 1, "medium": 2, "high": 3}}"#;
        assert_eq!(
            ThresholdTable::from_json(json),
            Err(ThresholdError::MissingCriterion(Criterion::Membership))
        );
    }

    #[test]
    fn test_from_json_rejects_unknown_criterion() {
        let mut map: BTreeMap<String, Thresholds> = Criterion::ALL
            .iter()
            .map(|c| (c.name().to_string(), Thresholds::new(1, 2, 3)))
            .collect();
        map.insert("Patents".to_string(), Thresholds::new(1, 2, 3));
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(
            ThresholdTable::from_json(&json),
            Err(ThresholdError::UnknownCriterion("Patents".to_string()))
        );
    }

    #[test]
    fn test_new_rejects_descending_cut_points() {
        let mut entries: BTreeMap<_, _> =
            Criterion::ALL.iter().map(|&c| (c, Thresholds::new(1, 2, 3))).collect();
        entries.insert(Criterion::Judging, Thresholds::new(1, 4, 3));
        assert!(matches!(
            ThresholdTable::new(entries),
            Err(ThresholdError::NotAscending { criterion: Criterion::Judging, .. })
        ));
    }
}
