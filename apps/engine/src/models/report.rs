//! Score report — the terminal output of a scoring run. Constructed once per
//! invocation, immutable after construction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::finding::Finding;

/// Fixed scoring categories. Each groups several criterion scorers under a
/// standard and a bonus point ceiling.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Keywords,
    Experience,
    Content,
    Structure,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Keywords,
        Category::Experience,
        Category::Content,
        Category::Structure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Keywords => "keywords",
            Category::Experience => "experience",
            Category::Content => "content",
            Category::Structure => "structure",
        }
    }
}

/// One criterion's sub-score with its human-readable rationale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionScore {
    pub criterion: String,
    pub category: Category,
    pub points: f64,
    pub max_points: f64,
    pub rationale: String,
}

/// Per-category totals. `raw_points` may exceed `max_points` up to
/// `bonus_max`; the grand total, not the category, is where the 100-point cap
/// applies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub raw_points: f64,
    pub max_points: f64,
    pub bonus_max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reliability {
    High,
    Medium,
    Low,
}

/// Interval around the overall score at 95% confidence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub low: f64,
    pub high: f64,
    pub margin: f64,
    pub reliability: Reliability,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Final score, capped to the 0-100 scale.
    pub overall_score: f64,
    /// Pre-cap sum of category raw points. May exceed 100.
    pub raw_total: f64,
    pub categories: BTreeMap<Category, CategoryBreakdown>,
    pub criteria: Vec<CriterionScore>,
    /// Findings ordered by descending severity.
    pub findings: Vec<Finding>,
    pub confidence: ConfidenceInterval,
    /// True when the embedding similarity step did not run (no oracle
    /// configured, or its circuit breaker is open).
    pub degraded_matching: bool,
    pub recommendation: String,
}

impl ScoreReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serializes_snake_case() {
        let json = serde_json::to_string(&Category::Keywords).unwrap();
        assert_eq!(json, "\"keywords\"");
    }

    #[test]
    fn test_breakdown_roundtrips() {
        let breakdown = CategoryBreakdown {
            raw_points: 32.5,
            max_points: 30.0,
            bonus_max: 35.0,
        };
        let json = serde_json::to_string(&breakdown).unwrap();
        let back: CategoryBreakdown = serde_json::from_str(&json).unwrap();
        assert!((back.raw_points - 32.5).abs() < f64::EPSILON);
    }
}
