//! Category aggregation. Two-phase reduction on purpose: category raw
//! totals are summed first (each bounded only by its generous bonus
//! ceiling), and the 100-point cap is applied to the grand total as the last
//! step. Capping per category instead would stop a standout category from
//! compensating for a merely adequate one.

use std::collections::BTreeMap;

use tracing::warn;

use crate::errors::EngineError;
use crate::models::report::{Category, CategoryBreakdown};
use crate::models::{CriterionScore, Finding, Severity};
use crate::reference::RoleProfile;
use crate::scoring::{CriterionId, CriterionOutcome};

pub const OVERALL_MAX: f64 = 100.0;

/// Standard and bonus point ceilings per category. Bonus ceilings are
/// deliberately above the standard ones; standard maxes sum to 100.
const CATEGORY_CEILINGS: &[(Category, f64, f64)] = &[
    (Category::Keywords, 30.0, 35.0),
    (Category::Experience, 25.0, 30.0),
    (Category::Content, 25.0, 30.0),
    (Category::Structure, 20.0, 25.0),
];

pub fn ceilings(category: Category) -> (f64, f64) {
    CATEGORY_CEILINGS
        .iter()
        .find(|(c, _, _)| *c == category)
        .map(|(_, standard, bonus)| (*standard, *bonus))
        .expect("every category has ceilings")
}

#[derive(Debug, Clone)]
pub struct Aggregate {
    pub overall_score: f64,
    pub raw_total: f64,
    pub categories: BTreeMap<Category, CategoryBreakdown>,
    pub criteria: Vec<CriterionScore>,
    /// All findings, ordered by descending severity.
    pub findings: Vec<Finding>,
    pub degraded_matching: bool,
}

/// Reduces scorer outcomes into the final aggregate. A failed scorer is
/// recorded as a zero sub-score plus a diagnostic finding; it never aborts
/// the other criteria.
pub fn aggregate(
    outcomes: Vec<(CriterionId, Result<CriterionOutcome, EngineError>)>,
    role: &RoleProfile,
) -> Aggregate {
    let mut criteria = Vec::new();
    let mut findings = Vec::new();
    let mut degraded_matching = false;
    let mut raw_by_category: BTreeMap<Category, f64> = BTreeMap::new();

    for (id, outcome) in outcomes {
        match outcome {
            Ok(outcome) => {
                *raw_by_category.entry(id.category()).or_default() += outcome.score.points;
                degraded_matching |= outcome.degraded_matching;
                criteria.push(outcome.score);
                findings.extend(outcome.findings);
            }
            Err(error) => {
                warn!("Criterion {} failed: {error}", id.as_str());
                criteria.push(CriterionScore {
                    criterion: id.as_str().to_string(),
                    category: id.category(),
                    points: 0.0,
                    max_points: id.max_points(),
                    rationale: "Criterion failed; scored zero".to_string(),
                });
                findings.push(Finding::new(
                    Severity::Warning,
                    "engine",
                    format!("Criterion '{}' failed and was scored zero: {error}", id.as_str()),
                ));
            }
        }
    }

    let mut categories = BTreeMap::new();
    let mut raw_total = 0.0;
    for (category, standard_max, bonus_max) in CATEGORY_CEILINGS {
        // Role profiles may re-weight a category; the ceilings scale with it
        // so the cap invariants hold under any override.
        let weight = role.weights.get(category).copied().unwrap_or(1.0).max(0.0);
        let standard_max = standard_max * weight;
        let bonus_max = bonus_max * weight;
        let raw = raw_by_category.get(category).copied().unwrap_or(0.0) * weight;
        let raw = raw.clamp(0.0, bonus_max);

        raw_total += raw;
        categories.insert(
            *category,
            CategoryBreakdown {
                raw_points: raw,
                max_points: standard_max,
                bonus_max,
            },
        );
    }

    findings.sort_by_key(|finding| finding.severity);

    Aggregate {
        overall_score: raw_total.clamp(0.0, OVERALL_MAX),
        raw_total,
        categories,
        criteria,
        findings,
        degraded_matching,
    }
}
