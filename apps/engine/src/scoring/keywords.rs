//! Required/preferred keyword criteria. Points are distributed evenly across
//! the target list (max / target count per match) rather than through tiered
//! cutoffs, which produces smoother, more differentiating scores.

use crate::errors::EngineError;
use crate::models::{Finding, Severity};
use crate::scoring::{CriterionId, CriterionOutcome, CriterionScorer, ScoreContext};

/// Preferred-keyword coverage at or above this fraction earns a small bonus
/// on top of the nominal max.
const PREFERRED_BONUS_COVERAGE: f64 = 0.8;
const PREFERRED_BONUS_POINTS: f64 = 2.0;

fn keyword_points(
    id: CriterionId,
    targets: &[String],
    cx: &ScoreContext,
    missing_severity: Severity,
) -> CriterionOutcome {
    let max_points = id.max_points();
    if targets.is_empty() {
        return CriterionOutcome::new(
            id,
            max_points,
            "No keywords configured for this role; nothing to miss",
        );
    }

    let text = cx.facts.full_text();
    let outcome = cx.matcher.find_matches(targets, &text);
    let coverage = outcome.count as f64 / targets.len() as f64;
    let points = max_points * coverage;

    let missing = outcome.missing(targets);
    let rationale = if missing.is_empty() {
        format!("All {} keywords present", targets.len())
    } else {
        format!(
            "Matched {} of {} keywords; missing: {}",
            outcome.count,
            targets.len(),
            missing.join(", ")
        )
    };

    let mut result = CriterionOutcome::new(id, points, rationale).degraded(outcome.degraded);
    if !missing.is_empty() {
        result = result.with_finding(Finding::new(
            missing_severity,
            "keywords",
            format!("Keywords not found: {}", missing.join(", ")),
        ));
    }
    result
}

pub struct RequiredKeywordsScorer;

impl CriterionScorer for RequiredKeywordsScorer {
    fn id(&self) -> CriterionId {
        CriterionId::RequiredKeywords
    }

    fn score(&self, cx: &ScoreContext) -> Result<CriterionOutcome, EngineError> {
        Ok(keyword_points(
            self.id(),
            &cx.role.required,
            cx,
            Severity::Warning,
        ))
    }
}

pub struct PreferredKeywordsScorer;

impl CriterionScorer for PreferredKeywordsScorer {
    fn id(&self) -> CriterionId {
        CriterionId::PreferredKeywords
    }

    fn score(&self, cx: &ScoreContext) -> Result<CriterionOutcome, EngineError> {
        let mut outcome = keyword_points(self.id(), &cx.role.preferred, cx, Severity::Suggestion);

        // Broad preferred coverage is extra credit beyond the nominal max;
        // the category's bonus ceiling bounds it.
        if !cx.role.preferred.is_empty() {
            let coverage = outcome.score.points / outcome.score.max_points;
            if coverage >= PREFERRED_BONUS_COVERAGE {
                outcome.score.points += PREFERRED_BONUS_POINTS;
                outcome.score.rationale.push_str(" (breadth bonus)");
            }
        }
        Ok(outcome)
    }
}
