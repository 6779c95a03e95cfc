//! Verb-strength criterion: mean impact tier of leading verbs, scaled
//! linearly onto the point maximum.

use crate::analysis::verbs;
use crate::errors::EngineError;
use crate::models::{Finding, Severity};
use crate::scoring::{CriterionId, CriterionOutcome, CriterionScorer, ScoreContext};

/// Below this mean tier the document leans on weak verbs enough to warrant a
/// suggestion.
const WEAK_MEAN_TIER: f64 = 1.5;

pub struct VerbStrengthScorer;

impl CriterionScorer for VerbStrengthScorer {
    fn id(&self) -> CriterionId {
        CriterionId::VerbStrength
    }

    fn score(&self, cx: &ScoreContext) -> Result<CriterionOutcome, EngineError> {
        let max_points = self.id().max_points();
        let Some(mean) = verbs::document_mean_tier(cx.facts, &cx.reference.verb_tiers) else {
            return Ok(CriterionOutcome::new(
                self.id(),
                0.0,
                "No achievement lines to assess",
            ));
        };

        let points = verbs::tier_to_points(mean, max_points);
        let rationale = format!("Mean verb impact tier {mean:.1} of 4");

        let mut outcome = CriterionOutcome::new(self.id(), points, rationale);
        if mean < WEAK_MEAN_TIER {
            outcome = outcome.with_finding(Finding::new(
                Severity::Suggestion,
                "content",
                "Achievement lines open with weak verbs; lead with stronger action verbs",
            ));
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DocumentFacts, WorkEntry};
    use crate::scoring::testing::ContextFixture;

    fn with_description(description: &str) -> ContextFixture {
        ContextFixture::default().facts(DocumentFacts {
            work_history: vec![WorkEntry {
                description: description.to_string(),
                ..Default::default()
            }],
            ..Default::default()
        })
    }

    #[test]
    fn test_strong_verbs_score_high() {
        let fixture = with_description("- Spearheaded the migration\n- Architected the platform");
        let outcome = fixture.run(|cx| VerbStrengthScorer.score(cx)).unwrap();
        assert!((outcome.score.points - outcome.score.max_points).abs() < f64::EPSILON);
        assert!(outcome.findings.is_empty());
    }

    #[test]
    fn test_weak_verbs_score_low_with_suggestion() {
        let fixture = with_description("- Helped with releases\n- Assisted the support team");
        let outcome = fixture.run(|cx| VerbStrengthScorer.score(cx)).unwrap();
        assert_eq!(outcome.score.points, 0.0);
        assert_eq!(outcome.findings.len(), 1);
    }

    #[test]
    fn test_no_lines_is_zero_not_error() {
        let fixture = ContextFixture::default();
        let outcome = fixture.run(|cx| VerbStrengthScorer.score(cx)).unwrap();
        assert_eq!(outcome.score.points, 0.0);
        assert!(outcome.score.rationale.contains("No achievement lines"));
    }
}
