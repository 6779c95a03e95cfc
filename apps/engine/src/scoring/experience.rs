//! Experience-backed criteria: alignment against the target level band, and
//! career stability (the red-flag penalty ledger).

use crate::analysis::{experience, red_flags};
use crate::errors::EngineError;
use crate::models::{Finding, Severity};
use crate::scoring::{CriterionId, CriterionOutcome, CriterionScorer, ScoreContext};

pub struct ExperienceAlignmentScorer;

impl CriterionScorer for ExperienceAlignmentScorer {
    fn id(&self) -> CriterionId {
        CriterionId::ExperienceAlignment
    }

    fn score(&self, cx: &ScoreContext) -> Result<CriterionOutcome, EngineError> {
        let estimate = experience::estimate(cx.facts, cx.as_of);
        let fit = experience::classify(estimate.years, cx.level);
        let points = self.id().max_points() * fit.ratio;

        let rationale = format!(
            "{:.1} years of experience against a {:.0}-{:.0} year band ({:.0}% credit)",
            estimate.years,
            cx.level.min_years,
            cx.level.max_years,
            fit.ratio * 100.0
        );

        let mut outcome = CriterionOutcome::new(self.id(), points, rationale)
            .with_findings(estimate.findings);
        if !fit.meets_level {
            outcome = outcome.with_finding(Finding::new(
                Severity::Warning,
                "experience",
                format!(
                    "{:.1} years falls short of the {:.0}-{:.0} year target range",
                    estimate.years, cx.level.min_years, cx.level.max_years
                ),
            ));
        }
        Ok(outcome)
    }
}

pub struct CareerStabilityScorer;

impl CriterionScorer for CareerStabilityScorer {
    fn id(&self) -> CriterionId {
        CriterionId::CareerStability
    }

    fn score(&self, cx: &ScoreContext) -> Result<CriterionOutcome, EngineError> {
        let report = red_flags::detect(cx.facts, cx.as_of);
        let max_points = self.id().max_points();
        let points = (max_points - report.penalty).max(0.0);

        let rationale = if report.findings.is_empty() {
            "No stability concerns detected".to_string()
        } else {
            format!(
                "{} concern(s) detected, {:.1} penalty points",
                report.findings.len(),
                report.penalty
            )
        };

        Ok(CriterionOutcome::new(self.id(), points, rationale).with_findings(report.findings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DocumentFacts, Section, WorkEntry};
    use crate::scoring::testing::ContextFixture;

    fn entry(start: &str, end: &str) -> WorkEntry {
        WorkEntry {
            start: Some(start.to_string()),
            end: Some(end.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_stated_years_alone_earn_full_credit() {
        // No structured entries; the free-text mention drives the estimate.
        let fixture = ContextFixture::default().facts(DocumentFacts {
            sections: vec![Section {
                name: "summary".to_string(),
                text: "5 years of Python development".to_string(),
            }],
            ..Default::default()
        });
        let outcome = fixture
            .run(|cx| ExperienceAlignmentScorer.score(cx))
            .unwrap();
        assert!((outcome.score.points - outcome.score.max_points).abs() < f64::EPSILON);
    }

    #[test]
    fn test_no_experience_at_all_scores_graduated_minimum() {
        let fixture = ContextFixture::default();
        let outcome = fixture
            .run(|cx| ExperienceAlignmentScorer.score(cx))
            .unwrap();
        // 0 years against [2,6]: a 2-year deficit lands in the 60% tier
        assert!((outcome.score.points - 9.0).abs() < f64::EPSILON);
        assert!(outcome
            .findings
            .iter()
            .any(|f| f.severity == Severity::Warning));
    }

    #[test]
    fn test_stability_starts_at_max_with_clean_history() {
        let fixture = ContextFixture::default().facts(DocumentFacts {
            work_history: vec![entry("Jan 2018", "Jan 2021"), entry("Jan 2021", "Jan 2024")],
            ..Default::default()
        });
        let outcome = fixture.run(|cx| CareerStabilityScorer.score(cx)).unwrap();
        assert!((outcome.score.points - outcome.score.max_points).abs() < f64::EPSILON);
        assert!(outcome.findings.is_empty());
    }

    #[test]
    fn test_stability_deducts_for_gap() {
        let fixture = ContextFixture::default().facts(DocumentFacts {
            work_history: vec![entry("Jan 2018", "Jan 2020"), entry("Jun 2021", "Jan 2024")],
            ..Default::default()
        });
        let outcome = fixture.run(|cx| CareerStabilityScorer.score(cx)).unwrap();
        assert!(outcome.score.points < outcome.score.max_points);
        assert!(!outcome.findings.is_empty());
    }
}
