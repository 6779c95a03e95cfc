//! Readability criterion: achievement lines inside a readable length window.

use crate::errors::EngineError;
use crate::models::{Finding, Severity};
use crate::scoring::{CriterionId, CriterionOutcome, CriterionScorer, ScoreContext};

/// Readable window for an achievement line, in words. Shorter reads as a
/// fragment, longer as a paragraph.
const MIN_LINE_WORDS: usize = 6;
const MAX_LINE_WORDS: usize = 24;

pub struct ReadabilityScorer;

impl CriterionScorer for ReadabilityScorer {
    fn id(&self) -> CriterionId {
        CriterionId::Readability
    }

    fn score(&self, cx: &ScoreContext) -> Result<CriterionOutcome, EngineError> {
        let max_points = self.id().max_points();
        let lines = cx.facts.all_achievement_lines();
        if lines.is_empty() {
            return Ok(CriterionOutcome::new(
                self.id(),
                0.0,
                "No achievement lines to assess",
            ));
        }

        let word_counts: Vec<usize> = lines
            .iter()
            .map(|(_, line)| line.split_whitespace().count())
            .collect();
        let readable = word_counts
            .iter()
            .filter(|count| (MIN_LINE_WORDS..=MAX_LINE_WORDS).contains(*count))
            .count();
        let overlong = word_counts
            .iter()
            .filter(|count| **count > MAX_LINE_WORDS)
            .count();

        let fraction = readable as f64 / lines.len() as f64;
        let points = max_points * fraction;
        let rationale = format!(
            "{} of {} lines within the {}-{} word window",
            readable,
            lines.len(),
            MIN_LINE_WORDS,
            MAX_LINE_WORDS
        );

        let mut outcome = CriterionOutcome::new(self.id(), points, rationale);
        if overlong * 4 > lines.len() {
            outcome = outcome.with_finding(Finding::new(
                Severity::Suggestion,
                "content",
                "Several achievement lines run long; split them into focused bullets",
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

    fn with_lines(lines: &[&str]) -> ContextFixture {
        ContextFixture::default().facts(DocumentFacts {
            work_history: vec![WorkEntry {
                description: lines.join("\n"),
                ..Default::default()
            }],
            ..Default::default()
        })
    }

    #[test]
    fn test_well_sized_lines_score_full() {
        let fixture = with_lines(&[
            "Reduced deployment time by forty percent across three teams",
            "Led the migration of billing onto the new platform",
        ]);
        let outcome = fixture.run(|cx| ReadabilityScorer.score(cx)).unwrap();
        assert!((outcome.score.points - outcome.score.max_points).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fragments_score_partial() {
        let fixture = with_lines(&[
            "Did stuff",
            "Reduced deployment time by forty percent across three teams",
        ]);
        let outcome = fixture.run(|cx| ReadabilityScorer.score(cx)).unwrap();
        assert!((outcome.score.points - outcome.score.max_points / 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_overlong_lines_produce_suggestion() {
        let long_line = ["word"; 30].join(" ");
        let fixture = with_lines(&[&long_line, &long_line]);
        let outcome = fixture.run(|cx| ReadabilityScorer.score(cx)).unwrap();
        assert_eq!(outcome.score.points, 0.0);
        assert_eq!(outcome.findings.len(), 1);
    }
}
