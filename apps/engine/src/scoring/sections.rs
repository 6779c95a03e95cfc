//! Section-balance criterion: share of total word count per named section.
//! A bloated skills section reads as keyword stuffing; a thin experience
//! section reads as insufficient substance.

use crate::errors::EngineError;
use crate::models::{Finding, Location, Severity};
use crate::scoring::{CriterionId, CriterionOutcome, CriterionScorer, ScoreContext};

const MAX_SKILLS_SHARE: f64 = 0.30;
const MIN_EXPERIENCE_SHARE: f64 = 0.50;
const SHARE_DEDUCTION: f64 = 3.0;

fn is_skills_section(name: &str) -> bool {
    let name = name.to_lowercase();
    name.contains("skill") || name.contains("technolog") || name.contains("tools")
}

fn is_experience_section(name: &str) -> bool {
    let name = name.to_lowercase();
    name.contains("experience") || name.contains("employment") || name.contains("work history")
}

pub struct SectionBalanceScorer;

impl CriterionScorer for SectionBalanceScorer {
    fn id(&self) -> CriterionId {
        CriterionId::SectionBalance
    }

    fn score(&self, cx: &ScoreContext) -> Result<CriterionOutcome, EngineError> {
        let max_points = self.id().max_points();
        let total_words: usize = cx.facts.sections.iter().map(|s| s.word_count()).sum();
        if total_words == 0 {
            return Ok(CriterionOutcome::new(
                self.id(),
                0.0,
                "No section content to assess",
            ));
        }

        let skills_words: usize = cx
            .facts
            .sections
            .iter()
            .filter(|s| is_skills_section(&s.name))
            .map(|s| s.word_count())
            .sum();
        let experience_words: usize = cx
            .facts
            .sections
            .iter()
            .filter(|s| is_experience_section(&s.name))
            .map(|s| s.word_count())
            .sum();

        let skills_share = skills_words as f64 / total_words as f64;
        let experience_share = experience_words as f64 / total_words as f64;

        let mut points = max_points;
        let mut findings = Vec::new();

        if skills_share > MAX_SKILLS_SHARE {
            points -= SHARE_DEDUCTION;
            findings.push(
                Finding::new(
                    Severity::Warning,
                    "structure",
                    format!(
                        "Skills content is {:.0}% of the document; above {:.0}% reads as keyword stuffing",
                        skills_share * 100.0,
                        MAX_SKILLS_SHARE * 100.0
                    ),
                )
                .at(Location::section("skills")),
            );
        }

        if experience_share < MIN_EXPERIENCE_SHARE {
            points -= SHARE_DEDUCTION;
            findings.push(
                Finding::new(
                    Severity::Suggestion,
                    "structure",
                    format!(
                        "Experience content is {:.0}% of the document; under {:.0}% leaves little substance",
                        experience_share * 100.0,
                        MIN_EXPERIENCE_SHARE * 100.0
                    ),
                )
                .at(Location::section("experience")),
            );
        }

        let rationale = format!(
            "Experience {:.0}%, skills {:.0}% of {} words",
            experience_share * 100.0,
            skills_share * 100.0,
            total_words
        );

        Ok(CriterionOutcome::new(self.id(), points.max(0.0), rationale).with_findings(findings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DocumentFacts, Section};
    use crate::scoring::testing::ContextFixture;

    fn section(name: &str, words: usize) -> Section {
        Section {
            name: name.to_string(),
            text: vec!["word"; words].join(" "),
        }
    }

    #[test]
    fn test_balanced_document_scores_full() {
        let fixture = ContextFixture::default().facts(DocumentFacts {
            sections: vec![
                section("experience", 60),
                section("skills", 20),
                section("education", 20),
            ],
            ..Default::default()
        });
        let outcome = fixture.run(|cx| SectionBalanceScorer.score(cx)).unwrap();
        assert!((outcome.score.points - outcome.score.max_points).abs() < f64::EPSILON);
        assert!(outcome.findings.is_empty());
    }

    #[test]
    fn test_bloated_skills_section_penalized() {
        let fixture = ContextFixture::default().facts(DocumentFacts {
            sections: vec![section("experience", 55), section("skills", 45)],
            ..Default::default()
        });
        let outcome = fixture.run(|cx| SectionBalanceScorer.score(cx)).unwrap();
        assert!(outcome.score.points < outcome.score.max_points);
        assert!(outcome
            .findings
            .iter()
            .any(|f| f.message.contains("keyword stuffing")));
    }

    #[test]
    fn test_thin_experience_section_penalized() {
        let fixture = ContextFixture::default().facts(DocumentFacts {
            sections: vec![
                section("experience", 20),
                section("education", 55),
                section("skills", 25),
            ],
            ..Default::default()
        });
        let outcome = fixture.run(|cx| SectionBalanceScorer.score(cx)).unwrap();
        assert!(outcome
            .findings
            .iter()
            .any(|f| f.message.contains("Experience content")));
    }

    #[test]
    fn test_empty_document_scores_minimum_without_error() {
        let fixture = ContextFixture::default();
        let outcome = fixture.run(|cx| SectionBalanceScorer.score(cx)).unwrap();
        assert_eq!(outcome.score.points, 0.0);
    }
}
