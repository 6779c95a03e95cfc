//! Formatting-cleanliness criterion: layout artifacts that trip automated
//! résumé parsers. Each artifact carries an independent, additive deduction
//! from a fixed ceiling.

use crate::errors::EngineError;
use crate::models::{Finding, Severity};
use crate::scoring::{CriterionId, CriterionOutcome, CriterionScorer, ScoreContext};

const TABLE_DEDUCTION: f64 = 2.0;
const TEXT_BOX_DEDUCTION: f64 = 2.0;
const HEADER_FOOTER_DEDUCTION: f64 = 1.5;
const IMAGE_DEDUCTION: f64 = 2.0;
const FONT_DEDUCTION: f64 = 1.0;
const FONT_DEDUCTION_CAP: f64 = 2.0;
const MAX_PAGES: u32 = 2;
const PAGE_DEDUCTION: f64 = 1.0;

pub struct FormattingScorer;

impl CriterionScorer for FormattingScorer {
    fn id(&self) -> CriterionId {
        CriterionId::Formatting
    }

    fn score(&self, cx: &ScoreContext) -> Result<CriterionOutcome, EngineError> {
        let artifacts = &cx.facts.artifacts;
        let mut deduction = 0.0;
        let mut findings = Vec::new();

        if artifacts.has_tables {
            deduction += TABLE_DEDUCTION;
            findings.push(Finding::new(
                Severity::Warning,
                "structure",
                "Tables often scramble automated parsing; use plain text layout",
            ));
        }
        if artifacts.has_text_boxes {
            deduction += TEXT_BOX_DEDUCTION;
            findings.push(Finding::new(
                Severity::Warning,
                "structure",
                "Text boxes are frequently dropped by parsers",
            ));
        }
        if artifacts.has_headers_footers {
            deduction += HEADER_FOOTER_DEDUCTION;
            findings.push(Finding::new(
                Severity::Suggestion,
                "structure",
                "Content in headers or footers may be missed; move it into the body",
            ));
        }
        if artifacts.has_images {
            deduction += IMAGE_DEDUCTION;
            findings.push(Finding::new(
                Severity::Suggestion,
                "structure",
                "Embedded images are invisible to text extraction",
            ));
        }
        if cx.facts.page_count > MAX_PAGES {
            deduction += PAGE_DEDUCTION;
            findings.push(Finding::new(
                Severity::Suggestion,
                "structure",
                format!(
                    "Document runs {} pages; one or two reads best",
                    cx.facts.page_count
                ),
            ));
        }
        if !artifacts.non_standard_fonts.is_empty() {
            let font_deduction =
                (artifacts.non_standard_fonts.len() as f64 * FONT_DEDUCTION).min(FONT_DEDUCTION_CAP);
            deduction += font_deduction;
            findings.push(Finding::new(
                Severity::Info,
                "structure",
                format!(
                    "Non-standard fonts in use: {}",
                    artifacts.non_standard_fonts.join(", ")
                ),
            ));
        }

        let max_points = self.id().max_points();
        let points = (max_points - deduction).max(0.0);
        let rationale = if findings.is_empty() {
            "No problematic layout artifacts".to_string()
        } else {
            format!("{} layout artifact(s), {deduction:.1} points deducted", findings.len())
        };

        Ok(CriterionOutcome::new(self.id(), points, rationale).with_findings(findings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DocumentFacts, FormattingArtifacts};
    use crate::scoring::testing::ContextFixture;

    #[test]
    fn test_clean_document_scores_full() {
        let fixture = ContextFixture::default();
        let outcome = fixture.run(|cx| FormattingScorer.score(cx)).unwrap();
        assert!((outcome.score.points - outcome.score.max_points).abs() < f64::EPSILON);
    }

    #[test]
    fn test_deductions_are_additive() {
        let fixture = ContextFixture::default().facts(DocumentFacts {
            artifacts: FormattingArtifacts {
                has_tables: true,
                has_headers_footers: true,
                ..Default::default()
            },
            ..Default::default()
        });
        let outcome = fixture.run(|cx| FormattingScorer.score(cx)).unwrap();
        assert!((outcome.score.points - 2.5).abs() < f64::EPSILON);
        assert_eq!(outcome.findings.len(), 2);
    }

    #[test]
    fn test_font_deduction_is_capped() {
        let fixture = ContextFixture::default().facts(DocumentFacts {
            artifacts: FormattingArtifacts {
                non_standard_fonts: vec![
                    "Papyrus".to_string(),
                    "Comic Sans".to_string(),
                    "Zapfino".to_string(),
                ],
                ..Default::default()
            },
            ..Default::default()
        });
        let outcome = fixture.run(|cx| FormattingScorer.score(cx)).unwrap();
        assert!((outcome.score.points - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_score_floors_at_zero() {
        let fixture = ContextFixture::default().facts(DocumentFacts {
            artifacts: FormattingArtifacts {
                has_tables: true,
                has_text_boxes: true,
                has_headers_footers: true,
                has_images: true,
                non_standard_fonts: vec!["Papyrus".to_string()],
            },
            ..Default::default()
        });
        let outcome = fixture.run(|cx| FormattingScorer.score(cx)).unwrap();
        assert_eq!(outcome.score.points, 0.0);
    }
}
