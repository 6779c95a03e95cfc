//! Grammar/spelling criterion. With no grammar oracle in the loop this is a
//! lexicon check against common misspellings plus basic spacing hygiene; it
//! is the degraded fallback the engine runs with by default.

use crate::errors::EngineError;
use crate::models::{Finding, Severity};
use crate::scoring::{CriterionId, CriterionOutcome, CriterionScorer, ScoreContext};

/// Common résumé misspellings and their corrections.
const MISSPELLINGS: &[(&str, &str)] = &[
    ("recieve", "receive"),
    ("seperate", "separate"),
    ("occured", "occurred"),
    ("managment", "management"),
    ("achive", "achieve"),
    ("acheive", "achieve"),
    ("responsibilty", "responsibility"),
    ("experiance", "experience"),
    ("sucessful", "successful"),
    ("definately", "definitely"),
    ("enviroment", "environment"),
    ("maintainance", "maintenance"),
    ("developement", "development"),
    ("recomend", "recommend"),
];

const MISSPELLING_DEDUCTION: f64 = 1.0;
const SPACING_DEDUCTION: f64 = 0.5;

pub struct GrammarScorer;

impl CriterionScorer for GrammarScorer {
    fn id(&self) -> CriterionId {
        CriterionId::Grammar
    }

    fn score(&self, cx: &ScoreContext) -> Result<CriterionOutcome, EngineError> {
        let text = cx.facts.full_text().to_lowercase();
        let max_points = self.id().max_points();

        let mut deduction = 0.0;
        let mut findings = Vec::new();

        for (wrong, right) in MISSPELLINGS {
            if text.contains(wrong) {
                deduction += MISSPELLING_DEDUCTION;
                findings.push(Finding::new(
                    Severity::Suggestion,
                    "content",
                    format!("'{wrong}' should be '{right}'"),
                ));
            }
        }

        if text.contains("  ") || text.contains(" ,") || text.contains(" .") {
            deduction += SPACING_DEDUCTION;
            findings.push(Finding::new(
                Severity::Info,
                "content",
                "Inconsistent spacing around punctuation",
            ));
        }

        let points = (max_points - deduction).max(0.0);
        let rationale = if findings.is_empty() {
            "No spelling or spacing issues detected".to_string()
        } else {
            format!("{} writing issue(s) detected", findings.len())
        };

        Ok(CriterionOutcome::new(self.id(), points, rationale).with_findings(findings))
    }
}
