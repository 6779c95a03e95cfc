//! Quantification-density criterion: the fraction of achievement lines that
//! carry a numeric, percentage, currency, or multiplier token, scored
//! against fixed breakpoints.

use regex::Regex;

use crate::errors::EngineError;
use crate::models::{Finding, Severity};
use crate::scoring::{CriterionId, CriterionOutcome, CriterionScorer, ScoreContext};

const FULL_CREDIT_DENSITY: f64 = 0.5;
const HIGH_PARTIAL_DENSITY: f64 = 0.3;
const PARTIAL_DENSITY: f64 = 0.2;

const HIGH_PARTIAL_CREDIT: f64 = 0.75;
const PARTIAL_CREDIT: f64 = 0.5;
const LOW_CREDIT: f64 = 0.2;

/// Density at or above this earns a small bonus over the nominal max.
const BONUS_DENSITY: f64 = 0.7;
const BONUS_POINTS: f64 = 2.0;

pub struct QuantificationScorer;

/// A line counts as quantified when it contains a digit, a percentage, a
/// currency amount, or an "Nx" multiplier.
pub fn is_quantified(line: &str) -> bool {
    let has_digit = line.chars().any(|c| c.is_ascii_digit());
    let has_symbol = line.contains(['%', '$', '€', '£']);
    if has_digit || has_symbol {
        return true;
    }
    let multiplier = Regex::new(r"(?i)\b\d+(?:\.\d+)?x\b").expect("static regex");
    multiplier.is_match(line)
}

impl CriterionScorer for QuantificationScorer {
    fn id(&self) -> CriterionId {
        CriterionId::Quantification
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

        let quantified = lines
            .iter()
            .filter(|(_, line)| is_quantified(line))
            .count();
        let density = quantified as f64 / lines.len() as f64;

        let credit = if density >= FULL_CREDIT_DENSITY {
            1.0
        } else if density >= HIGH_PARTIAL_DENSITY {
            HIGH_PARTIAL_CREDIT
        } else if density >= PARTIAL_DENSITY {
            PARTIAL_CREDIT
        } else {
            LOW_CREDIT
        };

        let mut points = max_points * credit;
        let mut rationale = format!(
            "{} of {} achievement lines carry a metric ({:.0}%)",
            quantified,
            lines.len(),
            density * 100.0
        );
        if density >= BONUS_DENSITY {
            points += BONUS_POINTS;
            rationale.push_str(" (density bonus)");
        }

        let mut outcome = CriterionOutcome::new(self.id(), points, rationale);
        if density < HIGH_PARTIAL_DENSITY {
            outcome = outcome.with_finding(Finding::new(
                Severity::Suggestion,
                "content",
                "Few achievement lines are quantified; add numbers, percentages, or amounts",
            ));
        }
        Ok(outcome)
    }
}
