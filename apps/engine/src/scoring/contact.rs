//! Contact-completeness criterion. A document with no contact fields at all
//! scores the minimum here, never an error.

use crate::errors::EngineError;
use crate::models::{Finding, Severity};
use crate::scoring::{CriterionId, CriterionOutcome, CriterionScorer, ScoreContext};

const EMAIL_POINTS: f64 = 1.5;
const PHONE_POINTS: f64 = 1.0;
const NAME_POINTS: f64 = 1.0;
const LOCATION_POINTS: f64 = 0.5;
const LINK_BONUS: f64 = 0.5;
const LINK_BONUS_CAP: f64 = 1.0;

pub struct ContactScorer;

impl CriterionScorer for ContactScorer {
    fn id(&self) -> CriterionId {
        CriterionId::Contact
    }

    fn score(&self, cx: &ScoreContext) -> Result<CriterionOutcome, EngineError> {
        let contact = &cx.facts.contact;
        let mut points = 0.0;
        let mut present = Vec::new();
        let mut findings = Vec::new();

        if contact.email.as_deref().is_some_and(|v| !v.is_empty()) {
            points += EMAIL_POINTS;
            present.push("email");
        } else {
            findings.push(Finding::new(
                Severity::Critical,
                "structure",
                "No email address found; recruiters cannot reach you",
            ));
        }

        if contact.phone.as_deref().is_some_and(|v| !v.is_empty()) {
            points += PHONE_POINTS;
            present.push("phone");
        } else {
            findings.push(Finding::new(
                Severity::Suggestion,
                "structure",
                "No phone number found",
            ));
        }

        if contact.name.as_deref().is_some_and(|v| !v.is_empty()) {
            points += NAME_POINTS;
            present.push("name");
        }

        if contact.location.as_deref().is_some_and(|v| !v.is_empty()) {
            points += LOCATION_POINTS;
            present.push("location");
        }

        // Profile links are extra credit beyond the nominal max.
        let link_bonus = (contact.links.len() as f64 * LINK_BONUS).min(LINK_BONUS_CAP);
        points += link_bonus;

        let rationale = if present.is_empty() {
            "No contact information found".to_string()
        } else {
            format!("Present: {}", present.join(", "))
        };

        Ok(CriterionOutcome::new(self.id(), points, rationale).with_findings(findings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContactInfo, DocumentFacts};
    use crate::scoring::testing::ContextFixture;

    #[test]
    fn test_no_contact_fields_score_minimum_not_error() {
        let fixture = ContextFixture::default();
        let outcome = fixture.run(|cx| ContactScorer.score(cx)).unwrap();
        assert_eq!(outcome.score.points, 0.0);
        assert!(outcome
            .findings
            .iter()
            .any(|f| f.severity == Severity::Critical));
    }

    #[test]
    fn test_full_contact_with_links_exceeds_nominal_max() {
        let fixture = ContextFixture::default().facts(DocumentFacts {
            contact: ContactInfo {
                name: Some("Dana Engineer".to_string()),
                email: Some("dana@example.com".to_string()),
                phone: Some("+1 555 0100".to_string()),
                location: Some("Berlin".to_string()),
                links: vec![
                    "github.com/dana".to_string(),
                    "linkedin.com/in/dana".to_string(),
                ],
            },
            ..Default::default()
        });
        let outcome = fixture.run(|cx| ContactScorer.score(cx)).unwrap();
        assert!((outcome.score.points - 5.0).abs() < f64::EPSILON);
        assert!(outcome.score.points > outcome.score.max_points);
        assert!(outcome.findings.is_empty());
    }

    #[test]
    fn test_empty_string_fields_count_as_missing() {
        let fixture = ContextFixture::default().facts(DocumentFacts {
            contact: ContactInfo {
                email: Some(String::new()),
                ..Default::default()
            },
            ..Default::default()
        });
        let outcome = fixture.run(|cx| ContactScorer.score(cx)).unwrap();
        assert_eq!(outcome.score.points, 0.0);
    }
}
