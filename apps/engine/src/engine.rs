//! Engine — wires the reference data, matcher, and scorer registry into the
//! two public entry points: full evaluation and single-criterion re-scoring.
//!
//! A scoring run is synchronous and holds no cross-invocation state; one
//! `Engine` behind an `Arc` serves concurrent runs without locking.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::info;

use crate::aggregate;
use crate::config::EngineConfig;
use crate::confidence;
use crate::errors::EngineError;
use crate::matching::oracle::SimilarityOracle;
use crate::matching::KeywordMatcher;
use crate::models::{CriterionScore, DocumentFacts, Finding, ScoreReport};
use crate::reference::ReferenceData;
use crate::scoring::{registry, CriterionId, ScoreContext};

pub struct Engine {
    reference: Arc<ReferenceData>,
    config: EngineConfig,
    oracle: Option<Arc<dyn SimilarityOracle>>,
}

impl Engine {
    pub fn new(reference: Arc<ReferenceData>, config: EngineConfig) -> Self {
        Self {
            reference,
            config,
            oracle: None,
        }
    }

    /// Attaches the optional similarity oracle. Injected at construction;
    /// every call site branches on its availability.
    pub fn with_oracle(mut self, oracle: Arc<dyn SimilarityOracle>) -> Self {
        self.oracle = Some(oracle);
        self
    }

    /// Scores a document against a role and level. Unknown ids are the one
    /// hard-failure class; everything about the document degrades gracefully.
    pub fn evaluate(
        &self,
        facts: &DocumentFacts,
        role_id: &str,
        level_id: &str,
    ) -> Result<ScoreReport, EngineError> {
        self.evaluate_at(facts, role_id, level_id, Utc::now().date_naive())
    }

    /// Like `evaluate`, with an explicit reference date for open-ended
    /// ("Present") work entries. Fixing the date makes runs reproducible.
    pub fn evaluate_at(
        &self,
        facts: &DocumentFacts,
        role_id: &str,
        level_id: &str,
        as_of: NaiveDate,
    ) -> Result<ScoreReport, EngineError> {
        let role = self.reference.role(role_id)?;
        let level = self.reference.level(level_id)?;
        let matcher = self.matcher();
        let cx = ScoreContext {
            facts,
            role,
            level,
            reference: &self.reference,
            matcher: &matcher,
            config: &self.config,
            as_of,
        };

        let outcomes = registry()
            .iter()
            .map(|scorer| (scorer.id(), scorer.score(&cx)))
            .collect();
        let aggregate = aggregate::aggregate(outcomes, role);
        let confidence =
            confidence::estimate(aggregate.overall_score, &[], self.config.default_margin);
        let recommendation = build_recommendation(aggregate.overall_score, &aggregate.findings);

        info!(
            "Scored {}-word document against {role_id}/{level_id}: {:.1} (raw {:.1}, {} findings)",
            facts.word_count,
            aggregate.overall_score,
            aggregate.raw_total,
            aggregate.findings.len()
        );

        Ok(ScoreReport {
            overall_score: aggregate.overall_score,
            raw_total: aggregate.raw_total,
            categories: aggregate.categories,
            criteria: aggregate.criteria,
            findings: aggregate.findings,
            confidence,
            degraded_matching: aggregate.degraded_matching,
            recommendation,
        })
    }

    /// Re-runs a single criterion in isolation, for "apply one edit, watch
    /// the score move" interactions. Scorer independence makes this exact:
    /// the sub-score is identical to what a full run would produce.
    pub fn evaluate_criterion(
        &self,
        facts: &DocumentFacts,
        role_id: &str,
        level_id: &str,
        criterion: CriterionId,
    ) -> Result<CriterionScore, EngineError> {
        self.evaluate_criterion_at(facts, role_id, level_id, criterion, Utc::now().date_naive())
    }

    pub fn evaluate_criterion_at(
        &self,
        facts: &DocumentFacts,
        role_id: &str,
        level_id: &str,
        criterion: CriterionId,
        as_of: NaiveDate,
    ) -> Result<CriterionScore, EngineError> {
        let role = self.reference.role(role_id)?;
        let level = self.reference.level(level_id)?;
        let matcher = self.matcher();
        let cx = ScoreContext {
            facts,
            role,
            level,
            reference: &self.reference,
            matcher: &matcher,
            config: &self.config,
            as_of,
        };

        let scorer = registry()
            .into_iter()
            .find(|scorer| scorer.id() == criterion)
            .ok_or_else(|| EngineError::UnknownCriterion(criterion.as_str().to_string()))?;
        Ok(scorer.score(&cx)?.score)
    }

    fn matcher(&self) -> KeywordMatcher<'_> {
        let matcher = KeywordMatcher::new(&self.reference.synonyms)
            .synonyms_enabled(self.config.synonyms_enabled);
        match self.oracle.as_deref() {
            Some(oracle) => matcher.with_oracle(oracle, self.config.similarity_threshold),
            None => matcher,
        }
    }
}

/// Human-readable recommendation from the overall score and the
/// severity-ordered findings.
fn build_recommendation(score: f64, findings: &[Finding]) -> String {
    let top_issues: Vec<&str> = findings
        .iter()
        .take(3)
        .map(|finding| finding.message.as_str())
        .collect();

    if score >= 80.0 {
        "Strong match for the target role and level.".to_string()
    } else if score >= 60.0 {
        format!(
            "Moderate match ({score:.0}/100). Worth addressing: {}",
            top_issues.join("; ")
        )
    } else {
        format!(
            "Weak match ({score:.0}/100). Significant issues: {}",
            top_issues.join("; ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;

    #[test]
    fn test_recommendation_tiers() {
        assert!(build_recommendation(85.0, &[]).contains("Strong"));
        let findings = vec![Finding::new(Severity::Warning, "keywords", "Missing kafka")];
        let moderate = build_recommendation(65.0, &findings);
        assert!(moderate.contains("65"));
        assert!(moderate.contains("Missing kafka"));
        assert!(build_recommendation(30.0, &findings).contains("30"));
    }
}
