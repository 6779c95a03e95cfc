//! Criterion scorers — independent strategy objects behind one interface,
//! registered in a table keyed by criterion id. No scorer reads another
//! scorer's output; they share only the leaf components (matcher,
//! classifiers, detector), which is what lets the aggregator treat them as
//! interchangeable line items and lets a caller re-run one in isolation.

pub mod contact;
pub mod experience;
pub mod formatting;
pub mod grammar;
pub mod keywords;
pub mod quantification;
pub mod readability;
pub mod sections;
pub mod verbs;

use chrono::NaiveDate;

use crate::config::EngineConfig;
use crate::errors::EngineError;
use crate::matching::KeywordMatcher;
use crate::models::report::Category;
use crate::models::{CriterionScore, DocumentFacts, Finding};
use crate::reference::{LevelBand, ReferenceData, RoleProfile};

/// Identifier of one criterion scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionId {
    RequiredKeywords,
    PreferredKeywords,
    ExperienceAlignment,
    CareerStability,
    VerbStrength,
    Quantification,
    Readability,
    SectionBalance,
    Formatting,
    Grammar,
    Contact,
}

impl CriterionId {
    pub const ALL: [CriterionId; 11] = [
        CriterionId::RequiredKeywords,
        CriterionId::PreferredKeywords,
        CriterionId::ExperienceAlignment,
        CriterionId::CareerStability,
        CriterionId::VerbStrength,
        CriterionId::Quantification,
        CriterionId::Readability,
        CriterionId::SectionBalance,
        CriterionId::Formatting,
        CriterionId::Grammar,
        CriterionId::Contact,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CriterionId::RequiredKeywords => "required_keywords",
            CriterionId::PreferredKeywords => "preferred_keywords",
            CriterionId::ExperienceAlignment => "experience_alignment",
            CriterionId::CareerStability => "career_stability",
            CriterionId::VerbStrength => "verb_strength",
            CriterionId::Quantification => "quantification",
            CriterionId::Readability => "readability",
            CriterionId::SectionBalance => "section_balance",
            CriterionId::Formatting => "formatting",
            CriterionId::Grammar => "grammar",
            CriterionId::Contact => "contact",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            CriterionId::RequiredKeywords | CriterionId::PreferredKeywords => Category::Keywords,
            CriterionId::ExperienceAlignment | CriterionId::CareerStability => Category::Experience,
            CriterionId::VerbStrength | CriterionId::Quantification | CriterionId::Readability => {
                Category::Content
            }
            CriterionId::SectionBalance
            | CriterionId::Formatting
            | CriterionId::Grammar
            | CriterionId::Contact => Category::Structure,
        }
    }

    /// Nominal point maximum. Bonus-awarding scorers may exceed this; the
    /// category bonus ceiling is what bounds them.
    pub fn max_points(&self) -> f64 {
        match self {
            CriterionId::RequiredKeywords => 20.0,
            CriterionId::PreferredKeywords => 10.0,
            CriterionId::ExperienceAlignment => 15.0,
            CriterionId::CareerStability => 10.0,
            CriterionId::VerbStrength => 10.0,
            CriterionId::Quantification => 10.0,
            CriterionId::Readability => 5.0,
            CriterionId::SectionBalance => 6.0,
            CriterionId::Formatting => 6.0,
            CriterionId::Grammar => 4.0,
            CriterionId::Contact => 4.0,
        }
    }
}

impl std::str::FromStr for CriterionId {
    type Err = EngineError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        CriterionId::ALL
            .iter()
            .find(|id| id.as_str() == raw)
            .copied()
            .ok_or_else(|| EngineError::UnknownCriterion(raw.to_string()))
    }
}

/// Everything a scorer may read. Shared leaf components only; no scorer
/// output ever appears here.
pub struct ScoreContext<'a> {
    pub facts: &'a DocumentFacts,
    pub role: &'a RoleProfile,
    pub level: &'a LevelBand,
    pub reference: &'a ReferenceData,
    pub matcher: &'a KeywordMatcher<'a>,
    pub config: &'a EngineConfig,
    pub as_of: NaiveDate,
}

/// A sub-score plus any findings the scorer produced along the way.
#[derive(Debug, Clone)]
pub struct CriterionOutcome {
    pub score: CriterionScore,
    pub findings: Vec<Finding>,
    /// Set by matcher-backed scorers when the embedding step did not run.
    pub degraded_matching: bool,
}

impl CriterionOutcome {
    pub fn new(id: CriterionId, points: f64, rationale: impl Into<String>) -> Self {
        Self {
            score: CriterionScore {
                criterion: id.as_str().to_string(),
                category: id.category(),
                points,
                max_points: id.max_points(),
                rationale: rationale.into(),
            },
            findings: Vec::new(),
            degraded_matching: false,
        }
    }

    pub fn with_findings(mut self, findings: Vec<Finding>) -> Self {
        self.findings = findings;
        self
    }

    pub fn with_finding(mut self, finding: Finding) -> Self {
        self.findings.push(finding);
        self
    }

    pub fn degraded(mut self, degraded: bool) -> Self {
        self.degraded_matching = degraded;
        self
    }
}

pub trait CriterionScorer: Send + Sync {
    fn id(&self) -> CriterionId;
    fn score(&self, cx: &ScoreContext) -> Result<CriterionOutcome, EngineError>;
}

/// The full scorer family, one strategy object per criterion. Adding a new
/// criterion means adding it here and to `CriterionId`; the aggregator
/// iterates this table generically.
pub fn registry() -> Vec<Box<dyn CriterionScorer>> {
    vec![
        Box::new(keywords::RequiredKeywordsScorer),
        Box::new(keywords::PreferredKeywordsScorer),
        Box::new(experience::ExperienceAlignmentScorer),
        Box::new(experience::CareerStabilityScorer),
        Box::new(verbs::VerbStrengthScorer),
        Box::new(quantification::QuantificationScorer),
        Box::new(readability::ReadabilityScorer),
        Box::new(sections::SectionBalanceScorer),
        Box::new(formatting::FormattingScorer),
        Box::new(grammar::GrammarScorer),
        Box::new(contact::ContactScorer),
    ]
}

/// Shared fixture for scorer unit tests: owns every borrowed piece of a
/// `ScoreContext` and hands the assembled context to a closure.
#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::models::Section;

    pub(crate) struct ContextFixture {
        pub facts: DocumentFacts,
        pub role: RoleProfile,
        pub level: LevelBand,
        pub reference: ReferenceData,
        pub config: EngineConfig,
        pub as_of: NaiveDate,
    }

    impl Default for ContextFixture {
        fn default() -> Self {
            Self {
                facts: DocumentFacts::default(),
                role: RoleProfile::default(),
                level: LevelBand {
                    min_years: 2.0,
                    max_years: 6.0,
                },
                reference: ReferenceData::builtin(),
                config: EngineConfig::default(),
                as_of: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            }
        }
    }

    impl ContextFixture {
        pub fn facts(mut self, facts: DocumentFacts) -> Self {
            self.facts = facts;
            self
        }

        pub fn required(mut self, terms: &[&str]) -> Self {
            self.role.required = terms.iter().map(|t| t.to_string()).collect();
            self
        }

        pub fn preferred(mut self, terms: &[&str]) -> Self {
            self.role.preferred = terms.iter().map(|t| t.to_string()).collect();
            self
        }

        pub fn skills_text(mut self, text: &str) -> Self {
            self.facts.sections.push(Section {
                name: "skills".to_string(),
                text: text.to_string(),
            });
            self
        }

        pub fn run<T>(&self, f: impl FnOnce(&ScoreContext) -> T) -> T {
            let matcher = KeywordMatcher::new(&self.reference.synonyms)
                .synonyms_enabled(self.config.synonyms_enabled);
            let cx = ScoreContext {
                facts: &self.facts,
                role: &self.role,
                level: &self.level,
                reference: &self.reference,
                matcher: &matcher,
                config: &self.config,
                as_of: self.as_of,
            };
            f(&cx)
        }
    }
}
