//! Keyword matching — exact, synonym-expanded, and (when an oracle is
//! present) embedding-similarity matching of target terms against document
//! text.

pub mod oracle;

use std::collections::BTreeSet;

use regex::Regex;

use crate::matching::oracle::SimilarityOracle;
use crate::reference::SynonymTable;

/// Result of matching a target set against a text.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    /// Matched targets, in their original spelling.
    pub matched: BTreeSet<String>,
    pub count: usize,
    /// True when the embedding step did not run for every target (no oracle,
    /// breaker open, or a call failed mid-run).
    pub degraded: bool,
}

impl MatchOutcome {
    /// Targets from `targets` that did not match, preserving input order.
    pub fn missing<'a>(&self, targets: &'a [String]) -> Vec<&'a str> {
        targets
            .iter()
            .filter(|t| !self.matched.contains(*t))
            .map(String::as_str)
            .collect()
    }
}

/// Matches target terms against text using an ordered, short-circuiting
/// strategy: case-insensitive exact, synonym-expanded exact, then optional
/// oracle similarity. Borrowed pieces only; one matcher serves a whole
/// scoring run.
pub struct KeywordMatcher<'a> {
    synonyms: &'a SynonymTable,
    oracle: Option<&'a dyn SimilarityOracle>,
    similarity_threshold: f64,
    synonyms_enabled: bool,
}

impl<'a> KeywordMatcher<'a> {
    pub fn new(synonyms: &'a SynonymTable) -> Self {
        Self {
            synonyms,
            oracle: None,
            similarity_threshold: 0.6,
            synonyms_enabled: true,
        }
    }

    pub fn with_oracle(mut self, oracle: &'a dyn SimilarityOracle, threshold: f64) -> Self {
        self.oracle = Some(oracle);
        self.similarity_threshold = threshold;
        self
    }

    pub fn synonyms_enabled(mut self, enabled: bool) -> Self {
        self.synonyms_enabled = enabled;
        self
    }

    pub fn find_matches(&self, targets: &[String], text: &str) -> MatchOutcome {
        let haystack = normalize_text(text);
        let oracle = self.oracle.filter(|o| o.available());
        let mut degraded = oracle.is_none();
        let mut matched: BTreeSet<String> = BTreeSet::new();

        for target in targets {
            let needle = normalize_text(target);
            if needle.is_empty() {
                continue;
            }

            // Step 1: case-insensitive exact, word-boundary safe.
            if term_in_text(&needle, &haystack) {
                matched.insert(target.clone());
                continue;
            }

            // Step 2: synonym expansion, bidirectional.
            if self.synonyms_enabled {
                let variants = self.synonyms.variants_of(&needle);
                if variants
                    .iter()
                    .any(|v| v != &needle && term_in_text(v, &haystack))
                {
                    matched.insert(target.clone());
                    continue;
                }
            }

            // Step 3: oracle similarity. Failures fall back silently; the
            // outcome only records reduced fidelity.
            if let Some(oracle) = oracle {
                match oracle.similarity(&needle, &haystack) {
                    Ok(sim) if sim >= self.similarity_threshold => {
                        matched.insert(target.clone());
                    }
                    Ok(_) => {}
                    Err(_) => degraded = true,
                }
            }
        }

        MatchOutcome {
            count: matched.len(),
            matched,
            degraded,
        }
    }
}

/// Lowercases and replaces table separators (pipes, tabs) with spaces so a
/// separator cannot split a compound keyword, then collapses whitespace runs.
fn normalize_text(text: &str) -> String {
    let replaced = text.to_lowercase().replace(['|', '\t'], " ");
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Substring test that respects word boundaries when the term starts and ends
/// with word characters, so "api" cannot match inside "rapid". Terms with
/// leading/trailing symbols ("c++", ".net") fall back to plain substring.
fn term_in_text(term: &str, haystack: &str) -> bool {
    let boundary_safe = term
        .chars()
        .next()
        .map(|c| c.is_ascii_alphanumeric())
        .unwrap_or(false)
        && term
            .chars()
            .last()
            .map(|c| c.is_ascii_alphanumeric())
            .unwrap_or(false);

    if !boundary_safe {
        return haystack.contains(term);
    }

    match Regex::new(&format!(r"\b{}\b", regex::escape(term))) {
        Ok(re) => re.is_match(haystack),
        Err(_) => haystack.contains(term),
    }
}
