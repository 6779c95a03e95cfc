//! Verb-tier classification of achievement lines. The leading verb of each
//! line is looked up in the curated tier table; per-entry and per-document
//! strengths are plain means over those tiers.

use crate::models::DocumentFacts;
use crate::reference::{VerbTierTable, MAX_VERB_TIER};

/// First word of an achievement line, lowercased and stripped of
/// punctuation. None when the line opens with something that is not a word.
pub fn leading_verb(line: &str) -> Option<String> {
    let word: String = line
        .split_whitespace()
        .next()?
        .chars()
        .filter(|c| c.is_alphabetic())
        .collect();
    if word.is_empty() {
        None
    } else {
        Some(word.to_lowercase())
    }
}

/// Mean tier across a set of achievement lines. None when no line yields a
/// leading verb, so callers can distinguish "weak verbs" from "no data".
pub fn mean_tier(lines: &[&str], table: &VerbTierTable) -> Option<f64> {
    let tiers: Vec<u8> = lines
        .iter()
        .filter_map(|line| leading_verb(line))
        .map(|verb| table.tier(&verb))
        .collect();
    if tiers.is_empty() {
        return None;
    }
    Some(tiers.iter().map(|t| f64::from(*t)).sum::<f64>() / tiers.len() as f64)
}

/// Mean tier across every achievement line in the document.
pub fn document_mean_tier(facts: &DocumentFacts, table: &VerbTierTable) -> Option<f64> {
    let lines: Vec<&str> = facts
        .all_achievement_lines()
        .into_iter()
        .map(|(_, line)| line)
        .collect();
    mean_tier(&lines, table)
}

/// Scales a mean tier linearly onto a point maximum.
pub fn tier_to_points(mean: f64, max_points: f64) -> f64 {
    (mean / f64::from(MAX_VERB_TIER)).clamp(0.0, 1.0) * max_points
}
