//! Total-years estimation and graduated level classification.
//!
//! Total years is the maximum of two independent estimates: merged
//! structured date ranges, and the largest explicit year count stated in
//! free text. Free-text mentions often describe whole-career experience the
//! per-role dates miss, so the engine must not report zero experience when
//! the candidate states it directly.

use chrono::NaiveDate;
use regex::Regex;

use crate::analysis::dates::{months_between, parse_marker, DateMarker, DateStyle};
use crate::models::{DocumentFacts, Finding, Location, Severity, WorkEntry};
use crate::reference::LevelBand;

/// Proximity tiers for graduated classification.
const FULL_CREDIT: f64 = 1.0;
const NEAR_CREDIT: f64 = 0.8;
const CLOSE_CREDIT: f64 = 0.6;
const FAR_CREDIT: f64 = 0.3;

#[derive(Debug, Clone)]
pub struct ExperienceEstimate {
    /// max(structured_years, stated_years)
    pub years: f64,
    pub structured_years: f64,
    pub stated_years: f64,
    /// One date style per successfully parsed marker, for the red-flag
    /// consistency check.
    pub date_styles: Vec<DateStyle>,
    /// Malformed-date findings. The offending entries are excluded from the
    /// structured estimate only.
    pub findings: Vec<Finding>,
}

/// A work entry's resolved date span.
#[derive(Debug, Clone, Copy)]
pub struct EntrySpan {
    pub entry_index: usize,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl EntrySpan {
    pub fn months(&self) -> f64 {
        months_between(self.start, self.end)
    }
}

pub fn estimate(facts: &DocumentFacts, as_of: NaiveDate) -> ExperienceEstimate {
    let mut findings = Vec::new();
    let mut date_styles = Vec::new();
    let spans = resolve_spans(&facts.work_history, as_of, &mut findings, &mut date_styles);

    let structured_years = merged_years(&spans);
    let stated_years = largest_stated_years(facts);

    ExperienceEstimate {
        years: structured_years.max(stated_years),
        structured_years,
        stated_years,
        date_styles,
        findings,
    }
}

/// Resolves each entry's start/end markers into a span. A missing marker is
/// neutral (the entry is skipped); a present-but-unparsable one additionally
/// emits an info finding.
pub fn resolve_spans(
    entries: &[WorkEntry],
    as_of: NaiveDate,
    findings: &mut Vec<Finding>,
    date_styles: &mut Vec<DateStyle>,
) -> Vec<EntrySpan> {
    let mut spans = Vec::new();

    for (entry_index, entry) in entries.iter().enumerate() {
        let start = match &entry.start {
            None => continue,
            Some(raw) => match parse_marker(raw) {
                Some(DateMarker::Date(parsed)) => {
                    date_styles.push(parsed.style);
                    parsed.date
                }
                Some(DateMarker::Present) | None => {
                    findings.push(malformed(raw, entry_index));
                    continue;
                }
            },
        };

        let end = match &entry.end {
            // An open entry with no end marker is treated as current.
            None => as_of,
            Some(raw) => match parse_marker(raw) {
                Some(DateMarker::Date(parsed)) => {
                    date_styles.push(parsed.style);
                    parsed.date
                }
                Some(DateMarker::Present) => as_of,
                None => {
                    findings.push(malformed(raw, entry_index));
                    continue;
                }
            },
        };

        if end < start {
            findings.push(
                Finding::new(
                    Severity::Info,
                    "experience",
                    format!("Entry {} ends before it starts; dates ignored", entry_index + 1),
                )
                .at(Location::entry(entry_index)),
            );
            continue;
        }

        spans.push(EntrySpan {
            entry_index,
            start,
            end,
        });
    }

    spans
}

fn malformed(raw: &str, entry_index: usize) -> Finding {
    Finding::new(
        Severity::Info,
        "experience",
        format!("Unrecognized date '{raw}'; entry excluded from experience calculation"),
    )
    .at(Location::entry(entry_index))
}

/// Sums spans after collapsing overlaps, so concurrent roles are not
/// double-counted.
fn merged_years(spans: &[EntrySpan]) -> f64 {
    if spans.is_empty() {
        return 0.0;
    }

    let mut ranges: Vec<(NaiveDate, NaiveDate)> =
        spans.iter().map(|span| (span.start, span.end)).collect();
    ranges.sort();

    let mut total_months = 0.0;
    let (mut current_start, mut current_end) = ranges[0];
    for (start, end) in ranges.into_iter().skip(1) {
        if start <= current_end {
            current_end = current_end.max(end);
        } else {
            total_months += months_between(current_start, current_end);
            current_start = start;
            current_end = end;
        }
    }
    total_months += months_between(current_start, current_end);

    total_months / 12.0
}

/// Largest explicit year count mentioned anywhere in the document text
/// ("5 years of Python", "12+ yrs").
fn largest_stated_years(facts: &DocumentFacts) -> f64 {
    let pattern = Regex::new(r"(?i)\b(\d{1,2})\s*\+?\s*(?:years?|yrs?)\b")
        .expect("static regex");

    let mut texts: Vec<&str> = Vec::new();
    for entry in &facts.work_history {
        texts.push(&entry.description);
        if let Some(mention) = &entry.duration_mention {
            texts.push(mention);
        }
    }
    for section in &facts.sections {
        texts.push(&section.text);
    }

    texts
        .iter()
        .flat_map(|text| pattern.captures_iter(text))
        .filter_map(|caps| caps[1].parse::<f64>().ok())
        .fold(0.0, f64::max)
}

#[derive(Debug, Clone, Copy)]
pub struct LevelFit {
    /// Fraction of the criterion's points this candidate earns.
    pub ratio: f64,
    pub meets_level: bool,
}

/// Graduated classification against a level band. Membership scores full
/// credit; within one year outside the band, 80%; within two, 60%. Any
/// excess above the band is floored at the one-year-excess tier, since
/// over-qualification is a weaker mismatch signal than under-qualification.
/// Distance ties favor the candidate (comparisons are inclusive).
pub fn classify(years: f64, band: &LevelBand) -> LevelFit {
    let ratio = if band.contains(years) {
        FULL_CREDIT
    } else if years > band.max_years {
        NEAR_CREDIT
    } else {
        let deficit = band.min_years - years;
        if deficit <= 1.0 {
            NEAR_CREDIT
        } else if deficit <= 2.0 {
            CLOSE_CREDIT
        } else {
            FAR_CREDIT
        }
    };

    LevelFit {
        ratio,
        meets_level: ratio >= NEAR_CREDIT,
    }
}
