//! Red-flag detection over work history: employment gaps, job-hopping,
//! repeated achievement lines, and inconsistent date formatting. Strictly
//! additive penalties; this module never awards positive points. Each rule
//! has its own penalty cap so one severe issue cannot zero out a category on
//! its own.

use chrono::NaiveDate;
use strsim::jaro_winkler;

use crate::analysis::dates::DateStyle;
use crate::analysis::experience::{resolve_spans, EntrySpan};
use crate::models::{DocumentFacts, Finding, Location, Severity};

const GAP_THRESHOLD_MONTHS: f64 = 6.0;
const LONG_GAP_MONTHS: f64 = 12.0;
const GAP_PENALTY: f64 = 2.0;
const LONG_GAP_PENALTY: f64 = 4.0;
const GAP_PENALTY_CAP: f64 = 6.0;

const SHORT_TENURE_MONTHS: f64 = 12.0;
const HOPPING_MIN_ROLES: usize = 3;
const HOPPING_PENALTY: f64 = 4.0;

const REPETITION_SIMILARITY: f64 = 0.92;
const REPETITION_MIN_LEN: usize = 20;
const REPETITION_PENALTY: f64 = 1.5;
const REPETITION_PENALTY_CAP: f64 = 3.0;

const DATE_STYLE_PENALTY: f64 = 1.5;

#[derive(Debug, Clone, Default)]
pub struct RedFlagReport {
    pub findings: Vec<Finding>,
    /// Total penalty across all rules, each already capped.
    pub penalty: f64,
}

pub fn detect(facts: &DocumentFacts, as_of: NaiveDate) -> RedFlagReport {
    let mut report = RedFlagReport::default();

    // Date parsing issues are the experience module's findings; here the
    // spans and styles are reused without re-reporting them.
    let mut date_findings = Vec::new();
    let mut date_styles = Vec::new();
    let spans = resolve_spans(&facts.work_history, as_of, &mut date_findings, &mut date_styles);

    detect_gaps(&spans, &mut report);
    detect_hopping(&spans, &mut report);
    detect_repetition(facts, &mut report);
    detect_date_styles(&date_styles, &mut report);

    report
}

/// Flags gaps between consecutive roles. Consecutive is chronological: spans
/// are walked in start order against the latest end seen so far, so
/// overlapping concurrent roles never read as gaps. One finding per gap.
fn detect_gaps(spans: &[EntrySpan], report: &mut RedFlagReport) {
    if spans.len() < 2 {
        return;
    }

    let mut sorted: Vec<&EntrySpan> = spans.iter().collect();
    sorted.sort_by_key(|span| (span.start, span.end));

    let mut penalty = 0.0;
    let mut latest_end = sorted[0].end;
    for span in &sorted[1..] {
        if span.start > latest_end {
            let gap_months =
                crate::analysis::dates::months_between(latest_end, span.start);
            if gap_months > GAP_THRESHOLD_MONTHS {
                let long = gap_months > LONG_GAP_MONTHS;
                penalty += if long { LONG_GAP_PENALTY } else { GAP_PENALTY };
                report.findings.push(
                    Finding::new(
                        if long { Severity::Warning } else { Severity::Suggestion },
                        "experience",
                        format!(
                            "{:.0}-month employment gap before entry {}",
                            gap_months,
                            span.entry_index + 1
                        ),
                    )
                    .at(Location::entry(span.entry_index)),
                );
            }
        }
        latest_end = latest_end.max(span.end);
    }

    report.penalty += penalty.min(GAP_PENALTY_CAP);
}

/// Three or more roles each under a year reads as job-hopping. Single
/// finding, flat penalty.
fn detect_hopping(spans: &[EntrySpan], report: &mut RedFlagReport) {
    let short_roles = spans
        .iter()
        .filter(|span| span.months() < SHORT_TENURE_MONTHS)
        .count();

    if short_roles >= HOPPING_MIN_ROLES {
        report.penalty += HOPPING_PENALTY;
        report.findings.push(Finding::new(
            Severity::Warning,
            "experience",
            format!("{short_roles} roles under one year suggest frequent job changes"),
        ));
    }
}

/// Near-duplicate achievement lines across different entries.
fn detect_repetition(facts: &DocumentFacts, report: &mut RedFlagReport) {
    let lines: Vec<(usize, String)> = facts
        .all_achievement_lines()
        .into_iter()
        .filter(|(_, line)| line.len() >= REPETITION_MIN_LEN)
        .map(|(idx, line)| (idx, line.to_lowercase()))
        .collect();

    let mut penalty = 0.0;
    for i in 0..lines.len() {
        for j in (i + 1)..lines.len() {
            let (entry_a, line_a) = &lines[i];
            let (entry_b, line_b) = &lines[j];
            if entry_a == entry_b {
                continue;
            }
            if jaro_winkler(line_a, line_b) >= REPETITION_SIMILARITY {
                penalty += REPETITION_PENALTY;
                report.findings.push(
                    Finding::new(
                        Severity::Suggestion,
                        "content",
                        format!(
                            "Achievement '{}' is repeated across entries {} and {}",
                            truncate(line_a, 60),
                            entry_a + 1,
                            entry_b + 1
                        ),
                    )
                    .at(Location::entry(*entry_b)),
                );
            }
        }
    }

    report.penalty += penalty.min(REPETITION_PENALTY_CAP);
}

/// Mixing numeric and spelled-month date styles is flagged once per
/// document, not once per pair.
fn detect_date_styles(styles: &[DateStyle], report: &mut RedFlagReport) {
    let has_numeric = styles.iter().any(|s| *s == DateStyle::Numeric);
    let has_month_name = styles.iter().any(|s| *s == DateStyle::MonthName);

    if has_numeric && has_month_name {
        report.penalty += DATE_STYLE_PENALTY;
        report.findings.push(Finding::new(
            Severity::Suggestion,
            "structure",
            "Date formats mix numeric and spelled-month styles; pick one",
        ));
    }
}

fn truncate(text: &str, max_len: usize) -> &str {
    match text.char_indices().nth(max_len) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkEntry;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn entry(start: &str, end: &str) -> WorkEntry {
        WorkEntry {
            start: Some(start.to_string()),
            end: Some(end.to_string()),
            ..Default::default()
        }
    }

    fn facts(entries: Vec<WorkEntry>) -> DocumentFacts {
        DocumentFacts {
            work_history: entries,
            ..Default::default()
        }
    }

    #[test]
    fn test_single_gap_yields_single_finding() {
        // two back-to-back roles, then a 14-month gap
        let report = detect(
            &facts(vec![
                entry("Jan 2018", "Jan 2019"),
                entry("Jan 2019", "Jan 2020"),
                entry("Mar 2021", "Jan 2023"),
            ]),
            as_of(),
        );
        let gap_findings: Vec<_> = report
            .findings
            .iter()
            .filter(|f| f.message.contains("gap"))
            .collect();
        assert_eq!(gap_findings.len(), 1);
        assert!(gap_findings[0].message.contains("14-month"));
        assert_eq!(gap_findings[0].severity, Severity::Warning);
    }

    #[test]
    fn test_short_gap_not_flagged() {
        let report = detect(
            &facts(vec![
                entry("Jan 2018", "Jan 2020"),
                entry("Apr 2020", "Jan 2023"),
            ]),
            as_of(),
        );
        assert!(report.findings.is_empty());
        assert_eq!(report.penalty, 0.0);
    }

    #[test]
    fn test_overlapping_roles_do_not_read_as_gap() {
        // second role runs long; third starts right after it, far after the first ends
        let report = detect(
            &facts(vec![
                entry("Jan 2018", "Jan 2019"),
                entry("Jun 2018", "Jan 2022"),
                entry("Feb 2022", "Jan 2023"),
            ]),
            as_of(),
        );
        assert!(report.findings.iter().all(|f| !f.message.contains("gap")));
    }

    #[test]
    fn test_job_hopping_needs_three_short_roles() {
        let two_short = detect(
            &facts(vec![
                entry("Jan 2020", "Jun 2020"),
                entry("Jul 2020", "Dec 2020"),
            ]),
            as_of(),
        );
        assert!(two_short
            .findings
            .iter()
            .all(|f| !f.message.contains("job changes")));

        let three_short = detect(
            &facts(vec![
                entry("Jan 2020", "Jun 2020"),
                entry("Jul 2020", "Dec 2020"),
                entry("Jan 2021", "Jun 2021"),
            ]),
            as_of(),
        );
        assert!(three_short
            .findings
            .iter()
            .any(|f| f.message.contains("job changes")));
    }

    #[test]
    fn test_repeated_achievement_across_entries_flagged() {
        let mut first = entry("Jan 2018", "Jan 2020");
        first.description = "- Reduced deployment time by 40% across services".to_string();
        let mut second = entry("Jan 2020", "Jan 2022");
        second.description = "- Reduced deployment time by 40% across services".to_string();

        let report = detect(&facts(vec![first, second]), as_of());
        assert!(report
            .findings
            .iter()
            .any(|f| f.message.contains("repeated")));
    }

    #[test]
    fn test_mixed_date_styles_flagged_once() {
        let report = detect(
            &facts(vec![
                entry("Jan 2018", "Jan 2019"),
                entry("03/2019", "04/2020"),
                entry("May 2020", "06/2021"),
            ]),
            as_of(),
        );
        let style_findings: Vec<_> = report
            .findings
            .iter()
            .filter(|f| f.message.contains("Date formats"))
            .collect();
        assert_eq!(style_findings.len(), 1);
    }

    #[test]
    fn test_gap_penalty_is_capped() {
        // four long gaps between year-plus roles would be 16 points uncapped
        let report = detect(
            &facts(vec![
                entry("Jan 2010", "Feb 2011"),
                entry("Jul 2012", "Aug 2013"),
                entry("Jan 2015", "Feb 2016"),
                entry("Jul 2017", "Aug 2018"),
                entry("Jan 2020", "Feb 2021"),
            ]),
            as_of(),
        );
        assert!((report.penalty - GAP_PENALTY_CAP).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_history_is_clean() {
        let report = detect(&facts(vec![]), as_of());
        assert!(report.findings.is_empty());
        assert_eq!(report.penalty, 0.0);
    }
}
