//! Parsing of the raw start/end markers the parser hands over. A marker that
//! fails to parse is malformed input: the caller excludes the entry from the
//! affected calculation and emits a low-severity finding, never an error.

use chrono::{Datelike, NaiveDate};

/// Style of a parsed marker, tracked so the red-flag detector can spot a
/// document mixing numeric and spelled-month conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    Numeric,
    MonthName,
    YearOnly,
}

#[derive(Debug, Clone, Copy)]
pub struct ParsedDate {
    pub date: NaiveDate,
    pub style: DateStyle,
}

#[derive(Debug, Clone, Copy)]
pub enum DateMarker {
    Date(ParsedDate),
    /// "Present", "Current", and similar: an open-ended range.
    Present,
}

const MONTH_NAMES: &[(&str, u32)] = &[
    ("january", 1),
    ("february", 2),
    ("march", 3),
    ("april", 4),
    ("may", 5),
    ("june", 6),
    ("july", 7),
    ("august", 8),
    ("september", 9),
    ("october", 10),
    ("november", 11),
    ("december", 12),
];

/// Parses one start/end marker. Returns None for a present-but-unrecognized
/// value; the distinction between None-the-field and None-the-parse is the
/// caller's (missing vs malformed input).
pub fn parse_marker(raw: &str) -> Option<DateMarker> {
    let cleaned = raw.trim().trim_end_matches('.').to_lowercase();
    if cleaned.is_empty() {
        return None;
    }

    if matches!(cleaned.as_str(), "present" | "current" | "now" | "ongoing" | "today") {
        return Some(DateMarker::Present);
    }

    // "January 2020" / "Jan 2020"
    if let Some((month_raw, year_raw)) = cleaned.split_once([' ', ',']) {
        let month_raw = month_raw.trim_end_matches('.');
        if let Some(month) = month_from_name(month_raw) {
            if let Ok(year) = year_raw.trim().parse::<i32>() {
                return NaiveDate::from_ymd_opt(year, month, 1).map(|date| {
                    DateMarker::Date(ParsedDate {
                        date,
                        style: DateStyle::MonthName,
                    })
                });
            }
        }
        return None;
    }

    // "01/2020" and "2020/01"
    if let Some((a, b)) = cleaned.split_once('/') {
        return numeric_pair(a, b);
    }

    // "2020-01" and "2020-01-15"
    if cleaned.contains('-') {
        let parts: Vec<&str> = cleaned.split('-').collect();
        if parts.len() == 3 {
            if let Ok(date) = NaiveDate::parse_from_str(&cleaned, "%Y-%m-%d") {
                return Some(DateMarker::Date(ParsedDate {
                    date,
                    style: DateStyle::Numeric,
                }));
            }
        }
        if parts.len() == 2 {
            return numeric_pair(parts[0], parts[1]);
        }
        return None;
    }

    // Bare year
    if let Ok(year) = cleaned.parse::<i32>() {
        if (1900..=2100).contains(&year) {
            return NaiveDate::from_ymd_opt(year, 1, 1).map(|date| {
                DateMarker::Date(ParsedDate {
                    date,
                    style: DateStyle::YearOnly,
                })
            });
        }
    }

    None
}

fn month_from_name(raw: &str) -> Option<u32> {
    MONTH_NAMES
        .iter()
        .find(|(name, _)| *name == raw || (raw.len() >= 3 && name.starts_with(raw)))
        .map(|(_, month)| *month)
}

fn numeric_pair(a: &str, b: &str) -> Option<DateMarker> {
    let a: i32 = a.trim().parse().ok()?;
    let b: i32 = b.trim().parse().ok()?;
    let (year, month) = if a > 12 { (a, b) } else { (b, a) };
    if !(1900..=2100).contains(&year) || !(1..=12).contains(&month) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month as u32, 1).map(|date| {
        DateMarker::Date(ParsedDate {
            date,
            style: DateStyle::Numeric,
        })
    })
}

/// Fractional months between two dates, floored at zero.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> f64 {
    let years = end.year() - start.year();
    let months = end.month() as i32 - start.month() as i32;
    let total = years * 12 + months;
    let day_frac = (end.day() as f64 - start.day() as f64) / 30.0;
    (total as f64 + day_frac).max(0.0)
}
