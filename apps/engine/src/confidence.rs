//! Confidence estimation around a score. With repeated measurements the
//! margin is the standard 95% interval; with a single measurement the
//! configured default margin applies instead of failing.

use crate::aggregate::OVERALL_MAX;
use crate::models::report::{ConfidenceInterval, Reliability};

/// z value for a 95% confidence level.
const Z_95: f64 = 1.96;

/// Interval widths (2 * margin) at or below these map to the qualitative
/// reliability labels.
const HIGH_RELIABILITY_WIDTH: f64 = 8.0;
const MEDIUM_RELIABILITY_WIDTH: f64 = 16.0;

/// Computes the interval around `point`. `samples` are repeated independent
/// measurements of the same scoring run when the caller has them; one or
/// zero samples fall back to `default_margin`.
pub fn estimate(point: f64, samples: &[f64], default_margin: f64) -> ConfidenceInterval {
    let margin = if samples.len() >= 2 {
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples
            .iter()
            .map(|sample| (sample - mean).powi(2))
            .sum::<f64>()
            / (n - 1.0);
        Z_95 * variance.sqrt() / n.sqrt()
    } else {
        default_margin
    };

    let width = margin * 2.0;
    let reliability = if width <= HIGH_RELIABILITY_WIDTH {
        Reliability::High
    } else if width <= MEDIUM_RELIABILITY_WIDTH {
        Reliability::Medium
    } else {
        Reliability::Low
    };

    ConfidenceInterval {
        low: (point - margin).max(0.0),
        high: (point + margin).min(OVERALL_MAX),
        margin,
        reliability,
    }
}
