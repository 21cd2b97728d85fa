use once_cell::sync::Lazy;
use polars::prelude::*;

use crate::models::BenfordResult;

/// Nine leading-digit categories, so eight degrees of freedom.
pub const DEGREES_OF_FREEDOM: usize = 8;

/// Theoretical Benford probabilities P(d) = log10(1 + 1/d), d = 1..=9.
pub static BENFORD_EXPECTED: Lazy<[f64; 9]> =
    Lazy::new(|| std::array::from_fn(|i| (1.0 + 1.0 / (i as f64 + 1.0)).log10()));

/// First significant decimal digit of a value, from its absolute value.
///
/// Values below 1 in magnitude (including zero) carry no meaningful leading
/// digit and are excluded, as are non-finite values.
pub fn leading_digit(value: f64) -> Option<usize> {
    let mut magnitude = value.abs();
    if !magnitude.is_finite() || magnitude < 1.0 {
        return None;
    }
    while magnitude >= 10.0 {
        magnitude /= 10.0;
    }
    Some(magnitude as usize)
}

/// Benford check for one numeric column, or `None` when fewer than
/// `min_samples` eligible values remain after exclusions.
pub fn analyze_column(
    sheet: &str,
    column: &str,
    values: &Float64Chunked,
    min_samples: usize,
) -> Option<BenfordResult> {
    let mut observed = [0u64; 9];
    let mut total = 0usize;

    for value in values.into_iter().flatten() {
        if let Some(digit) = leading_digit(value) {
            observed[digit - 1] += 1;
            total += 1;
        }
    }

    if total < min_samples {
        tracing::debug!(
            "sheet {} column {}: {} eligible values, below benford threshold {}",
            sheet,
            column,
            total,
            min_samples
        );
        return None;
    }

    let expected: [f64; 9] = std::array::from_fn(|i| BENFORD_EXPECTED[i] * total as f64);
    let chi_square = observed
        .iter()
        .zip(&expected)
        .map(|(obs, exp)| {
            let diff = *obs as f64 - exp;
            diff * diff / exp
        })
        .sum();

    Some(BenfordResult {
        sheet: sheet.to_string(),
        column: column.to_string(),
        total_values: total,
        observed,
        expected,
        chi_square,
        degrees_of_freedom: DEGREES_OF_FREEDOM,
    })
}
