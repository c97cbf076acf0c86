use crate::model::{CitySummaryRecord, IndicatorValue};
use serde::Serialize;

/// Parses indicator text into a number. Anything that is not a finite decimal
/// becomes `NaN`, which then propagates through sums, means and extrema.
pub fn parse_value(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(f64::NAN)
}

/// Parsed values of a city's indicators, in order.
pub fn values_of(data: &[IndicatorValue]) -> Vec<f64> {
    data.iter().map(|d| parse_value(&d.value)).collect()
}

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Maximum that returns `NaN` if either side is `NaN`.
///
/// `f64::max` silently drops `NaN`; these do not.
pub fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}

/// Minimum counterpart of [`nan_max`].
pub fn nan_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.min(b)
    }
}

/// Rounds half-way cases towards positive infinity (`-2.5` becomes `-2`).
pub fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 { floor + 1.0 } else { floor }
}

/// Formats a computed number as decimal text (`4.0` prints as `"4"`).
///
/// Negative zero prints as `"0"`. Infinite means print as `"Infinity"` or
/// `"-Infinity"`; [`parse_value`] only accepts finite decimals, so that text
/// reads back as `NaN`.
pub fn format_value(v: f64) -> String {
    if v == 0.0 {
        "0".to_string()
    } else if v.is_infinite() {
        if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        format!("{v}")
    }
}

/// An indicator whose text did not parse as a number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NonNumericValue {
    pub city: String,
    pub indicator: String,
    pub raw: String,
}

/// Lists every indicator in the cohort that will be treated as `NaN`.
pub fn non_numeric_values(cohort: &[CitySummaryRecord]) -> Vec<NonNumericValue> {
    cohort
        .iter()
        .flat_map(|city| {
            city.data
                .iter()
                .filter(|d| parse_value(&d.value).is_nan())
                .map(|d| NonNumericValue {
                    city: city.name.clone(),
                    indicator: d.name.clone(),
                    raw: d.value.clone(),
                })
        })
        .collect()
}
