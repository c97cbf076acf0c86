//! Per-city means and the sorted country-level summary.

use crate::analyzers::utility::{format_value, mean, parse_value, values_of};
use crate::model::{CitySummaryPoint, CitySummaryRecord, IndicatorValue};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Which comparator orders the country summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueOrdering {
    /// Compares the decimal text as strings, so `"10"` sorts before `"2"`.
    #[default]
    Lexicographic,
    /// Compares parsed values; `NaN` sorts after every number.
    Numeric,
}

impl ValueOrdering {
    pub fn compare(self, a: &CitySummaryPoint, b: &CitySummaryPoint) -> Ordering {
        match self {
            ValueOrdering::Lexicographic => compare_by_value(a, b),
            ValueOrdering::Numeric => compare_by_numeric_value(a, b),
        }
    }
}

/// Arithmetic mean of a city's readings. An empty slice gives exactly `0`.
pub fn mean_of(data: &[IndicatorValue]) -> f64 {
    mean(&values_of(data))
}

/// Orders two points by their `value` text, byte-wise.
pub fn compare_by_value(a: &CitySummaryPoint, b: &CitySummaryPoint) -> Ordering {
    a.value.cmp(&b.value)
}

/// Orders two points by their parsed `value`.
pub fn compare_by_numeric_value(a: &CitySummaryPoint, b: &CitySummaryPoint) -> Ordering {
    let (x, y) = (parse_value(&a.value), parse_value(&b.value));
    match (x.is_nan(), y.is_nan()) {
        (false, false) => x.total_cmp(&y),
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
    }
}

/// Summary point for a single city: its name twice and its mean as text.
pub fn city_summary(city: &CitySummaryRecord) -> CitySummaryPoint {
    CitySummaryPoint {
        name: city.name.clone(),
        description: city.name.clone(),
        value: format_value(mean_of(&city.data)),
    }
}

/// Country-level summary sorted ascending with [`compare_by_value`].
pub fn country_summary(cohort: &[CitySummaryRecord]) -> Vec<CitySummaryPoint> {
    country_summary_with(cohort, ValueOrdering::Lexicographic)
}

/// Country-level summary sorted ascending with the chosen comparator.
///
/// The sort is stable, so cities with equal keys keep cohort order.
pub fn country_summary_with(
    cohort: &[CitySummaryRecord],
    ordering: ValueOrdering,
) -> Vec<CitySummaryPoint> {
    let mut points: Vec<CitySummaryPoint> = cohort.iter().map(city_summary).collect();
    points.sort_by(|a, b| ordering.compare(a, b));
    points
}
