//! Cohort-wide extrema: the absolute maximum over every reading, and the
//! minimum and maximum of each indicator across cities.

use crate::analyzers::utility::{nan_max, nan_min, parse_value, values_of};
use crate::error::{EngineError, EngineResult};
use crate::model::CitySummaryRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How readings of the same indicator are matched up across cities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    /// Position `i` means the same indicator in every record.
    #[default]
    Positional,
    /// Match by indicator name, in the order of the first record.
    ByName,
}

/// Minimum and maximum of one indicator across the cohort.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorExtrema {
    pub name: String,
    pub min: f64,
    pub max: f64,
}

fn check_non_empty(cohort: &[CitySummaryRecord]) -> EngineResult<()> {
    if cohort.is_empty() {
        return Err(EngineError::EmptyCohort);
    }
    if let Some(city) = cohort.iter().find(|c| c.data.is_empty()) {
        return Err(EngineError::EmptyRecord {
            city: city.name.clone(),
        });
    }
    Ok(())
}

/// Largest reading across every indicator of every city.
pub fn absolute_max(cohort: &[CitySummaryRecord]) -> EngineResult<f64> {
    check_non_empty(cohort)?;

    Ok(cohort
        .iter()
        .flat_map(|c| values_of(&c.data))
        .fold(f64::NEG_INFINITY, nan_max))
}

/// Per-indicator maximum, aligned by position.
pub fn max_per_indicator(cohort: &[CitySummaryRecord]) -> EngineResult<Vec<f64>> {
    reduce_per_indicator(cohort, nan_max)
}

/// Per-indicator minimum, aligned by position.
pub fn min_per_indicator(cohort: &[CitySummaryRecord]) -> EngineResult<Vec<f64>> {
    reduce_per_indicator(cohort, nan_min)
}

/// Zips the cohort by indicator position and folds each column with `op`.
///
/// Output length is the first record's indicator count; any record with a
/// different count is rejected rather than truncated.
fn reduce_per_indicator(
    cohort: &[CitySummaryRecord],
    op: fn(f64, f64) -> f64,
) -> EngineResult<Vec<f64>> {
    check_non_empty(cohort)?;
    let matrix = positional_matrix(cohort)?;

    let width = matrix[0].len();
    Ok((0..width)
        .map(|i| {
            matrix
                .iter()
                .map(|row| row[i])
                .reduce(op)
                .unwrap_or(f64::NAN)
        })
        .collect())
}

fn positional_matrix(cohort: &[CitySummaryRecord]) -> EngineResult<Vec<Vec<f64>>> {
    let expected = cohort[0].data.len();
    cohort
        .iter()
        .map(|city| {
            if city.data.len() != expected {
                return Err(EngineError::MisalignedCohort {
                    city: city.name.clone(),
                    expected,
                    found: city.data.len(),
                });
            }
            Ok(values_of(&city.data))
        })
        .collect()
}

/// Builds one column per indicator of the first record by looking readings
/// up by name. Extra or missing names in later records are rejected.
fn named_matrix(cohort: &[CitySummaryRecord]) -> EngineResult<Vec<Vec<f64>>> {
    let first = &cohort[0];
    let mut columns: Vec<Vec<f64>> = vec![Vec::with_capacity(cohort.len()); first.data.len()];

    for city in cohort {
        let by_name: HashMap<&str, &str> = city
            .data
            .iter()
            .map(|d| (d.name.as_str(), d.value.as_str()))
            .collect();

        if let Some(extra) = city
            .data
            .iter()
            .find(|d| !first.data.iter().any(|f| f.name == d.name))
        {
            return Err(EngineError::IndicatorMismatch {
                city: city.name.clone(),
                indicator: extra.name.clone(),
            });
        }

        for (column, indicator) in columns.iter_mut().zip(&first.data) {
            let raw = by_name.get(indicator.name.as_str()).ok_or_else(|| {
                EngineError::IndicatorMismatch {
                    city: city.name.clone(),
                    indicator: indicator.name.clone(),
                }
            })?;
            column.push(parse_value(raw));
        }
    }

    Ok(columns)
}

/// Minimum and maximum of every indicator, named after the first record.
pub fn indicator_extrema(
    cohort: &[CitySummaryRecord],
    alignment: Alignment,
) -> EngineResult<Vec<IndicatorExtrema>> {
    check_non_empty(cohort)?;

    let (mins, maxs) = match alignment {
        Alignment::Positional => (min_per_indicator(cohort)?, max_per_indicator(cohort)?),
        Alignment::ByName => {
            let columns = named_matrix(cohort)?;
            let fold = |op: fn(f64, f64) -> f64| -> Vec<f64> {
                columns
                    .iter()
                    .map(|col| col.iter().copied().reduce(op).unwrap_or(f64::NAN))
                    .collect()
            };
            (fold(nan_min), fold(nan_max))
        }
    };

    Ok(cohort[0]
        .data
        .iter()
        .zip(mins.into_iter().zip(maxs))
        .map(|(indicator, (min, max))| IndicatorExtrema {
            name: indicator.name.clone(),
            min,
            max,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IndicatorValue;

    fn city(name: &str, values: &[(&str, &str)]) -> CitySummaryRecord {
        CitySummaryRecord::new(
            name,
            values
                .iter()
                .map(|(n, v)| IndicatorValue::new(*n, *v))
                .collect(),
        )
    }

    fn two_cities() -> Vec<CitySummaryRecord> {
        vec![
            city("A", &[("x", "1"), ("y", "5")]),
            city("B", &[("x", "3"), ("y", "2")]),
        ]
    }

    #[test]
    fn test_per_indicator_extrema_are_positional() {
        let cohort = two_cities();
        assert_eq!(max_per_indicator(&cohort).unwrap(), vec![3.0, 5.0]);
        assert_eq!(min_per_indicator(&cohort).unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_absolute_max_bounds_every_value() {
        let cohort = vec![
            city("A", &[("x", "0.5"), ("y", "9.25")]),
            city("B", &[("x", "-3"), ("y", "4")]),
            city("C", &[("x", "9.2"), ("y", "0")]),
        ];
        let max = absolute_max(&cohort).unwrap();
        assert_eq!(max, 9.25);
        for c in &cohort {
            for v in values_of(&c.data) {
                assert!(max >= v);
            }
        }
    }

    #[test]
    fn test_empty_cohort_is_an_error() {
        assert_eq!(absolute_max(&[]), Err(EngineError::EmptyCohort));
        assert_eq!(max_per_indicator(&[]), Err(EngineError::EmptyCohort));
        assert_eq!(min_per_indicator(&[]), Err(EngineError::EmptyCohort));
    }

    #[test]
    fn test_record_without_indicators_is_an_error() {
        let cohort = vec![city("A", &[("x", "1")]), city("Empty", &[])];
        let err = absolute_max(&cohort).unwrap_err();
        assert!(err.is_empty_cohort());
        assert_eq!(
            err,
            EngineError::EmptyRecord {
                city: "Empty".into()
            }
        );
    }

    #[test]
    fn test_misaligned_cohort_fails_fast() {
        let cohort = vec![
            city("A", &[("x", "1"), ("y", "5")]),
            city("B", &[("x", "3")]),
        ];
        assert_eq!(
            max_per_indicator(&cohort),
            Err(EngineError::MisalignedCohort {
                city: "B".into(),
                expected: 2,
                found: 1,
            })
        );
    }

    #[test]
    fn test_non_numeric_value_poisons_only_its_column() {
        let cohort = vec![
            city("A", &[("x", "1"), ("y", "oops")]),
            city("B", &[("x", "3"), ("y", "2")]),
        ];
        let max = max_per_indicator(&cohort).unwrap();
        assert_eq!(max[0], 3.0);
        assert!(max[1].is_nan());
        assert!(absolute_max(&cohort).unwrap().is_nan());
    }

    #[test]
    fn test_positional_mode_pairs_reordered_indicators_wrongly() {
        let cohort = vec![
            city("A", &[("x", "1"), ("y", "5")]),
            city("B", &[("y", "2"), ("x", "3")]),
        ];
        // column 0 mixes A.x with B.y
        assert_eq!(max_per_indicator(&cohort).unwrap(), vec![2.0, 5.0]);

        let by_name = indicator_extrema(&cohort, Alignment::ByName).unwrap();
        assert_eq!(by_name[0].name, "x");
        assert_eq!((by_name[0].min, by_name[0].max), (1.0, 3.0));
        assert_eq!((by_name[1].min, by_name[1].max), (2.0, 5.0));
    }

    #[test]
    fn test_by_name_flags_missing_indicator() {
        let cohort = vec![
            city("A", &[("x", "1"), ("y", "5")]),
            city("B", &[("x", "3"), ("z", "2")]),
        ];
        let err = indicator_extrema(&cohort, Alignment::ByName).unwrap_err();
        assert!(matches!(err, EngineError::IndicatorMismatch { .. }));
    }

    #[test]
    fn test_positional_extrema_carry_first_record_names() {
        let extrema = indicator_extrema(&two_cities(), Alignment::Positional).unwrap();
        assert_eq!(
            extrema,
            vec![
                IndicatorExtrema {
                    name: "x".into(),
                    min: 1.0,
                    max: 3.0
                },
                IndicatorExtrema {
                    name: "y".into(),
                    min: 2.0,
                    max: 5.0
                },
            ]
        );
    }
}
