use crate::analyzers::utility::{mean, round_half_up};
use serde::Serialize;
use std::fmt;

/// Whole-percent deviation of `score` from `cohort_average`.
///
/// `standing_percent(80, 100)` is `-20`. A zero average yields an infinite or
/// `NaN` result, which [`Standing::from_percent`] treats as unavailable.
pub fn standing_percent(score: f64, cohort_average: f64) -> f64 {
    round_half_up(((score / cohort_average) - 1.0) * 100.0)
}

/// Mean of the cohort's scores, `0` for an empty cohort.
pub fn cohort_average(scores: &[f64]) -> f64 {
    mean(scores)
}

/// How a city compares with the cohort average, for popup display.
///
/// | Percent | Standing     |
/// |---------|--------------|
/// | > 0     | Above        |
/// | < 0     | Below        |
/// | 0, NaN  | Unavailable  |
///
/// A city sitting exactly on the average is reported as unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "percent", rename_all = "snake_case")]
pub enum Standing {
    Above(f64),
    Below(f64),
    Unavailable,
}

impl Standing {
    pub fn from_percent(percent: f64) -> Self {
        match percent {
            p if p > 0.0 => Standing::Above(p),
            p if p < 0.0 => Standing::Below(p),
            _ => Standing::Unavailable,
        }
    }
}

impl fmt::Display for Standing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Standing::Above(p) => write!(f, "\u{25B2}{p}% above average"),
            Standing::Below(p) => write!(f, "\u{25BC} {p}% below average"),
            Standing::Unavailable => write!(f, "No average standing available"),
        }
    }
}
