//! Failures raised by the aggregation engine.
//!
//! All of these are local to one call. Callers are expected to show a
//! "no data" state instead of aborting.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("cohort contains no cities")]
    EmptyCohort,

    #[error("city '{city}' has no indicators")]
    EmptyRecord { city: String },

    #[error("city '{city}' has {found} indicators, expected {expected}")]
    MisalignedCohort {
        city: String,
        expected: usize,
        found: usize,
    },

    #[error("city '{city}' is missing indicator '{indicator}'")]
    IndicatorMismatch { city: String, indicator: String },
}

impl EngineError {
    /// True for the empty-input family (no cities, or a city with no readings).
    pub fn is_empty_cohort(&self) -> bool {
        matches!(self, EngineError::EmptyCohort | EngineError::EmptyRecord { .. })
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
