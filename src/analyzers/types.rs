//! Report types handed to the output layer.

use crate::analyzers::aggregate::{Alignment, IndicatorExtrema};
use crate::analyzers::ranking::RankingStrategy;
use crate::analyzers::standing::Standing;
use crate::analyzers::summary::ValueOrdering;
use crate::model::CitySummaryPoint;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Sorted country-level summary, feeding the bar/list view.
#[derive(Debug, Serialize)]
pub struct CountrySummaryReport {
    pub generated_at: DateTime<Utc>,
    pub ordering: ValueOrdering,
    pub cities: Vec<CitySummaryPoint>,
}

/// Cohort-wide extrema, used to scale chart axes.
#[derive(Debug, Serialize)]
pub struct ExtremaReport {
    pub generated_at: DateTime<Utc>,
    pub alignment: Alignment,
    pub absolute_max: f64,
    pub indicators: Vec<IndicatorExtrema>,
}

/// Popup content for one city marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityStanding {
    pub name: String,
    pub score: f64,
    pub rank: f64,
    /// Cohort size, shown as "rank (of N)".
    pub of: usize,
    pub standing_percent: f64,
    pub standing: Standing,
}

impl CityStanding {
    pub fn rank_label(&self) -> String {
        format!("{} (of {})", self.rank, self.of)
    }
}

#[derive(Debug, Serialize)]
pub struct StandingsReport {
    pub generated_at: DateTime<Utc>,
    pub strategy: RankingStrategy,
    pub cohort_average: f64,
    pub cities: Vec<CityStanding>,
}
