use crate::analyzers::aggregate::{absolute_max, indicator_extrema};
use crate::analyzers::chart::reduce_for_chart;
use crate::analyzers::ranking::rank_with;
use crate::analyzers::standing::{Standing, cohort_average, standing_percent};
use crate::analyzers::summary::{country_summary_with, mean_of};
use crate::analyzers::types::{CityStanding, CountrySummaryReport, ExtremaReport, StandingsReport};
use crate::analyzers::utility::parse_value;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::model::{ChartPoint, CitySummaryRecord, indicators_only};
use chrono::Utc;

/// A city's score: its `score` field when present, else the mean of its
/// non-excluded indicators.
pub fn score_of(city: &CitySummaryRecord, excluded_keys: &[String]) -> f64 {
    match city.field("score") {
        Some(raw) => parse_value(raw),
        None => mean_of(&city.without(excluded_keys).data),
    }
}

/// Sorted country summary over the cohort's indicators.
pub fn summarize(cohort: &[CitySummaryRecord], config: &EngineConfig) -> CountrySummaryReport {
    let indicators = indicators_only(cohort, &config.excluded_keys);
    CountrySummaryReport {
        generated_at: Utc::now(),
        ordering: config.value_ordering,
        cities: country_summary_with(&indicators, config.value_ordering),
    }
}

/// Absolute max plus per-indicator min/max over the cohort's indicators.
pub fn extrema(cohort: &[CitySummaryRecord], config: &EngineConfig) -> EngineResult<ExtremaReport> {
    let indicators = indicators_only(cohort, &config.excluded_keys);
    Ok(ExtremaReport {
        generated_at: Utc::now(),
        alignment: config.alignment,
        absolute_max: absolute_max(&indicators)?,
        indicators: indicator_extrema(&indicators, config.alignment)?,
    })
}

/// Rank and standing of every city, in cohort order.
pub fn standings(
    cohort: &[CitySummaryRecord],
    config: &EngineConfig,
) -> EngineResult<StandingsReport> {
    if cohort.is_empty() {
        return Err(EngineError::EmptyCohort);
    }

    let scores: Vec<f64> = cohort
        .iter()
        .map(|c| score_of(c, &config.excluded_keys))
        .collect();
    let ranks = rank_with(&scores, config.ranking);
    let average = cohort_average(&scores);

    let cities = cohort
        .iter()
        .zip(scores.iter().zip(ranks))
        .map(|(city, (&score, rank))| {
            let percent = standing_percent(score, average);
            CityStanding {
                name: city.name.clone(),
                score,
                rank,
                of: cohort.len(),
                standing_percent: percent,
                standing: Standing::from_percent(percent),
            }
        })
        .collect();

    Ok(StandingsReport {
        generated_at: Utc::now(),
        strategy: config.ranking,
        cohort_average: average,
        cities,
    })
}

/// Chart points for the city called `name`, if it is in the cohort.
pub fn chart_for(
    cohort: &[CitySummaryRecord],
    name: &str,
    config: &EngineConfig,
) -> Option<Vec<ChartPoint>> {
    cohort
        .iter()
        .find(|c| c.name == name)
        .map(|c| reduce_for_chart(c, &config.excluded_keys))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::ranking::RankingStrategy;
    use crate::model::IndicatorValue;

    fn scored(name: &str, score: &str) -> CitySummaryRecord {
        CitySummaryRecord::new(
            name,
            vec![
                IndicatorValue::new("lat", "45.0"),
                IndicatorValue::new("lng", "-75.0"),
                IndicatorValue::new("score", score),
                IndicatorValue::new("PM", "1.1"),
            ],
        )
    }

    #[test]
    fn test_score_prefers_score_field() {
        let cfg = EngineConfig::default();
        assert_eq!(score_of(&scored("A", "42"), &cfg.excluded_keys), 42.0);

        let plain = CitySummaryRecord::new(
            "B",
            vec![IndicatorValue::new("x", "1"), IndicatorValue::new("y", "3")],
        );
        assert_eq!(score_of(&plain, &cfg.excluded_keys), 2.0);
    }

    #[test]
    fn test_standings_follow_popup_rules() {
        let cohort = vec![
            scored("A", "50"),
            scored("B", "30"),
            scored("C", "50"),
            scored("D", "10"),
        ];
        let report = standings(&cohort, &EngineConfig::default()).unwrap();

        assert_eq!(report.cohort_average, 35.0);
        let ranks: Vec<_> = report.cities.iter().map(|c| c.rank).collect();
        assert_eq!(ranks, vec![1.0, 3.0, 1.0, 4.0]);
        assert_eq!(report.cities[0].rank_label(), "1 (of 4)");
        assert_eq!(report.cities[0].standing_percent, 43.0);
        assert_eq!(report.cities[1].standing, Standing::Below(-14.0));
    }

    #[test]
    fn test_standings_use_configured_strategy() {
        let cohort = vec![scored("A", "5"), scored("B", "5"), scored("C", "1")];
        let cfg = EngineConfig {
            ranking: RankingStrategy::Dense,
            ..EngineConfig::default()
        };
        let ranks: Vec<_> = standings(&cohort, &cfg)
            .unwrap()
            .cities
            .into_iter()
            .map(|c| c.rank)
            .collect();
        assert_eq!(ranks, vec![1.0, 1.0, 2.0]);
    }

    #[test]
    fn test_standings_with_non_numeric_score() {
        let cohort = vec![scored("Bad", "n/a"), scored("A", "50"), scored("B", "30")];
        let report = standings(&cohort, &EngineConfig::default()).unwrap();

        let ranks: Vec<_> = report.cities.iter().map(|c| c.rank).collect();
        assert_eq!(ranks, vec![0.0, 1.0, 2.0]);
        assert!(report.cities[0].score.is_nan());
        assert_eq!(report.cities[0].standing, Standing::Unavailable);
        // the NaN score also poisons the cohort average
        assert!(report.cohort_average.is_nan());
        assert!(report.cities.iter().all(|c| c.standing == Standing::Unavailable));
    }

    #[test]
    fn test_standings_empty_cohort() {
        assert_eq!(
            standings(&[], &EngineConfig::default()).unwrap_err(),
            EngineError::EmptyCohort
        );
    }

    #[test]
    fn test_summary_and_extrema_ignore_excluded_keys() {
        let cohort = vec![scored("A", "50"), scored("B", "30")];
        let cfg = EngineConfig::default();

        let summary = summarize(&cohort, &cfg);
        assert!(summary.cities.iter().all(|c| c.value == "1.1"));

        let report = extrema(&cohort, &cfg).unwrap();
        assert_eq!(report.absolute_max, 1.1);
        assert_eq!(report.indicators.len(), 1);
        assert_eq!(report.indicators[0].name, "PM");
    }

    #[test]
    fn test_chart_for_unknown_city() {
        let cohort = vec![scored("A", "50")];
        let cfg = EngineConfig::default();
        assert!(chart_for(&cohort, "Nowhere", &cfg).is_none());
        assert_eq!(chart_for(&cohort, "A", &cfg).unwrap().len(), 1);
    }
}
