//! Rank cities by score, highest first.

use serde::{Deserialize, Serialize};

/// How tied scores are ranked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingStrategy {
    /// Rank is one plus the first index of the score in a descending copy.
    /// For finite scores this is standard competition ranking (1, 1, 3, 4).
    #[default]
    #[serde(alias = "competition")]
    FirstOccurrence,
    /// Distinct scores take consecutive ranks (1, 1, 2, 3).
    Dense,
    /// Tied scores share the mean of the positions they span (1.5, 1.5, 3, 4).
    Fractional,
}

/// Descending copy of `scores` with every `NaN` moved to the end, so finite
/// scores keep positions `0..n` regardless of how many readings failed to parse.
fn sorted_descending(scores: &[f64]) -> Vec<f64> {
    let mut sorted = scores.to_vec();
    sorted.sort_by(|a, b| match (a.is_nan(), b.is_nan()) {
        (false, false) => b.total_cmp(a),
        (x, y) => x.cmp(&y),
    });
    sorted
}

/// First-occurrence rank of each score, in input order.
///
/// A `NaN` score is never found in the sorted copy and ranks `0`.
pub fn rank_of(scores: &[f64]) -> Vec<usize> {
    let sorted = sorted_descending(scores);
    scores
        .iter()
        .map(|s| sorted.iter().position(|v| v == s).map_or(0, |i| i + 1))
        .collect()
}

/// Ranks `scores` with the given strategy.
pub fn rank_with(scores: &[f64], strategy: RankingStrategy) -> Vec<f64> {
    match strategy {
        RankingStrategy::FirstOccurrence => {
            rank_of(scores).into_iter().map(|r| r as f64).collect()
        }
        RankingStrategy::Dense => {
            let mut distinct = sorted_descending(scores);
            distinct.retain(|v| !v.is_nan());
            distinct.dedup();
            scores
                .iter()
                .map(|s| {
                    distinct
                        .iter()
                        .position(|v| v == s)
                        .map_or(0.0, |i| (i + 1) as f64)
                })
                .collect()
        }
        RankingStrategy::Fractional => {
            let sorted = sorted_descending(scores);
            scores
                .iter()
                .map(|s| {
                    let first = sorted.iter().position(|v| v == s);
                    let last = sorted.iter().rposition(|v| v == s);
                    match (first, last) {
                        (Some(f), Some(l)) => (f + l) as f64 / 2.0 + 1.0,
                        _ => 0.0,
                    }
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::utility::parse_value;

    #[test]
    fn test_first_occurrence_ties_share_rank() {
        assert_eq!(rank_of(&[50.0, 30.0, 50.0, 10.0]), vec![1, 3, 1, 4]);
    }

    #[test]
    fn test_rank_of_does_not_reorder_input() {
        let scores = vec![10.0, 20.0, 30.0];
        assert_eq!(rank_of(&scores), vec![3, 2, 1]);
        assert_eq!(scores, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_rank_of_nan_is_zero() {
        assert_eq!(rank_of(&[f64::NAN, 5.0, 7.0]), vec![0, 2, 1]);
    }

    #[test]
    fn test_sorted_descending_puts_nan_last() {
        let sorted = sorted_descending(&[f64::NAN, 5.0, 7.0, -f64::NAN]);
        assert_eq!(&sorted[..2], &[7.0, 5.0]);
        assert!(sorted[2].is_nan() && sorted[3].is_nan());
    }

    #[test]
    fn test_unparsed_score_keeps_valid_ranks() {
        let scores = [parse_value("x"), 5.0, 7.0];
        assert_eq!(rank_of(&scores), vec![0, 2, 1]);
    }

    #[test]
    fn test_strategies_rank_nan_zero() {
        let scores = [f64::NAN, 5.0, 7.0, 5.0];
        assert_eq!(
            rank_with(&scores, RankingStrategy::Dense),
            vec![0.0, 2.0, 1.0, 2.0]
        );
        assert_eq!(
            rank_with(&scores, RankingStrategy::Fractional),
            vec![0.0, 2.5, 1.0, 2.5]
        );
    }

    #[test]
    fn test_rank_of_empty() {
        assert!(rank_of(&[]).is_empty());
    }

    #[test]
    fn test_dense_ranking() {
        assert_eq!(
            rank_with(&[50.0, 30.0, 50.0, 10.0], RankingStrategy::Dense),
            vec![1.0, 2.0, 1.0, 3.0]
        );
    }

    #[test]
    fn test_fractional_ranking() {
        assert_eq!(
            rank_with(&[50.0, 30.0, 50.0, 10.0], RankingStrategy::Fractional),
            vec![1.5, 3.0, 1.5, 4.0]
        );
    }

    #[test]
    fn test_competition_alias_parses() {
        let s: RankingStrategy = serde_json::from_str("\"competition\"").unwrap();
        assert_eq!(s, RankingStrategy::FirstOccurrence);
    }
}
