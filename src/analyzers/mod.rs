//! Cross-city indicator aggregation and ranking.
//!
//! This module turns a cohort of per-city indicator records into cohort-wide
//! extrema, per-city means and a sorted country summary, and the rank and
//! standing of each city relative to the cohort average. Every function here
//! is pure; loading and rendering live elsewhere.

pub mod aggregate;
pub mod analyzer;
pub mod chart;
pub mod ranking;
pub mod standing;
pub mod summary;
pub mod types;
pub mod utility;
