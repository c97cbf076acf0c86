//! Built-in cohort and indicator icon table.
//!
//! The built-in cohort is the SDG 11 dataset for 18 Canadian census
//! metropolitan areas, eleven indicators each, all in the same order.

use crate::model::Cohort;
use anyhow::{Context, Result};

const BUILTIN_COHORT: &str = include_str!("../data/canadian_cities.json");

/// Indicator display name to icon asset path.
///
/// Both economic-loss indicators share the 11.5.2 icon. 11.7.1 has no entry.
pub static ICONS: &[(&str, &str)] = &[
    ("House Need", "public/images/axis-icons/sdg-11.1.1.png"),
    ("Transit", "public/images/axis-icons/sdg-11.2.1.png"),
    ("Consumption", "public/images/axis-icons/sdg-11.3.1.png"),
    ("Civility", "public/images/axis-icons/sdg-11.3.2.png"),
    ("Affected", "public/images/axis-icons/sdg-11.5.1.1.png"),
    ("Disaster", "public/images/axis-icons/sdg-11.5.1.2.png"),
    ("Econ Loss1", "public/images/axis-icons/sdg-11.5.2.png"),
    ("Econ Loss2", "public/images/axis-icons/sdg-11.5.2.png"),
    ("Waste", "public/images/axis-icons/sdg-11.6.1.png"),
    ("PM", "public/images/axis-icons/sdg-11.6.2.png"),
    ("Assult", "public/images/axis-icons/sdg-11.7.2.png"),
];

/// Icon path for an indicator, if it has one. Names are matched exactly.
pub fn icon_for(indicator: &str) -> Option<&'static str> {
    ICONS
        .iter()
        .find(|(name, _)| *name == indicator)
        .map(|(_, path)| *path)
}

/// Parses the embedded dataset.
pub fn builtin_cohort() -> Result<Cohort> {
    serde_json::from_str(BUILTIN_COHORT).context("embedded city catalog is malformed")
}
