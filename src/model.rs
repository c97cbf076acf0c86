//! Record shapes shared by the loader, the engine and the output layer.

use serde::{Deserialize, Serialize};

/// A single named indicator reading for one city.
///
/// `value` is kept as decimal text exactly as it was loaded; parsing happens
/// inside the engine (see [`crate::analyzers::utility::parse_value`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorValue {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl IndicatorValue {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// One city and its ordered indicator readings.
///
/// Per-indicator aggregation in positional mode assumes every record of a
/// cohort lists the same indicators in the same order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitySummaryRecord {
    pub name: String,
    pub data: Vec<IndicatorValue>,
}

impl CitySummaryRecord {
    pub fn new(name: impl Into<String>, data: Vec<IndicatorValue>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Returns the raw text of the first indicator called `name`.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.data
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.value.as_str())
    }

    /// Copy of this record without the indicators named in `excluded`.
    pub fn without(&self, excluded: &[String]) -> Self {
        Self {
            name: self.name.clone(),
            data: self
                .data
                .iter()
                .filter(|d| !excluded.iter().any(|k| *k == d.name))
                .cloned()
                .collect(),
        }
    }
}

/// The full set of cities compared in one computation.
pub type Cohort = Vec<CitySummaryRecord>;

/// Strips excluded keys (identifiers, coordinates, scores) from every record.
pub fn indicators_only(cohort: &[CitySummaryRecord], excluded: &[String]) -> Cohort {
    cohort.iter().map(|c| c.without(excluded)).collect()
}

/// A city's mean indicator value, as shown in the country-level bar list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitySummaryPoint {
    pub name: String,
    pub description: String,
    pub value: String,
}

/// Minimal `{name, value}` pair consumed by the detail bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub name: String,
    pub value: String,
}
