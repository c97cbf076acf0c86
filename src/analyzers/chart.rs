use crate::model::{ChartPoint, CitySummaryRecord};

/// Projects a city onto the `{name, value}` pairs the detail chart draws,
/// dropping any field whose name is in `excluded_keys`.
pub fn reduce_for_chart(city: &CitySummaryRecord, excluded_keys: &[String]) -> Vec<ChartPoint> {
    city.data
        .iter()
        .filter(|d| !excluded_keys.iter().any(|k| *k == d.name))
        .map(|d| ChartPoint {
            name: d.name.clone(),
            value: d.value.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IndicatorValue;

    fn keys(k: &[&str]) -> Vec<String> {
        k.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_reduce_drops_identifying_fields() {
        let city = CitySummaryRecord::new(
            "X",
            vec![
                IndicatorValue::new("lat", "1"),
                IndicatorValue::new("lng", "2"),
                IndicatorValue::new("score", "3"),
                IndicatorValue::new("PM", "1.2"),
            ],
        );
        let points = reduce_for_chart(&city, &keys(&["name", "lat", "lng", "score"]));
        assert_eq!(
            points,
            vec![ChartPoint {
                name: "PM".into(),
                value: "1.2".into()
            }]
        );
    }

    #[test]
    fn test_reduce_passes_text_through_untouched() {
        let city = CitySummaryRecord::new(
            "Y",
            vec![
                IndicatorValue::new("Waste", "1.0"),
                IndicatorValue::new("Transit", "n/a"),
            ],
        );
        let points = reduce_for_chart(&city, &[]);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].value, "1.0");
        assert_eq!(points[1].value, "n/a");
    }
}
