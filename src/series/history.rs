//! Recent readings of a station, labelled for display.

use crate::core::{MonthName, Observation};
use crate::names::normalize;
use serde::Serialize;
use std::collections::BTreeSet;

/// One reading in the history view, serialized as `{label, valor, anho, mes}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryPoint {
    /// Short label such as `"Ene 20"`.
    pub label: String,
    #[serde(rename = "valor")]
    pub value: Option<f64>,
    #[serde(rename = "anho")]
    pub year: i32,
    #[serde(rename = "mes")]
    pub month: MonthName,
}

/// Readings of the last `years` distinct years on record for a station,
/// in chronological order.
pub fn recent_history(observations: &[Observation], location: &str, years: usize) -> Vec<HistoryPoint> {
    let key = normalize(location);
    let readings: Vec<(&Observation, MonthName)> = observations
        .iter()
        .filter(|o| o.is_at(&key))
        .filter_map(|o| o.canonical_month().map(|m| (o, m)))
        .collect();

    let distinct: BTreeSet<i32> = readings.iter().map(|(o, _)| o.year).collect();
    let kept: BTreeSet<i32> = distinct.iter().rev().take(years).copied().collect();

    let mut points: Vec<HistoryPoint> = readings
        .into_iter()
        .filter(|(o, _)| kept.contains(&o.year))
        .map(|(o, month)| HistoryPoint {
            label: format!("{} {:02}", month.abbreviation(), o.year.rem_euclid(100)),
            value: o.value,
            year: o.year,
            month,
        })
        .collect();
    points.sort_by_key(|p| (p.year, p.month));
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_last_years_in_order() {
        let mut data = Vec::new();
        for year in 2014..=2021 {
            data.push(Observation::new("Diciembre", year, Some(year as f64), "Pilar"));
            data.push(Observation::new("Enero", year, None, "Pilar"));
        }
        data.push(Observation::new("Enero", 2021, Some(1.0), "San Pedro"));

        let history = recent_history(&data, "PILAR", 5);
        assert_eq!(history.len(), 10);
        assert_eq!(history[0].year, 2017);
        assert_eq!(history[0].month, MonthName::Enero);
        assert_eq!(history[0].label, "Ene 17");
        assert_eq!(history[1].label, "Dic 17");
        assert_eq!(history[9].value, Some(2021.0));
    }

    #[test]
    fn serializes_with_display_keys() {
        let data = vec![Observation::new("marzo", 2009, Some(42.5), "Pilar")];
        let history = recent_history(&data, "Pilar", 5);
        let json = serde_json::to_value(&history[0]).unwrap();
        assert_eq!(json["label"], "Mar 09");
        assert_eq!(json["valor"], 42.5);
        assert_eq!(json["anho"], 2009);
        assert_eq!(json["mes"], "Marzo");
    }

    #[test]
    fn unknown_station_yields_nothing() {
        let data = vec![Observation::new("Enero", 2020, Some(1.0), "Pilar")];
        assert!(recent_history(&data, "Pozo Colorado", 5).is_empty());
    }
}
