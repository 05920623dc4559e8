//! Precipitation observations and the in-memory record store.

use crate::core::MonthName;
use crate::names::{canonicalize_month, normalize};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single monthly precipitation reading at a station.
///
/// `month` keeps the spelling it was stored with; most consumers go through
/// [`Observation::canonical_month`]. A `None` value marks a reading that was
/// reported as missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub month: String,
    pub year: i32,
    pub value: Option<f64>,
    pub location: String,
}

impl Observation {
    pub fn new(
        month: impl Into<String>,
        year: i32,
        value: Option<f64>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            month: month.into(),
            year,
            value,
            location: location.into(),
        }
    }

    /// The canonical month, or `None` if the stored month is unrecognizable.
    pub fn canonical_month(&self) -> Option<MonthName> {
        canonicalize_month(self.month.as_str())
    }

    /// Normalized station key.
    pub fn location_key(&self) -> String {
        normalize(&self.location)
    }

    /// Whether this observation belongs to the station with the given key.
    pub fn is_at(&self, location_key: &str) -> bool {
        self.location_key() == location_key
    }
}

/// Identity of a stored record: canonical month, year and station key.
pub type RecordKey = (MonthName, i32, String);

/// Outcome of writing one observation into the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Updated,
}

/// Counters reported after loading a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub inserted: usize,
    pub updated: usize,
    pub skipped: usize,
}

/// In-memory observation table with upsert semantics.
///
/// Records are unique on `(canonical month, year, normalized location)`.
/// Writing an existing key replaces only its value; the first raw spelling
/// of the location is kept.
#[derive(Debug, Clone, Default)]
pub struct ObservationStore {
    records: Vec<Observation>,
    index: HashMap<RecordKey, usize>,
}

impl ObservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new record or update the value of an existing one.
    ///
    /// Returns `None` (and stores nothing) if the month cannot be resolved.
    pub fn upsert(&mut self, observation: Observation) -> Option<Upsert> {
        let month = observation.canonical_month()?;
        let key = (month, observation.year, observation.location_key());

        if let Some(&idx) = self.index.get(&key) {
            self.records[idx].value = observation.value;
            return Some(Upsert::Updated);
        }

        self.index.insert(key, self.records.len());
        self.records.push(Observation {
            month: month.name().to_string(),
            ..observation
        });
        Some(Upsert::Inserted)
    }

    /// Upsert every observation of an iterator.
    pub fn extend<I>(&mut self, observations: I) -> ImportSummary
    where
        I: IntoIterator<Item = Observation>,
    {
        let mut summary = ImportSummary::default();
        for observation in observations {
            match self.upsert(observation) {
                Some(Upsert::Inserted) => summary.inserted += 1,
                Some(Upsert::Updated) => summary.updated += 1,
                None => summary.skipped += 1,
            }
        }
        summary
    }

    /// Look up a single record.
    pub fn get(&self, month: MonthName, year: i32, location: &str) -> Option<&Observation> {
        self.index
            .get(&(month, year, normalize(location)))
            .map(|&idx| &self.records[idx])
    }

    /// Snapshot of every observation recorded for a station.
    ///
    /// No month or year filtering is applied.
    pub fn observations_for(&self, location: &str) -> Vec<Observation> {
        let key = normalize(location);
        self.records
            .iter()
            .filter(|o| o.is_at(&key))
            .cloned()
            .collect()
    }

    /// All stored observations, in insertion order.
    pub fn observations(&self) -> &[Observation] {
        &self.records
    }

    /// Distinct station names, first spelling seen for each normalized key.
    pub fn locations(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.records
            .iter()
            .filter(|o| seen.insert(o.location_key()))
            .map(|o| o.location.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_inserts_then_updates() {
        let mut store = ObservationStore::new();
        let first = Observation::new("enero", 2020, Some(100.0), "Pilar");
        assert_eq!(store.upsert(first), Some(Upsert::Inserted));

        let again = Observation::new("Ene", 2020, Some(120.0), "PILAR");
        assert_eq!(store.upsert(again), Some(Upsert::Updated));

        assert_eq!(store.len(), 1);
        let stored = store.get(MonthName::Enero, 2020, "pilar").unwrap();
        assert_eq!(stored.value, Some(120.0));
        assert_eq!(stored.location, "Pilar");
        assert_eq!(stored.month, "Enero");
    }

    #[test]
    fn upsert_rejects_unknown_month() {
        let mut store = ObservationStore::new();
        assert_eq!(
            store.upsert(Observation::new("Smarch", 2020, Some(1.0), "Pilar")),
            None
        );
        assert!(store.is_empty());
    }

    #[test]
    fn extend_counts_outcomes() {
        let mut store = ObservationStore::new();
        let summary = store.extend(vec![
            Observation::new("Enero", 2020, Some(1.0), "Pilar"),
            Observation::new("Febrero", 2020, Some(2.0), "Pilar"),
            Observation::new("Enero", 2020, None, "Pilar"),
            Observation::new("??", 2020, Some(3.0), "Pilar"),
        ]);
        assert_eq!(
            summary,
            ImportSummary {
                inserted: 2,
                updated: 1,
                skipped: 1
            }
        );
        assert_eq!(store.get(MonthName::Enero, 2020, "Pilar").unwrap().value, None);
    }

    #[test]
    fn observations_for_matches_normalized_location() {
        let mut store = ObservationStore::new();
        store.extend(vec![
            Observation::new("Enero", 2020, Some(1.0), "Concepción"),
            Observation::new("Enero", 2020, Some(2.0), "Pilar"),
            Observation::new("Enero", 2021, Some(3.0), "concepcion"),
        ]);
        let snapshot = store.observations_for("CONCEPCION");
        assert_eq!(snapshot.len(), 2);
        assert_eq!(store.locations(), vec!["Concepción", "Pilar"]);
    }
}
