//! Loading precipitation exports into an [`ObservationStore`].
//!
//! # Example
//!
//! ```
//! use precip_forecast::core::ObservationStore;
//! use precip_forecast::ingest::parse_csv;
//!
//! let batch = parse_csv("Mes;Anho;Precipitacion;Ubicacion\nEnero;2020;120,5;Pilar\n");
//! let mut store = ObservationStore::new();
//! let summary = store.import(&batch);
//! assert_eq!(summary.inserted, 1);
//! ```

mod reader;

pub use reader::{decode_bytes, parse_csv, read_csv_file, ImportBatch, ImportedRecord, SkippedRow};

use crate::core::{ImportSummary, ObservationStore};

impl ObservationStore {
    /// Upsert every record of a parsed batch.
    ///
    /// Rows the parser rejected count as skipped.
    pub fn import(&mut self, batch: &ImportBatch) -> ImportSummary {
        let mut summary = self.extend(batch.observations().cloned());
        summary.skipped += batch.skipped.len();
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MonthName;

    #[test]
    fn reimport_updates_values_only() {
        let mut store = ObservationStore::new();
        let first = parse_csv("Mes;Anho;Precipitacion;Ubicacion\nEnero;2020;100;Concepción\nX;2020;1;Pilar\n");
        let summary = store.import(&first);
        assert_eq!(
            summary,
            ImportSummary {
                inserted: 1,
                updated: 0,
                skipped: 1
            }
        );

        let second = parse_csv("Mes;Anho;Precipitacion;Ubicacion\nene;2020;80;CONCEPCION\n");
        let summary = store.import(&second);
        assert_eq!(summary.updated, 1);
        assert_eq!(store.len(), 1);

        let stored = store.get(MonthName::Enero, 2020, "concepcion").unwrap();
        assert_eq!(stored.value, Some(80.0));
        assert_eq!(stored.location, "Concepción");
    }
}
