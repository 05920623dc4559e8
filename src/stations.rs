//! Weather station registry.
//!
//! Holds the fixed table of known Paraguayan stations with their coordinates,
//! and a mutable registry of the stations that actually appear in the data.
//! Station names are matched by their normalized form everywhere.

use crate::core::ObservationStore;
use crate::error::{PrecipError, Result};
use crate::ingest::ImportBatch;
use crate::names::normalize;
use serde::Serialize;
use tracing::debug;

/// Department assigned when neither the data nor the table names one.
pub const UNKNOWN_DEPARTMENT: &str = "Desconocido";

// ---------------------------------------------------------------------------
// Known stations
// ---------------------------------------------------------------------------

/// Static metadata for a station with published coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnownStation {
    pub name: &'static str,
    /// WGS84 latitude.
    pub latitude: f64,
    /// WGS84 longitude.
    pub longitude: f64,
    pub department: &'static str,
}

/// Stations of the national meteorological network, in lookup order.
pub static KNOWN_STATIONS: &[KnownStation] = &[
    KnownStation { name: "Aeropuerto Internacional Guarani", latitude: -25.4542, longitude: -54.8431, department: "Alto Paraná" },
    KnownStation { name: "Aeropuerto Internacional Silvio Pettirossi", latitude: -25.2403, longitude: -57.5192, department: "Central" },
    KnownStation { name: "Caazapa", latitude: -26.1833, longitude: -56.3667, department: "Caazapá" },
    KnownStation { name: "Capitan Meza", latitude: -26.9167, longitude: -55.4, department: "Itapúa" },
    KnownStation { name: "Cnel. Oviedo", latitude: -25.45, longitude: -56.45, department: "Caaguazú" },
    KnownStation { name: "Concepcion", latitude: -23.4167, longitude: -57.4333, department: "Concepción" },
    // Spelled as in the source exports
    KnownStation { name: "Encarnacio", latitude: -27.3333, longitude: -55.8667, department: "Itapúa" },
    KnownStation { name: "General Bruguez", latitude: -24.75, longitude: -58.8333, department: "Presidente Hayes" },
    KnownStation { name: "Mcal. Estigarribia", latitude: -22.0167, longitude: -60.6167, department: "Boquerón" },
    KnownStation { name: "Paraguari", latitude: -25.6167, longitude: -57.15, department: "Paraguarí" },
    KnownStation { name: "Pedro Juan Caballero", latitude: -22.55, longitude: -55.7333, department: "Amambay" },
    KnownStation { name: "Pilar", latitude: -26.8667, longitude: -58.3, department: "Ñeembucú" },
    KnownStation { name: "Pozo Colorado", latitude: -23.4833, longitude: -58.8, department: "Presidente Hayes" },
    KnownStation { name: "Puerto Casado", latitude: -22.2833, longitude: -57.9333, department: "Alto Paraguay" },
    KnownStation { name: "Quyquyho", latitude: -25.9333, longitude: -56.9333, department: "Paraguarí" },
    KnownStation { name: "Salto del Guaira", latitude: -24.0667, longitude: -54.3, department: "Canindeyú" },
    KnownStation { name: "San Estanislao", latitude: -24.65, longitude: -56.4333, department: "San Pedro" },
    KnownStation { name: "San Juan Bautista", latitude: -26.6667, longitude: -57.15, department: "Misiones" },
    KnownStation { name: "San Pedro", latitude: -24.0833, longitude: -57.0833, department: "San Pedro" },
    KnownStation { name: "Villarrica", latitude: -25.75, longitude: -56.4333, department: "Guairá" },
];

/// Coordinates and department resolved for a station name.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub department: String,
}

/// Resolve a station name against [`KNOWN_STATIONS`].
///
/// The first entry whose normalized name contains, or is contained in, the
/// normalized query wins. Otherwise, or for a query that normalizes to
/// nothing, the coordinates are unknown and `default_department` is used.
pub fn lookup_coordinates(name: &str, default_department: &str) -> Placement {
    let query = normalize(name);
    let found = if query.is_empty() {
        None
    } else {
        KNOWN_STATIONS.iter().find(|s| {
            let key = normalize(s.name);
            key.contains(&query) || query.contains(&key)
        })
    };

    match found {
        Some(s) => Placement {
            latitude: Some(s.latitude),
            longitude: Some(s.longitude),
            department: s.department.to_string(),
        },
        None => Placement {
            latitude: None,
            longitude: None,
            department: default_department.to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// A station known to the service, serialized with the public field names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    pub id: u32,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "latitud")]
    pub latitude: Option<f64>,
    #[serde(rename = "longitud")]
    pub longitude: Option<f64>,
    #[serde(rename = "departamento")]
    pub department: String,
}

/// Mutable set of stations, unique by normalized name.
#[derive(Debug, Clone, Default)]
pub struct StationRegistry {
    stations: Vec<Station>,
    next_id: u32,
}

impl StationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == id)
    }

    /// Find a station by name, ignoring accents, case and punctuation.
    pub fn find(&self, name: &str) -> Option<&Station> {
        let key = normalize(name);
        self.stations.iter().find(|s| normalize(&s.name) == key)
    }

    fn push(&mut self, name: &str, latitude: Option<f64>, longitude: Option<f64>, department: String) -> u32 {
        self.next_id += 1;
        let id = self.next_id;
        self.stations.push(Station {
            id,
            name: name.to_string(),
            latitude,
            longitude,
            department,
        });
        id
    }

    /// Register `name` if no station with the same normalized name exists,
    /// resolving its placement from the known-station table.
    ///
    /// Returns whether a station was created.
    pub fn ensure(&mut self, name: &str, department: Option<&str>) -> bool {
        if self.find(name).is_some() {
            return false;
        }
        let placement = lookup_coordinates(name, department.unwrap_or(UNKNOWN_DEPARTMENT));
        debug!(%name, department = %placement.department, "registering station");
        self.push(name, placement.latitude, placement.longitude, placement.department);
        true
    }

    /// Register every distinct location of the store. Returns the number created.
    pub fn populate(&mut self, store: &ObservationStore) -> usize {
        store
            .locations()
            .into_iter()
            .filter(|name| self.ensure(name, None))
            .count()
    }

    /// Register the locations of an import batch, using each row's department
    /// as the fallback. Returns the number created.
    pub fn register_batch(&mut self, batch: &ImportBatch) -> usize {
        batch
            .records
            .iter()
            .filter(|r| self.ensure(&r.observation.location, r.department.as_deref()))
            .count()
    }

    /// Add a station with explicit placement.
    pub fn add(
        &mut self,
        name: &str,
        latitude: Option<f64>,
        longitude: Option<f64>,
        department: &str,
    ) -> Result<&Station> {
        if name.trim().is_empty() {
            return Err(PrecipError::InvalidParameter(
                "station name must not be empty".to_string(),
            ));
        }
        if self.find(name).is_some() {
            return Err(PrecipError::InvalidParameter(format!(
                "station {:?} already exists",
                name
            )));
        }
        let id = self.push(name, latitude, longitude, department.to_string());
        self.get(id)
            .ok_or_else(|| PrecipError::UnknownStation(id.to_string()))
    }

    /// Replace the coordinates of a station.
    pub fn update_coordinates(
        &mut self,
        id: u32,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<()> {
        let station = self
            .stations
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| PrecipError::UnknownStation(id.to_string()))?;
        station.latitude = latitude;
        station.longitude = longitude;
        Ok(())
    }

    /// Remove a station, returning it.
    pub fn remove(&mut self, id: u32) -> Result<Station> {
        let idx = self
            .stations
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| PrecipError::UnknownStation(id.to_string()))?;
        Ok(self.stations.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Observation;
    use crate::ingest::parse_csv;

    #[test]
    fn table_has_unique_normalized_names() {
        let mut keys: Vec<String> = KNOWN_STATIONS.iter().map(|s| normalize(s.name)).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), KNOWN_STATIONS.len());
        assert_eq!(KNOWN_STATIONS.len(), 20);
    }

    #[test]
    fn lookup_matches_partially_both_ways() {
        let p = lookup_coordinates("Concepción", UNKNOWN_DEPARTMENT);
        assert_eq!(p.latitude, Some(-23.4167));
        assert_eq!(p.department, "Concepción");

        // Query longer than the key
        let p = lookup_coordinates("Encarnación", UNKNOWN_DEPARTMENT);
        assert_eq!(p.department, "Itapúa");

        // Query shorter than the key
        let p = lookup_coordinates("Silvio Pettirossi", UNKNOWN_DEPARTMENT);
        assert_eq!(p.department, "Central");
    }

    #[test]
    fn lookup_falls_back_to_default() {
        let p = lookup_coordinates("Estación Lejana", "Boquerón");
        assert_eq!(p.latitude, None);
        assert_eq!(p.longitude, None);
        assert_eq!(p.department, "Boquerón");

        let p = lookup_coordinates("  ¡! ", "Central");
        assert_eq!(p.department, "Central");
        assert_eq!(p.latitude, None);
    }

    #[test]
    fn populate_creates_one_station_per_location() {
        let mut store = ObservationStore::new();
        store.extend(vec![
            Observation::new("Enero", 2020, Some(1.0), "Pilar"),
            Observation::new("Febrero", 2020, Some(1.0), "PILAR"),
            Observation::new("Enero", 2020, Some(1.0), "Estancia X"),
        ]);
        let mut registry = StationRegistry::new();
        assert_eq!(registry.populate(&store), 2);
        assert_eq!(registry.populate(&store), 0);

        let pilar = registry.find("pilar").unwrap();
        assert_eq!(pilar.department, "Ñeembucú");
        let other = registry.find("Estancia X").unwrap();
        assert_eq!(other.department, UNKNOWN_DEPARTMENT);
    }

    #[test]
    fn batch_department_is_fallback() {
        let batch = parse_csv(
            "Mes;Anho;Precipitacion;Ubicacion;Departamento\n\
             Enero;2020;1;Estancia Z;Alto Paraguay\n",
        );
        let mut registry = StationRegistry::new();
        assert_eq!(registry.register_batch(&batch), 1);
        assert_eq!(registry.find("Estancia Z").unwrap().department, "Alto Paraguay");
    }

    #[test]
    fn add_update_remove() {
        let mut registry = StationRegistry::new();
        let id = registry.add("Nueva", Some(-25.0), Some(-57.0), "Central").unwrap().id;

        let dup = registry.add("NUEVA", None, None, "Central").unwrap_err();
        assert!(matches!(dup, PrecipError::InvalidParameter(_)));

        registry.update_coordinates(id, None, Some(-58.0)).unwrap();
        assert_eq!(registry.get(id).unwrap().latitude, None);
        assert_eq!(registry.get(id).unwrap().longitude, Some(-58.0));

        let removed = registry.remove(id).unwrap();
        assert_eq!(removed.name, "Nueva");
        assert!(registry.is_empty());
        assert_eq!(
            registry.remove(id).unwrap_err(),
            PrecipError::UnknownStation(id.to_string())
        );
        assert!(registry.update_coordinates(id, None, None).is_err());
    }

    #[test]
    fn serializes_with_public_names() {
        let mut registry = StationRegistry::new();
        registry.add("Pilar", Some(-26.8667), Some(-58.3), "Ñeembucú").unwrap();
        let json = serde_json::to_value(&registry.stations()[0]).unwrap();
        assert_eq!(json["nombre"], "Pilar");
        assert_eq!(json["latitud"], -26.8667);
        assert_eq!(json["departamento"], "Ñeembucú");
    }
}
