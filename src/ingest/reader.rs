//! CSV parsing for precipitation exports.

use crate::core::Observation;
use crate::error::Result;
use crate::names::canonicalize_month;
use csv::StringRecord;
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

const BOM: char = '\u{feff}';

/// One accepted row: the observation plus the department column, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedRecord {
    pub observation: Observation,
    pub department: Option<String>,
}

/// A row that was left out of the batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRow {
    /// 1-based line number in the input, header included.
    pub line: u64,
    pub reason: String,
}

/// Parsed contents of one CSV export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportBatch {
    pub records: Vec<ImportedRecord>,
    pub skipped: Vec<SkippedRow>,
}

impl ImportBatch {
    pub fn observations(&self) -> impl Iterator<Item = &Observation> {
        self.records.iter().map(|r| &r.observation)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Decode raw file bytes: UTF-8 (leading BOM dropped), else Latin-1.
pub fn decode_bytes(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.strip_prefix(BOM).unwrap_or(text).to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

/// Pick `;` or `,`, whichever is more frequent in the header line.
fn detect_delimiter(header: &str) -> u8 {
    let semicolons = header.matches(';').count();
    let commas = header.matches(',').count();
    if commas > semicolons {
        b','
    } else {
        b';'
    }
}

/// Column positions resolved from the header row.
struct Columns {
    month: Option<usize>,
    year: Option<usize>,
    value: Option<usize>,
    location: Option<usize>,
    department: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Self {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        Self {
            month: find("Mes"),
            year: find("Anho"),
            value: find("Precipitacion"),
            location: find("Ubicacion"),
            department: find("Departamento"),
        }
    }
}

fn field<'r>(record: &'r StringRecord, column: Option<usize>) -> Option<&'r str> {
    column.and_then(|i| record.get(i))
}

fn parse_row(record: &StringRecord, columns: &Columns) -> std::result::Result<ImportedRecord, String> {
    let raw_value = field(record, columns.value).unwrap_or("0").replace(',', ".");
    let raw_value = raw_value.trim();
    let value = if raw_value == "-" {
        None
    } else {
        Some(
            raw_value
                .parse::<f64>()
                .map_err(|_| format!("invalid precipitation value {:?}", raw_value))?,
        )
    };

    let department = field(record, columns.department)
        .map(str::trim)
        .filter(|d| !d.is_empty());
    let location = field(record, columns.location)
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .or(department)
        .ok_or_else(|| "no location".to_string())?;

    let raw_month = field(record, columns.month)
        .ok_or_else(|| "missing month".to_string())?
        .trim();
    let raw_year = field(record, columns.year).ok_or_else(|| "missing year".to_string())?;
    let year = raw_year
        .trim()
        .parse::<i32>()
        .map_err(|_| format!("invalid year {:?}", raw_year))?;
    let month = canonicalize_month(raw_month)
        .ok_or_else(|| format!("unrecognized month {:?}", raw_month))?;

    Ok(ImportedRecord {
        observation: Observation::new(month.name(), year, value, location),
        department: department.map(str::to_string),
    })
}

/// Parse a CSV export with columns `Mes`, `Anho`, `Precipitacion`,
/// `Ubicacion` and `Departamento`.
///
/// Bad rows never fail the batch; they are logged and listed in
/// [`ImportBatch::skipped`].
pub fn parse_csv(content: &str) -> ImportBatch {
    let content = content.strip_prefix(BOM).unwrap_or(content);
    let mut batch = ImportBatch::default();
    let Some(header) = content.lines().next() else {
        return batch;
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(detect_delimiter(header))
        .flexible(true)
        .from_reader(content.as_bytes());

    let columns = match reader.headers() {
        Ok(headers) => Columns::from_headers(headers),
        Err(e) => {
            warn!(error = %e, "unreadable csv header");
            return batch;
        }
    };

    for result in reader.records() {
        let (line, outcome) = match result {
            Ok(record) => (
                record.position().map_or(0, |p| p.line()),
                parse_row(&record, &columns),
            ),
            Err(e) => (
                e.position().map_or(0, |p| p.line()),
                Err(e.to_string()),
            ),
        };
        match outcome {
            Ok(record) => batch.records.push(record),
            Err(reason) => {
                warn!(line, %reason, "skipping csv row");
                batch.skipped.push(SkippedRow { line, reason });
            }
        }
    }

    batch
}

/// Read and parse a CSV export from disk.
pub fn read_csv_file(path: impl AsRef<Path>) -> Result<ImportBatch> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let batch = parse_csv(&decode_bytes(&bytes));
    info!(
        path = %path.display(),
        rows = batch.len(),
        skipped = batch.skipped.len(),
        "csv parsed"
    );
    Ok(batch)
}
