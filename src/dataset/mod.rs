//! Streaming CSV record source
//!
//! Reads a materials dataset one row at a time. The first row is always
//! a header. Fields that are missing or unparseable read as zero and the
//! row is reported as malformed instead of aborting the run.

mod columns;

pub use columns::{normalize_header, ColumnMap, Field};

use crate::config::DatasetConfig;
use crate::error::{RankError, RankResult};
use crate::models::MaterialRecord;
use crate::scoring::RowOutcome;
use csv::{ByteRecord, ByteRecordsIntoIter, ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Longest material name kept; longer names are truncated
pub const MAX_NAME_CHARS: usize = 99;

/// Lazy sequence of parsed rows from a dataset
pub struct DatasetReader<R: Read> {
    path: PathBuf,
    rows: ByteRecordsIntoIter<R>,
    columns: ColumnMap,
}

impl DatasetReader<File> {
    /// Open a dataset file and resolve its columns
    pub fn open(path: &Path, config: &DatasetConfig) -> RankResult<Self> {
        let file = File::open(path).map_err(|source| RankError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Opened dataset {}", path.display());
        Self::from_reader(file, path, config)
    }
}

impl<R: Read> DatasetReader<R> {
    /// Read a dataset from any byte source; `path` is used in messages only
    pub fn from_reader(reader: R, path: &Path, config: &DatasetConfig) -> RankResult<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .byte_headers()
            .map_err(|e| source_error(path, e))?
            .iter()
            .map(|h| String::from_utf8_lossy(h).into_owned())
            .collect();

        let columns = ColumnMap::resolve(config.layout, &headers, &config.columns);

        Ok(Self {
            path: path.to_path_buf(),
            rows: csv_reader.into_byte_records(),
            columns,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn columns(&self) -> &ColumnMap {
        &self.columns
    }
}

impl<R: Read> Iterator for DatasetReader<R> {
    type Item = RankResult<RowOutcome>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        Some(
            row.map(|record| parse_row(&record, &self.columns))
                .map_err(|e| source_error(&self.path, e)),
        )
    }
}

/// Map a csv failure onto the source error, keeping the I/O cause when there is one
fn source_error(path: &Path, err: csv::Error) -> RankError {
    let source = match err.into_kind() {
        csv::ErrorKind::Io(io) => io,
        other => std::io::Error::new(std::io::ErrorKind::InvalidData, format!("{other:?}")),
    };
    RankError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    }
}

/// Parse one data row; bad fields fall back to zero
pub fn parse_row(row: &ByteRecord, columns: &ColumnMap) -> RowOutcome {
    let line = row.position().map(|p| p.line()).unwrap_or(0);
    let mut bad_fields: Vec<&'static str> = Vec::new();
    let mut record = MaterialRecord::default();

    for field in Field::ALL {
        let Some(idx) = columns.index(field) else {
            continue;
        };
        let Some(raw) = row.get(idx) else {
            bad_fields.push(field.key());
            continue;
        };
        let cell = String::from_utf8_lossy(raw);
        let cell = cell.trim();
        if cell.is_empty() {
            continue;
        }

        match field {
            Field::Name => record.name = truncate_name(cell),
            Field::Cluster => match parse_cluster(cell) {
                Some(cluster) => record.cluster = cluster,
                None => bad_fields.push(field.key()),
            },
            _ => match parse_number(cell, is_element(field)) {
                Some(value) => set_number(&mut record, field, value),
                None => bad_fields.push(field.key()),
            },
        }
    }

    let malformed = !bad_fields.is_empty();
    if malformed {
        warn!(
            "Line {}: defaulted {} to 0 ({})",
            line,
            bad_fields.join(", "),
            if record.name.is_empty() { "unnamed" } else { record.name.as_str() }
        );
    }

    RowOutcome { record, malformed }
}

fn truncate_name(cell: &str) -> String {
    cell.chars().take(MAX_NAME_CHARS).collect()
}

/// Integer tag; a float such as `7.0` is truncated
fn parse_cluster(cell: &str) -> Option<i64> {
    cell.parse::<i64>().ok().or_else(|| {
        cell.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| v.trunc() as i64)
    })
}

/// Finite number; element fractions must also be non-negative
fn parse_number(cell: &str, non_negative: bool) -> Option<f64> {
    cell.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .filter(|v| !non_negative || *v >= 0.0)
}

fn is_element(field: Field) -> bool {
    !matches!(
        field,
        Field::Name
            | Field::Cluster
            | Field::YieldStrength
            | Field::TensileStrength
            | Field::Ductility
    )
}

fn set_number(record: &mut MaterialRecord, field: Field, value: f64) {
    match field {
        Field::Chromium => record.chromium = value,
        Field::Nickel => record.nickel = value,
        Field::Molybdenum => record.molybdenum = value,
        Field::Manganese => record.manganese = value,
        Field::Silicon => record.silicon = value,
        Field::Vanadium => record.vanadium = value,
        Field::Niobium => record.niobium = value,
        Field::Titanium => record.titanium = value,
        Field::YieldStrength => record.yield_strength = value,
        Field::TensileStrength => record.tensile_strength = value,
        Field::Ductility => record.ductility = value,
        Field::Name | Field::Cluster => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnLayout;

    const HEADER: &str = "name,cluster,Cr,Ni,Mo,Mn,Si,V,Nb,Ti,yield,tensile,ductility\n";

    fn read(csv: &str, config: &DatasetConfig) -> Vec<RowOutcome> {
        DatasetReader::from_reader(csv.as_bytes(), Path::new("test.csv"), config)
            .unwrap()
            .collect::<RankResult<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_reads_rows_by_header() {
        let csv = format!("{HEADER}Alloy-X,7,10,5,2,1,1,0,0,0,1200,1350,30\n");
        let rows = read(&csv, &DatasetConfig::default());

        assert_eq!(rows.len(), 1);
        let r = &rows[0].record;
        assert!(!rows[0].malformed);
        assert_eq!(r.name, "Alloy-X");
        assert_eq!(r.cluster, 7);
        assert_eq!(r.chromium, 10.0);
        assert_eq!(r.manganese, 1.0);
        assert_eq!(r.alloy_index(), 19.0);
        assert_eq!(r.yield_strength, 1200.0);
        assert_eq!(r.tensile_strength, 1350.0);
        assert_eq!(r.ductility, 30.0);
    }

    #[test]
    fn test_header_only_yields_nothing() {
        assert!(read(HEADER, &DatasetConfig::default()).is_empty());
        assert!(read("", &DatasetConfig::default()).is_empty());
    }

    #[test]
    fn test_column_order_does_not_matter() {
        let csv = "ductility,yield,name,cr\n25,800,Reordered,4.5\n";
        let rows = read(csv, &DatasetConfig::default());
        let r = &rows[0].record;
        assert_eq!(r.name, "Reordered");
        assert_eq!(r.ductility, 25.0);
        assert_eq!(r.yield_strength, 800.0);
        assert_eq!(r.chromium, 4.5);
        // Absent columns read as zero without marking the row
        assert_eq!(r.nickel, 0.0);
        assert!(!rows[0].malformed);
    }

    #[test]
    fn test_malformed_fields_default_to_zero() {
        let csv = format!("{HEADER}Bad,x,abc,5,2,1,1,0,0,0,NaN,1350,30\n");
        let rows = read(&csv, &DatasetConfig::default());
        let row = &rows[0];
        assert!(row.malformed);
        assert_eq!(row.record.cluster, 0);
        assert_eq!(row.record.chromium, 0.0);
        assert_eq!(row.record.yield_strength, 0.0);
        assert_eq!(row.record.nickel, 5.0);
        assert_eq!(row.record.ductility, 30.0);
    }

    #[test]
    fn test_short_row_is_malformed() {
        let csv = format!("{HEADER}Short,3,1,1\n");
        let rows = read(&csv, &DatasetConfig::default());
        assert!(rows[0].malformed);
        assert_eq!(rows[0].record.name, "Short");
        assert_eq!(rows[0].record.nickel, 1.0);
        assert_eq!(rows[0].record.yield_strength, 0.0);
    }

    #[test]
    fn test_empty_cells_are_zero_not_malformed() {
        let csv = format!("{HEADER}Sparse,2,,,,,,,,,500,,\n");
        let rows = read(&csv, &DatasetConfig::default());
        assert!(!rows[0].malformed);
        assert_eq!(rows[0].record.yield_strength, 500.0);
        assert_eq!(rows[0].record.alloy_index(), 0.0);
    }

    #[test]
    fn test_negative_element_fraction_rejected() {
        let csv = format!("{HEADER}Neg,2,-3,1,0,0,0,0,0,0,500,600,10\n");
        let rows = read(&csv, &DatasetConfig::default());
        assert!(rows[0].malformed);
        assert_eq!(rows[0].record.chromium, 0.0);
        assert_eq!(rows[0].record.nickel, 1.0);
    }

    #[test]
    fn test_float_cluster_truncated() {
        let csv = format!("{HEADER}F,7.0,0,0,0,0,0,0,0,0,0,0,0\n");
        let rows = read(&csv, &DatasetConfig::default());
        assert_eq!(rows[0].record.cluster, 7);
        assert!(!rows[0].malformed);
    }

    #[test]
    fn test_long_name_truncated() {
        let long = "A".repeat(150);
        let csv = format!("{HEADER}{long},1,0,0,0,0,0,0,0,0,0,0,0\n");
        let rows = read(&csv, &DatasetConfig::default());
        assert_eq!(rows[0].record.name.chars().count(), MAX_NAME_CHARS);
    }

    #[test]
    fn test_quoted_name_with_comma() {
        let csv = format!("{HEADER}\"Steel, annealed\",4,1,0,0,0,0,0,0,0,400,500,20\n");
        let rows = read(&csv, &DatasetConfig::default());
        assert_eq!(rows[0].record.name, "Steel, annealed");
        assert_eq!(rows[0].record.cluster, 4);
    }

    #[test]
    fn test_positional_layout() {
        let mut cells = vec!["0"; 26];
        cells[0] = "Legacy";
        cells[1] = "skip";
        cells[2] = "6";
        cells[5] = "12"; // Cr
        cells[9] = "8"; // Ni
        cells[21] = "900"; // yield
        cells[23] = "1100"; // tensile
        cells[25] = "18"; // ductility
        let header: Vec<String> = (0..26).map(|i| format!("c{i}")).collect();
        let csv = format!("{}\n{}\n", header.join(","), cells.join(","));

        let config = DatasetConfig {
            layout: ColumnLayout::Positional,
            ..Default::default()
        };
        let rows = read(&csv, &config);
        let r = &rows[0].record;
        assert_eq!(r.name, "Legacy");
        assert_eq!(r.cluster, 6);
        assert_eq!(r.chromium, 12.0);
        assert_eq!(r.nickel, 8.0);
        assert_eq!(r.yield_strength, 900.0);
        assert_eq!(r.tensile_strength, 1100.0);
        assert_eq!(r.ductility, 18.0);
        assert!(!rows[0].malformed);
    }

    #[test]
    fn test_open_missing_file_is_source_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.csv");
        let err = DatasetReader::open(&missing, &DatasetConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, RankError::SourceUnavailable { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_open_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alloys.csv");
        std::fs::write(&path, format!("{HEADER}A,1,0,0,0,0,0,0,0,0,100,200,5\n")).unwrap();

        let reader = DatasetReader::open(&path, &DatasetConfig::default()).unwrap();
        assert_eq!(reader.path(), path.as_path());
        assert_eq!(reader.count(), 1);
    }
}
