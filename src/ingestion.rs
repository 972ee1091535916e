//! # Dataset Ingestion Module
//!
//! ## Purpose
//! Loads the tab-separated place dataset into the records the index is
//! built from. Loading is all-or-nothing: any malformed row aborts with an
//! error naming the offending line, so the server never starts on a
//! partially loaded dataset.
//!
//! ## Input/Output Specification
//! - **Input**: GeoNames-style TSV with a header row (id, name, ...,
//!   latitude, longitude, ..., country code, ..., admin1 code)
//! - **Output**: `Vec<Record>` with rendered display labels
//!
//! ## Key Features
//! - Parsing is generic over `BufRead`, so tests feed in-memory data
//! - Coordinate fields must parse; no silent defaults
//! - Line numbers in every parse error

use crate::errors::{Result, SuggestError};
use crate::Record;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

// id, name, asciiname, alternatenames, latitude, longitude, feature class,
// feature code, country code, cc2, admin1 code
const MIN_COLUMNS: usize = 11;

const COL_ID: usize = 0;
const COL_NAME: usize = 1;
const COL_LATITUDE: usize = 4;
const COL_LONGITUDE: usize = 5;
const COL_COUNTRY: usize = 8;
const COL_ADMIN1: usize = 10;

/// Read the dataset file at `path` into records
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let records = parse_records(BufReader::new(file))?;

    tracing::info!(
        "Loaded {} records from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

/// Parse TSV content into records, skipping the header row
pub fn parse_records<R: BufRead>(reader: R) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    let mut lines = reader.lines();

    // header row
    if lines.next().transpose()?.is_none() {
        return Ok(records);
    }

    for (index, line) in lines.enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }

        // header is line 1, data starts at line 2
        records.push(parse_line(line, index + 2)?);
    }

    Ok(records)
}

fn parse_line(line: &str, line_number: usize) -> Result<Record> {
    let columns: Vec<&str> = line.split('\t').collect();
    if columns.len() < MIN_COLUMNS {
        return Err(SuggestError::MalformedRecord {
            line: line_number,
            details: format!(
                "expected at least {} columns, found {}",
                MIN_COLUMNS,
                columns.len()
            ),
        });
    }

    let latitude = parse_coordinate(columns[COL_LATITUDE], "latitude", line_number)?;
    let longitude = parse_coordinate(columns[COL_LONGITUDE], "longitude", line_number)?;

    Ok(Record {
        id: columns[COL_ID].to_string(),
        name: columns[COL_NAME].to_string(),
        display_name: format!(
            "{}, {}, {}",
            columns[COL_NAME], columns[COL_ADMIN1], columns[COL_COUNTRY]
        ),
        latitude,
        longitude,
        region: columns[COL_COUNTRY].to_string(),
    })
}

fn parse_coordinate(value: &str, field: &str, line_number: usize) -> Result<f64> {
    value.parse().map_err(|_| SuggestError::MalformedRecord {
        line: line_number,
        details: format!("{} {:?} is not a number", field, value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::io::Write;

    const HEADER: &str = "id\tname\tascii\talternate\tlat\tlong\tfeat class\tfeat code\tcountry\tcc2\tadmin1";

    fn row(id: &str, name: &str, lat: &str, long: &str, country: &str, admin1: &str) -> String {
        format!("{id}\t{name}\t{name}\t\t{lat}\t{long}\tP\tPPL\t{country}\t\t{admin1}")
    }

    fn dataset(rows: &[String]) -> String {
        let mut out = String::from(HEADER);
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out.push('\n');
        out
    }

    #[test]
    fn parses_well_formed_rows() {
        let data = dataset(&[
            row("6174041", "Victoria", "48.43294", "-123.3693", "CA", "02"),
            row("5406602", "Vista", "33.20004", "-117.24254", "US", "CA"),
        ]);

        let records = parse_records(Cursor::new(data)).unwrap();
        assert_eq!(records.len(), 2);

        let victoria = &records[0];
        assert_eq!(victoria.id, "6174041");
        assert_eq!(victoria.name, "Victoria");
        assert_eq!(victoria.display_name, "Victoria, 02, CA");
        assert_eq!(victoria.latitude, 48.43294);
        assert_eq!(victoria.longitude, -123.3693);
        assert_eq!(victoria.region, "CA");

        assert_eq!(records[1].display_name, "Vista, CA, US");
    }

    #[test]
    fn malformed_latitude_aborts_with_line_number() {
        let data = dataset(&[
            row("1", "Victoria", "48.43", "-123.37", "CA", "02"),
            row("2", "Vista", "north", "-117.24", "US", "CA"),
        ]);

        let err = parse_records(Cursor::new(data)).unwrap_err();
        assert!(matches!(
            err,
            SuggestError::MalformedRecord { line: 3, .. }
        ));
    }

    #[test]
    fn short_row_aborts() {
        let data = format!("{HEADER}\n1\tVictoria\t48.43\n");
        let err = parse_records(Cursor::new(data)).unwrap_err();
        assert!(matches!(err, SuggestError::MalformedRecord { line: 2, .. }));
    }

    #[test]
    fn header_only_yields_no_records() {
        let records = parse_records(Cursor::new(format!("{HEADER}\n"))).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn empty_input_yields_no_records() {
        let records = parse_records(Cursor::new("")).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn crlf_line_endings_are_tolerated() {
        let data = format!(
            "{HEADER}\r\n{}\r\n",
            row("1", "Victoria", "48.43", "-123.37", "CA", "02")
        );
        let records = parse_records(Cursor::new(data)).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Victoria");
    }

    #[test]
    fn load_dataset_reads_from_a_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "{}",
            dataset(&[row("1", "Victoria", "48.43", "-123.37", "CA", "02")])
        )
        .unwrap();

        let records = load_dataset(file.path()).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_dataset("/does/not/exist.tsv").unwrap_err();
        assert!(matches!(err, SuggestError::Io(_)));
    }
}
