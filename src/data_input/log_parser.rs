// src/data_input/log_parser.rs

use csv::ReaderBuilder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::data_input::log_data::{PsuRow, PsuTable, TtsRow, TtsTable};
use crate::error::{AnalysisError, AnalysisResult};

const TTS_HEADERS: [&str; 4] = ["Timestamp", "DShot_cmd", "Thrust", "Omega"];
const PSU_HEADERS: [&str; 3] = ["Timestamp", "Voltage", "Current"];

/// Reads the named columns from a headered CSV source.
///
/// Returns one `Vec<f64>` per requested column, in request order. Extra
/// columns are ignored. A missing column or a non-numeric cell is an error.
pub fn read_columns<R: Read>(
    reader: R,
    source: &Path,
    target_headers: &[&str],
) -> AnalysisResult<Vec<Vec<f64>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let header_record = reader.headers()?.clone();

    let header_indices: Vec<usize> = target_headers
        .iter()
        .map(|&target| {
            header_record
                .iter()
                .position(|h| h.trim() == target)
                .ok_or_else(|| AnalysisError::MissingColumn {
                    path: source.to_path_buf(),
                    column: target.to_string(),
                })
        })
        .collect::<AnalysisResult<_>>()?;

    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); target_headers.len()];
    for (row_index, result) in reader.records().enumerate() {
        let record = result?;
        for (target_idx, &csv_idx) in header_indices.iter().enumerate() {
            let cell = record.get(csv_idx).unwrap_or("");
            let value = cell.parse::<f64>().map_err(|_| AnalysisError::InvalidCell {
                path: source.to_path_buf(),
                row: row_index + 1,
                column: target_headers[target_idx].to_string(),
                value: cell.to_string(),
            })?;
            columns[target_idx].push(value);
        }
    }
    Ok(columns)
}

pub fn parse_tts_csv<R: Read>(reader: R, source: &Path) -> AnalysisResult<TtsTable> {
    let columns = read_columns(reader, source, &TTS_HEADERS)?;
    let rows = (0..columns[0].len())
        .map(|i| TtsRow {
            timestamp: columns[0][i],
            dshot_cmd: columns[1][i],
            thrust: columns[2][i],
            omega: columns[3][i],
        })
        .collect();
    Ok(TtsTable {
        source: source.to_path_buf(),
        rows,
    })
}

pub fn parse_psu_csv<R: Read>(reader: R, source: &Path) -> AnalysisResult<PsuTable> {
    let columns = read_columns(reader, source, &PSU_HEADERS)?;
    let rows = (0..columns[0].len())
        .map(|i| PsuRow {
            timestamp: columns[0][i],
            voltage: columns[1][i],
            current: columns[2][i],
        })
        .collect();
    Ok(PsuTable {
        source: source.to_path_buf(),
        rows,
    })
}

/// Parses a thrust-test-stand log file.
pub fn parse_tts_file(path: &Path) -> AnalysisResult<TtsTable> {
    let file = File::open(path)?;
    let table = parse_tts_csv(BufReader::new(file), path)?;
    log::debug!("Read {} thrust-test rows from {}", table.rows.len(), path.display());
    Ok(table)
}

/// Parses a power-supply log file.
pub fn parse_psu_file(path: &Path) -> AnalysisResult<PsuTable> {
    let file = File::open(path)?;
    let table = parse_psu_csv(BufReader::new(file), path)?;
    log::debug!("Read {} power-supply rows from {}", table.rows.len(), path.display());
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tts_ignores_extra_columns() {
        let csv = "Timestamp,DShot_cmd,Thrust,Voltage,Omega\n\
                   1700000000.5, 50, 12.5, 16.2, 310.0\n\
                   1700000003.5,100,30.25,16.1,620.5\n";
        let table = parse_tts_csv(csv.as_bytes(), Path::new("run.csv")).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(
            table.rows[1],
            TtsRow {
                timestamp: 1700000003.5,
                dshot_cmd: 100.0,
                thrust: 30.25,
                omega: 620.5
            }
        );
    }

    #[test]
    fn test_parse_psu_trims_headers() {
        let csv = " Timestamp , Voltage , Current \n0.0, 10.0, 1.0\n1.05,10.0,2.0\n";
        let table = parse_psu_csv(csv.as_bytes(), Path::new("psu.csv")).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].timestamp, 1.05);
        assert_eq!(table.rows[1].current, 2.0);
    }

    #[test]
    fn test_missing_column_is_error() {
        let csv = "Timestamp,Voltage\n0.0,10.0\n";
        match parse_psu_csv(csv.as_bytes(), Path::new("psu.csv")) {
            Err(AnalysisError::MissingColumn { column, .. }) => assert_eq!(column, "Current"),
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_cell_is_error() {
        let csv = "Timestamp,DShot_cmd,Thrust,Omega\n0.0,50,abc,300\n";
        match parse_tts_csv(csv.as_bytes(), Path::new("tts.csv")) {
            Err(AnalysisError::InvalidCell { row, column, value, .. }) => {
                assert_eq!(row, 1);
                assert_eq!(column, "Thrust");
                assert_eq!(value, "abc");
            }
            other => panic!("expected InvalidCell, got {:?}", other),
        }
    }

    #[test]
    fn test_header_only_file_has_no_rows() {
        let csv = "Timestamp,Voltage,Current\n";
        let table = parse_psu_csv(csv.as_bytes(), Path::new("psu.csv")).unwrap();
        assert!(table.rows.is_empty());
    }
}

// src/data_input/log_parser.rs
