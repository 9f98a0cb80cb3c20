// src/data_input/series_parser.rs

use csv::ReaderBuilder;
use ndarray::{Array2, ShapeError};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

use crate::types::SeriesTable;

#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("Expected {expected} columns but got {found} in line: {line}")]
    MalformedRow {
        expected: usize,
        found: usize,
        line: String,
    },
    #[error("Invalid number '{field}' on line {line_number}: {line}")]
    InvalidNumber {
        line_number: usize,
        field: String,
        line: String,
    },
    #[error("Failed to split line {line_number}: {source}")]
    Csv {
        line_number: usize,
        #[source]
        source: csv::Error,
    },
    #[error("Failed to read series file: {0}")]
    Io(#[from] io::Error),
    #[error("Parsed values do not fill a {rows} x {cols} table: {source}")]
    Shape {
        rows: usize,
        cols: usize,
        #[source]
        source: ShapeError,
    },
}

/// Loads a bracketed, comma-separated text file into a rows x `num_cols` table.
///
/// Blank lines are skipped. The whole load fails on the first malformed line,
/// so a caller never sees a partially filled table.
pub fn load_series(input_file_path: &Path, num_cols: usize) -> Result<SeriesTable, SeriesError> {
    let file = File::open(input_file_path)?;
    let reader = BufReader::new(file);
    let table = parse_lines(reader.lines(), num_cols)?;
    log::info!(
        "Loaded {} rows x {} columns from {}",
        table.nrows(),
        table.ncols(),
        input_file_path.display()
    );
    Ok(table)
}

/// Same as [`load_series`] for text already in memory.
pub fn parse_series(text: &str, num_cols: usize) -> Result<SeriesTable, SeriesError> {
    parse_lines(text.lines().map(|l| Ok(l.to_string())), num_cols)
}

fn parse_lines<I>(lines: I, num_cols: usize) -> Result<SeriesTable, SeriesError>
where
    I: Iterator<Item = io::Result<String>>,
{
    let mut values: Vec<f64> = Vec::new();
    let mut row_count = 0usize;

    for (line_index, line_result) in lines.enumerate() {
        let line = line_result?;
        let trimmed_line = line.trim();
        if trimmed_line.is_empty() {
            continue;
        }

        let fields = split_row_fields(trimmed_line, line_index + 1)?;
        if fields.len() != num_cols {
            return Err(SeriesError::MalformedRow {
                expected: num_cols,
                found: fields.len(),
                line,
            });
        }

        for field in fields {
            let value = field.parse::<f64>().map_err(|_| SeriesError::InvalidNumber {
                line_number: line_index + 1,
                field: field.clone(),
                line: line.clone(),
            })?;
            values.push(value);
        }
        row_count += 1;
    }

    build_table(values, row_count, num_cols)
}

fn build_table(values: Vec<f64>, rows: usize, cols: usize) -> Result<SeriesTable, SeriesError> {
    Array2::from_shape_vec((rows, cols), values)
        .map_err(|source| SeriesError::Shape { rows, cols, source })
}

/// Strips trailing/leading commas then brackets, and splits the rest on commas.
/// Empty fields are dropped, so `[1, 2, 3,]` yields three fields.
/// Quotes are kept as field text, so a quoted number is not a number.
fn split_row_fields(trimmed_line: &str, line_number: usize) -> Result<Vec<String>, SeriesError> {
    let stripped = trimmed_line
        .trim_matches(',')
        .trim_matches(&['[', ']'][..]);

    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .quoting(false)
        .from_reader(stripped.as_bytes());

    match rdr.records().next() {
        Some(Ok(record)) => Ok(record
            .iter()
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect()),
        Some(Err(source)) => Err(SeriesError::Csv {
            line_number,
            source,
        }),
        None => Ok(Vec::new()),
    }
}


// src/data_input/series_parser.rs
