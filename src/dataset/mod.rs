//! CSV loading into a [`Table`].
//!
//! The loader reads a header row naming the columns, collects every record as
//! strings, then infers one declared type per column:
//!
//! - all non-missing cells parse as `i64` → [`ColumnType::Int`]
//! - otherwise all parse as `f64` → [`ColumnType::Float`]
//! - otherwise → [`ColumnType::Categorical`]
//!
//! Empty cells and the markers `NA`, `NaN`, `null` (case-insensitive) are
//! treated as missing.

use crate::error::PipelineError;
use crate::table::{Column, ColumnType, Table, Value};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Whether a raw cell denotes a missing value.
fn is_missing(cell: &str) -> bool {
    let trimmed = cell.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("na") || trimmed.eq_ignore_ascii_case("nan")
        || trimmed.eq_ignore_ascii_case("null")
}

/// Infer the declared type for one column of raw cells.
fn infer_type(cells: &[Option<String>]) -> ColumnType {
    let present: Vec<&str> = cells.iter().flatten().map(String::as_str).collect();
    if present.is_empty() {
        return ColumnType::Categorical;
    }
    if present.iter().all(|c| c.trim().parse::<i64>().is_ok()) {
        ColumnType::Int
    } else if present.iter().all(|c| c.trim().parse::<f64>().is_ok()) {
        ColumnType::Float
    } else {
        ColumnType::Categorical
    }
}

fn parse_cell(cell: &str, dtype: ColumnType) -> Value {
    let trimmed = cell.trim();
    match dtype {
        // Parses cannot fail here: inference already checked every cell.
        ColumnType::Int => Value::Int(trimmed.parse().unwrap_or_default()),
        ColumnType::Float => Value::Float(trimmed.parse().unwrap_or_default()),
        ColumnType::Categorical => Value::Str(trimmed.to_string()),
    }
}

/// Load a comma-separated file with a header row into a [`Table`].
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Table, PipelineError> {
    let file = File::open(path.as_ref())?;
    let mut rdr = ReaderBuilder::new().from_reader(BufReader::new(file));

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    // Collect column-wise raw cells, missing markers folded to None.
    let mut raw: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    for result in rdr.records() {
        let record = result?;
        if record.len() != headers.len() {
            return Err(PipelineError::config(
                "loader",
                format!(
                    "record has {} fields, expected {}",
                    record.len(),
                    headers.len()
                ),
            ));
        }
        for (col, cell) in record.iter().enumerate() {
            raw[col].push(if is_missing(cell) {
                None
            } else {
                Some(cell.to_string())
            });
        }
    }

    let mut columns = Vec::with_capacity(headers.len());
    for (name, cells) in headers.into_iter().zip(raw) {
        let dtype = infer_type(&cells);
        let values = cells
            .into_iter()
            .map(|c| c.map(|c| parse_cell(&c, dtype)))
            .collect();
        columns.push(Column::new(name, dtype, values));
    }

    Table::new(columns)
}
