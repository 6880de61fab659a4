// ============================================================
// Layer 4 — CSV Loader
// ============================================================
// Reads a CSV file with a header row using the csv crate.
//
// Expected layout:
//   f1,f2,...,label
//   0.3,1.2,...,cat
//
// The 'label' column may sit anywhere in the header. Every
// other column is parsed as an f32 feature; a cell that is
// empty, non-numeric or non-finite is rejected with its row
// and column so the user can fix the file.

use std::{fs::File, io::Read, path::PathBuf};

use csv::{ReaderBuilder, Trim};

use crate::domain::{error::DataError, table::Table, traits::TableSource};

/// Name of the column holding the class label.
pub const LABEL_COLUMN: &str = "label";

/// Loads a labelled table from a CSV file on disk.
pub struct CsvLoader {
    path: PathBuf,
}

impl CsvLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TableSource for CsvLoader {
    fn load(&self) -> Result<Table, DataError> {
        let file  = File::open(&self.path)?;
        let table = parse_table(file)?;

        tracing::info!(
            "Loaded '{}': {} rows, {} features",
            self.path.display(),
            table.num_rows(),
            table.num_features()
        );
        Ok(table)
    }
}

/// Parse CSV text from any reader into a [`Table`].
pub fn parse_table<R: Read>(reader: R) -> Result<Table, DataError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers   = rdr.headers()?.clone();
    let label_idx = headers
        .iter()
        .position(|h| h == LABEL_COLUMN)
        .ok_or_else(|| DataError::MissingLabelColumn(LABEL_COLUMN.to_string()))?;

    let feature_names: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != label_idx)
        .map(|(_, h)| h.to_string())
        .collect();

    if feature_names.is_empty() {
        return Err(DataError::NoFeatures(LABEL_COLUMN.to_string()));
    }

    let mut features = Vec::new();
    let mut labels   = Vec::new();

    for (row_idx, record) in rdr.records().enumerate() {
        let record = record?;
        let mut row = Vec::with_capacity(feature_names.len());

        for (col_idx, cell) in record.iter().enumerate() {
            if col_idx == label_idx {
                labels.push(cell.to_string());
                continue;
            }
            let value = cell
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| DataError::InvalidNumber {
                    row:    row_idx + 1,
                    column: headers.get(col_idx).unwrap_or_default().to_string(),
                    value:  cell.to_string(),
                })?;
            row.push(value);
        }
        features.push(row);
    }

    if labels.is_empty() {
        return Err(DataError::Empty);
    }

    Ok(Table::new(feature_names, features, labels))
}
