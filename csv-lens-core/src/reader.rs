use crate::dataset::{Dataset, Record};
use csv_lens_common::{CsvLensError, LoaderConfig, MalformedRowPolicy, Result};
use log::{debug, warn};
use std::io::Read;
use std::path::Path;

/// Loads a delimited file whose first line names the columns.
pub fn load_csv(path: &Path, config: &LoaderConfig) -> Result<Dataset> {
    if !path.exists() {
        return Err(CsvLensError::NotFound(path.to_path_buf()));
    }
    let file = std::fs::File::open(path)?;
    let dataset = read_csv(file, config)?;
    debug!("loaded {} rows x {} columns from {}", dataset.len(), dataset.columns().len(), path.display());
    Ok(dataset)
}

/// Same as [`load_csv`] over any reader; handy for stdin and tests.
pub fn read_csv<R: Read>(source: R, config: &LoaderConfig) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(true)
        .flexible(true) // field-count mismatches are handled by MalformedRowPolicy
        .from_reader(source);
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_owned()).collect();
    let width = headers.len();
    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        if row.len() != width {
            match config.malformed_rows {
                MalformedRowPolicy::Fail => {
                    return Err(CsvLensError::MalformedRow { line, expected: width, found: row.len() });
                }
                MalformedRowPolicy::Skip => {
                    warn!("line {line}: skipping row with {} fields (header has {width})", row.len());
                    continue;
                }
                MalformedRowPolicy::Pad => {
                    warn!("line {line}: padding row with {} fields to {width}", row.len());
                }
            }
        }
        let cells = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), row.get(i).unwrap_or("").to_owned()));
        records.push(Record::from_pairs(cells));
    }
    Ok(Dataset::new(headers, records))
}
