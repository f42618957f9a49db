pub mod config;
pub use config::{CompareMode, Config, DisplayConfig, FilterConfig, LoaderConfig, MalformedRowPolicy, OutputFormat};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CsvLensError {
    #[error("File {} not found.", .0.display())]
    NotFound(PathBuf),
    #[error("invalid filter '{0}': use column=value, column<value or column>value")]
    InvalidFilterSyntax(String),
    #[error("invalid aggregate '{0}': use column=function")]
    InvalidAggregateSyntax(String),
    #[error("unknown aggregate function '{0}' (use min, max or avg)")]
    UnknownAggregateFunction(String),
    #[error("column '{0}' not found")]
    MissingColumn(String),
    #[error("column '{column}' is not numeric: row {row} has value '{value}'")]
    NonNumericColumn { column: String, row: usize, value: String },
    #[error("cannot aggregate column '{0}' over zero rows")]
    EmptyAggregate(String),
    #[error("line {line}: expected {expected} fields, found {found}")]
    MalformedRow { line: u64, expected: usize, found: usize },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Other(String),
}

impl CsvLensError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CsvLensError::NotFound(_))
    }

    /// process exit status for a run that failed with this error
    pub fn exit_code(&self) -> u8 {
        if self.is_not_found() { 2 } else { 1 }
    }
}

pub type Result<T> = std::result::Result<T, CsvLensError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test] fn not_found_message() { let e = CsvLensError::NotFound(PathBuf::from("data.csv")); assert_eq!(e.to_string(), "File data.csv not found."); }
    #[test] fn not_found_exit_code() { assert_eq!(CsvLensError::NotFound(PathBuf::from("x")).exit_code(), 2); }
    #[test] fn other_exit_code() { assert_eq!(CsvLensError::EmptyAggregate("price".into()).exit_code(), 1); }
    #[test] fn non_numeric_message() {
        let e = CsvLensError::NonNumericColumn { column: "name".into(), row: 3, value: "abc".into() };
        assert_eq!(e.to_string(), "column 'name' is not numeric: row 3 has value 'abc'");
    }
}
