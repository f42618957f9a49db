use clap::{ArgAction, Parser};
use csv_lens_common::config::parse_delimiter;
use csv_lens_common::{CompareMode, Config, MalformedRowPolicy, OutputFormat};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "csv-lens", version, about = "Read a CSV file, filter and aggregate it, print it as a table")]
pub struct Cli {
    /// Path to the CSV file
    #[arg(long)]
    pub file: PathBuf,
    /// Filter as column=value, column<value or column>value
    #[arg(long = "where", value_name = "EXPR")]
    pub where_expr: Option<String>,
    /// Aggregate as column=min|max|avg
    #[arg(long, value_name = "EXPR")]
    pub aggregate: Option<String>,
    /// table, json or csv [default: table]
    #[arg(long)]
    pub format: Option<OutputFormat>,
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Rows whose field count differs from the header: fail, skip or pad [default: fail]
    #[arg(long)]
    pub malformed: Option<MalformedRowPolicy>,
    /// Compare as numbers when both sides parse as numbers; --numeric=false forces string order
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub numeric: Option<bool>,
    /// -v for info, -vv for debug logging
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// flags win over environment settings
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(format) = self.format {
            config.display.format = format;
        }
        if let Some(delimiter) = self.delimiter {
            config.loader.delimiter = delimiter;
        }
        if let Some(policy) = self.malformed {
            config.loader.malformed_rows = policy;
        }
        if let Some(numeric) = self.numeric {
            config.filter.compare = if numeric { CompareMode::Numeric } else { CompareMode::Lexicographic };
        }
    }

    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
