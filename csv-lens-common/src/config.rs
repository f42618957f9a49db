use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!("unknown format '{other}' (use table, json or csv)")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Csv => "csv",
        })
    }
}

/// What the loader does with a row whose field count differs from the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MalformedRowPolicy {
    #[default]
    Fail,
    Skip,
    /// short rows get empty cells, long rows lose their extra fields
    Pad,
}

impl FromStr for MalformedRowPolicy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail" => Ok(Self::Fail),
            "skip" => Ok(Self::Skip),
            "pad" => Ok(Self::Pad),
            other => Err(format!("unknown malformed-row policy '{other}' (use fail, skip or pad)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CompareMode {
    /// raw string ordering, so "9" > "10"
    #[default]
    Lexicographic,
    /// numeric ordering when both sides parse as numbers, string ordering otherwise
    Numeric,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default = "default_no_data_message")]
    pub no_data_message: String,
}

fn default_no_data_message() -> String {
    "No data to display.".into()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            no_data_message: default_no_data_message(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    #[serde(default = "default_delimiter")]
    pub delimiter: u8,
    #[serde(default)]
    pub malformed_rows: MalformedRowPolicy,
}

fn default_delimiter() -> u8 {
    b','
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            malformed_rows: MalformedRowPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FilterConfig {
    #[serde(default)]
    pub compare: CompareMode,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub loader: LoaderConfig,
    #[serde(default)]
    pub filter: FilterConfig,
}

/// Accepts a single ASCII character, or `tab` / `\t`.
pub fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "tab" | "\\t" | "\t" => return Ok(b'\t'),
        _ => {}
    }
    let bytes = s.as_bytes();
    if bytes.len() == 1 && bytes[0].is_ascii() {
        Ok(bytes[0])
    } else {
        Err(format!("delimiter must be a single ASCII character, got '{s}'"))
    }
}

fn parse_flag(s: &str) -> Result<bool, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(format!("expected a boolean, got '{other}'")),
    }
}

impl Config {
    /// Defaults with `CSV_LENS_*` environment overrides applied.
    pub fn from_env() -> crate::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> crate::Result<Self> {
        let mut cfg = Self::default();
        if let Some(v) = lookup("CSV_LENS_FORMAT") {
            cfg.display.format = v.parse().map_err(env_err("CSV_LENS_FORMAT"))?;
        }
        if let Some(v) = lookup("CSV_LENS_DELIMITER") {
            cfg.loader.delimiter = parse_delimiter(&v).map_err(env_err("CSV_LENS_DELIMITER"))?;
        }
        if let Some(v) = lookup("CSV_LENS_MALFORMED") {
            cfg.loader.malformed_rows = v.parse().map_err(env_err("CSV_LENS_MALFORMED"))?;
        }
        if let Some(v) = lookup("CSV_LENS_NUMERIC") {
            if parse_flag(&v).map_err(env_err("CSV_LENS_NUMERIC"))? {
                cfg.filter.compare = CompareMode::Numeric;
            }
        }
        Ok(cfg)
    }
}

fn env_err(key: &'static str) -> impl Fn(String) -> crate::CsvLensError {
    move |msg| crate::CsvLensError::Other(format!("${key}: {msg}"))
}
