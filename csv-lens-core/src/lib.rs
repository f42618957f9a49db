pub mod aggregate;
pub mod dataset;
pub mod filter;
pub mod pipeline;
pub mod predicate;
pub mod reader;
pub mod render;

pub use aggregate::{aggregate, compute, format_number, parse_aggregate, AggFunc, AggregateSpec};
pub use csv_lens_common::{
    CompareMode, Config, CsvLensError, DisplayConfig, FilterConfig, LoaderConfig, MalformedRowPolicy, OutputFormat,
    Result,
};
pub use dataset::{Dataset, Record};
pub use filter::filter_records;
pub use pipeline::{apply, run_pipeline, Query};
pub use predicate::{parse_predicate, CmpOp, Predicate};
pub use reader::{load_csv, read_csv};
pub use render::{format_table, render, render_to_string};
