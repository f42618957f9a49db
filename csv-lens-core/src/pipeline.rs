use crate::aggregate::{aggregate, parse_aggregate, AggregateSpec};
use crate::dataset::Dataset;
use crate::filter::filter_records;
use crate::predicate::{parse_predicate, Predicate};
use crate::reader::load_csv;
use csv_lens_common::{Config, FilterConfig, Result};
use log::info;
use std::path::Path;

/// The optional stages requested for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub filter: Option<Predicate>,
    pub aggregate: Option<AggregateSpec>,
}

impl Query {
    /// Parses the `--where` and `--aggregate` texts independently.
    pub fn parse(where_expr: Option<&str>, aggregate_expr: Option<&str>) -> Result<Self> {
        Ok(Self {
            filter: where_expr.map(parse_predicate).transpose()?,
            aggregate: aggregate_expr.map(parse_aggregate).transpose()?,
        })
    }
}

/// Filter first, then aggregate over what is left.
pub fn apply(dataset: Dataset, query: &Query, config: &FilterConfig) -> Result<Dataset> {
    let dataset = match &query.filter {
        Some(pred) => filter_records(&dataset, pred, config.compare),
        None => dataset,
    };
    match &query.aggregate {
        Some(spec) => aggregate(&dataset, spec),
        None => Ok(dataset),
    }
}

pub fn run_pipeline(path: &Path, query: &Query, config: &Config) -> Result<Dataset> {
    let loaded = load_csv(path, &config.loader)?;
    let total = loaded.len();
    let out = apply(loaded, query, &config.filter)?;
    info!("{}: {total} rows loaded, {} rows out", path.display(), out.len());
    Ok(out)
}
