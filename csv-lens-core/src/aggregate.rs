use crate::dataset::{Dataset, Record};
use csv_lens_common::{CsvLensError, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggFunc { Min, Max, Avg }

impl AggFunc {
    pub fn name(self) -> &'static str {
        match self {
            AggFunc::Min => "min",
            AggFunc::Max => "max",
            AggFunc::Avg => "avg",
        }
    }
}

impl fmt::Display for AggFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AggFunc {
    type Err = CsvLensError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "min" => Ok(AggFunc::Min),
            "max" => Ok(AggFunc::Max),
            "avg" => Ok(AggFunc::Avg),
            _ => Err(CsvLensError::UnknownAggregateFunction(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateSpec {
    pub column: String,
    pub func: AggFunc,
}

impl fmt::Display for AggregateSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.column, self.func)
    }
}

/// Parses `column=function`, splitting at the first `=`.
pub fn parse_aggregate(expr: &str) -> Result<AggregateSpec> {
    let (column, func) = expr
        .split_once('=')
        .ok_or_else(|| CsvLensError::InvalidAggregateSyntax(expr.to_owned()))?;
    Ok(AggregateSpec { column: column.trim().to_owned(), func: func.trim().parse()? })
}

impl FromStr for AggregateSpec {
    type Err = CsvLensError;
    fn from_str(s: &str) -> Result<Self> {
        parse_aggregate(s)
    }
}

// running min/max/sum over one column
struct Accumulator {
    min: f64,
    max: f64,
    sum: f64,
    count: u64,
}

impl Accumulator {
    fn new() -> Self {
        Self { min: f64::INFINITY, max: f64::NEG_INFINITY, sum: 0.0, count: 0 }
    }
    fn add(&mut self, v: f64) {
        self.min = self.min.min(v);
        self.max = self.max.max(v);
        self.sum += v;
        self.count += 1;
    }
    fn finish(&self, func: AggFunc) -> f64 {
        match func {
            AggFunc::Min => self.min,
            AggFunc::Max => self.max,
            AggFunc::Avg => self.sum / self.count as f64,
        }
    }
}

/// Reduces `spec.column` to one statistic.
///
/// Every record must hold the column and a value parseable as a number;
/// the first that does not aborts the whole aggregation.
pub fn compute(dataset: &Dataset, spec: &AggregateSpec) -> Result<f64> {
    if dataset.is_empty() {
        return Err(CsvLensError::EmptyAggregate(spec.column.clone()));
    }
    let mut acc = Accumulator::new();
    for (row, record) in dataset.records().iter().enumerate() {
        let raw = record
            .get(&spec.column)
            .ok_or_else(|| CsvLensError::MissingColumn(spec.column.clone()))?;
        let v: f64 = raw.trim().parse().map_err(|_| CsvLensError::NonNumericColumn {
            column: spec.column.clone(),
            row,
            value: raw.to_owned(),
        })?;
        acc.add(v);
    }
    let value = acc.finish(spec.func);
    debug!("aggregate {spec} over {} rows = {value}", acc.count);
    Ok(value)
}

/// Replaces the dataset with a single `{function: value}` record.
pub fn aggregate(dataset: &Dataset, spec: &AggregateSpec) -> Result<Dataset> {
    let value = compute(dataset, spec)?;
    let name = spec.func.name();
    Ok(Dataset::new(
        vec![name.to_owned()],
        vec![Record::from_pairs([(name, format_number(value))])],
    ))
}

/// Integral values keep a trailing `.0`; everything else uses the shortest
/// representation that round-trips.
pub fn format_number(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phones() -> Dataset {
        Dataset::from_records(vec![
            Record::from_pairs([("name", "iPhone 15"), ("brand", "apple"), ("price", "999")]),
            Record::from_pairs([("name", "Galaxy S23"), ("brand", "samsung"), ("price", "1199")]),
        ])
    }

    fn agg(expr: &str) -> Result<Dataset> { aggregate(&phones(), &parse_aggregate(expr).unwrap()) }
    fn value(ds: &Dataset, key: &str) -> String { ds.records()[0].get(key).unwrap().to_owned() }

    #[test] fn min() { assert_eq!(value(&agg("price=min").unwrap(), "min"), "999.0"); }
    #[test] fn max() { assert_eq!(value(&agg("price=max").unwrap(), "max"), "1199.0"); }
    #[test] fn avg() { assert_eq!(value(&agg("price=avg").unwrap(), "avg"), "1099.0"); }

    #[test]
    fn result_has_one_record_one_key() {
        let ds = agg("price=avg").unwrap();
        assert_eq!(ds.columns(), &["avg"]);
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records()[0].len(), 1);
    }

    #[test]
    fn avg_of_single_value_is_exact() {
        let ds = Dataset::from_records(vec![Record::from_pairs([("x", "0.1")])]);
        let v = compute(&ds, &parse_aggregate("x=avg").unwrap()).unwrap();
        assert_eq!(v, 0.1);
    }

    #[test]
    fn empty_dataset_fails_for_every_function() {
        let ds = Dataset::new(vec!["price".into()], Vec::new());
        for expr in ["price=min", "price=max", "price=avg"] {
            let err = aggregate(&ds, &parse_aggregate(expr).unwrap()).unwrap_err();
            assert!(matches!(err, CsvLensError::EmptyAggregate(ref c) if c == "price"));
        }
    }

    #[test]
    fn non_numeric_reports_row_and_value() {
        match agg("name=max") {
            Err(CsvLensError::NonNumericColumn { column, row, value }) => {
                assert_eq!((column.as_str(), row, value.as_str()), ("name", 0, "iPhone 15"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn one_bad_row_fails_whole_aggregate() {
        let ds = Dataset::from_records(vec![
            Record::from_pairs([("p", "1")]),
            Record::from_pairs([("p", "n/a")]),
        ]);
        let err = compute(&ds, &parse_aggregate("p=min").unwrap()).unwrap_err();
        assert!(matches!(err, CsvLensError::NonNumericColumn { row: 1, .. }));
    }

    #[test]
    fn missing_column_errors() {
        assert!(matches!(agg("weight=avg"), Err(CsvLensError::MissingColumn(ref c)) if c == "weight"));
    }

    #[test]
    fn padded_whitespace_parses() {
        let ds = Dataset::from_records(vec![Record::from_pairs([("p", " 2.5 ")]), Record::from_pairs([("p", "-1")])]);
        assert_eq!(compute(&ds, &parse_aggregate("p=min").unwrap()).unwrap(), -1.0);
    }

    #[test] fn parse_trims() { assert_eq!(parse_aggregate(" price = avg ").unwrap(), AggregateSpec { column: "price".into(), func: AggFunc::Avg }); }
    #[test] fn parse_case_insensitive() { assert_eq!(parse_aggregate("price=MAX").unwrap().func, AggFunc::Max); }
    #[test] fn parse_without_eq() { assert!(matches!(parse_aggregate("price"), Err(CsvLensError::InvalidAggregateSyntax(_)))); }
    #[test] fn parse_unknown_function() { assert!(matches!(parse_aggregate("price=sum"), Err(CsvLensError::UnknownAggregateFunction(ref f)) if f == "sum")); }
    #[test] fn parse_extra_eq_goes_to_function() { assert!(matches!(parse_aggregate("a=b=min"), Err(CsvLensError::UnknownAggregateFunction(_)))); }

    #[test] fn format_integral() { assert_eq!(format_number(1099.0), "1099.0"); }
    #[test] fn format_fraction() { assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004"); }
    #[test] fn format_large_integral() { assert_eq!(format_number(1e20), "100000000000000000000.0"); }
    #[test] fn format_negative() { assert_eq!(format_number(-3.0), "-3.0"); }
    #[test] fn format_infinite() { assert_eq!(format_number(f64::INFINITY), "inf"); }
}
