use crate::dataset::{Dataset, Record};
use crate::predicate::{CmpOp, Predicate};
use csv_lens_common::CompareMode;
use log::debug;
use std::cmp::Ordering;

impl Predicate {
    /// True when the record holds the column and its value satisfies the predicate.
    pub fn matches(&self, record: &Record, mode: CompareMode) -> bool {
        match record.get(&self.column) {
            Some(cell) => compare(cell, self.op, &self.literal, mode),
            None => false,
        }
    }
}

fn compare(cell: &str, op: CmpOp, literal: &str, mode: CompareMode) -> bool {
    let ord = match mode {
        CompareMode::Lexicographic => cell.cmp(literal),
        CompareMode::Numeric => match (cell.trim().parse::<f64>(), literal.parse::<f64>()) {
            // NaN never compares, so it never matches
            (Ok(a), Ok(b)) => match a.partial_cmp(&b) {
                Some(o) => o,
                None => return false,
            },
            _ => cell.cmp(literal),
        },
    };
    match op {
        CmpOp::Eq => ord == Ordering::Equal,
        CmpOp::Lt => ord == Ordering::Less,
        CmpOp::Gt => ord == Ordering::Greater,
    }
}

/// Keeps the records matching `predicate`, in their original order.
pub fn filter_records(dataset: &Dataset, predicate: &Predicate, mode: CompareMode) -> Dataset {
    let kept: Vec<Record> = dataset
        .records()
        .iter()
        .filter(|r| predicate.matches(r, mode))
        .cloned()
        .collect();
    debug!("filter {predicate}: kept {} of {} rows", kept.len(), dataset.len());
    Dataset::new(dataset.columns().to_vec(), kept)
}
