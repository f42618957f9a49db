use csv_lens_common::{CsvLensError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CmpOp { Eq, Lt, Gt }

impl CmpOp {
    /// operator characters in the order they are tried
    const PRECEDENCE: [(char, CmpOp); 3] = [('=', CmpOp::Eq), ('<', CmpOp::Lt), ('>', CmpOp::Gt)];

    pub fn symbol(self) -> char {
        match self {
            CmpOp::Eq => '=',
            CmpOp::Lt => '<',
            CmpOp::Gt => '>',
        }
    }
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single `column <op> literal` condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    pub column: String,
    pub op: CmpOp,
    pub literal: String,
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.column, self.op, self.literal)
    }
}

/// Parses `column=value`, `column<value` or `column>value`.
///
/// If `=` appears anywhere it is the operator, else `<`, else `>`. The
/// expression is split at the first occurrence of that character and both
/// halves are trimmed. Neither half is validated.
pub fn parse_predicate(expr: &str) -> Result<Predicate> {
    for (ch, op) in CmpOp::PRECEDENCE {
        if let Some((left, right)) = expr.split_once(ch) {
            return Ok(Predicate {
                column: left.trim().to_owned(),
                op,
                literal: right.trim().to_owned(),
            });
        }
    }
    Err(CsvLensError::InvalidFilterSyntax(expr.to_owned()))
}

impl FromStr for Predicate {
    type Err = CsvLensError;
    fn from_str(s: &str) -> Result<Self> {
        parse_predicate(s)
    }
}
