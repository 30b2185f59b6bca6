//! Truth tables, brute-force equivalence and model counting.
//!
//! Everything here enumerates all `2^n` assignments of the variables
//! involved, so the cost is exponential in `n`. No bound is enforced; keep
//! the number of variables small.

use std::collections::HashMap;

use log::debug;
use num_bigint::BigUint;

use crate::error::{Error, Result};
use crate::expr::Expr;
use crate::value::Value;

/// Iterator over all assignments of a list of variables.
///
/// The first variable is the most significant: the first assignment is
/// all-false and the last is all-true.
pub struct Assignments {
    variables: Vec<String>,
    bits: Option<Vec<bool>>,
}

impl Assignments {
    pub fn new<S: AsRef<str>>(variables: &[S]) -> Self {
        Self {
            variables: variables.iter().map(|v| v.as_ref().to_string()).collect(),
            bits: Some(vec![false; variables.len()]),
        }
    }
}

impl Iterator for Assignments {
    type Item = HashMap<String, bool>;

    fn next(&mut self) -> Option<Self::Item> {
        let bits = self.bits.as_mut()?;
        let item = self.variables.iter().cloned().zip(bits.iter().copied()).collect();

        // Binary increment from the least significant (last) variable.
        let mut i = bits.len();
        loop {
            if i == 0 {
                self.bits = None;
                break;
            }
            i -= 1;
            bits[i] = !bits[i];
            if bits[i] {
                break;
            }
        }

        Some(item)
    }
}

/// Ordered union of the free variables of both expressions.
pub fn shared_variables(a: &Expr, b: &Expr) -> Vec<String> {
    let mut vars = a.variables();
    for v in b.variables() {
        if !vars.contains(&v) {
            vars.push(v);
        }
    }
    vars
}

/// Semantic equivalence by truth-table enumeration over the union of free variables.
pub fn is_equal(a: &Expr, b: &Expr) -> Result<bool> {
    let vars = shared_variables(a, b);
    debug!("is_equal(a = {}, b = {}, vars = {:?})", a, b, vars);
    for assignment in Assignments::new(&vars) {
        if a.evaluate(&assignment)? != b.evaluate(&assignment)? {
            debug!("is_equal: differ at {:?}", assignment);
            return Ok(false);
        }
    }
    Ok(true)
}

/// Number of assignments of `variables` satisfying `expr`.
pub fn sat_count<S: AsRef<str>>(expr: &Expr, variables: &[S]) -> Result<BigUint> {
    let mut count = BigUint::ZERO;
    for assignment in Assignments::new(variables) {
        if expr.evaluate(&assignment)? {
            count += 1u32;
        }
    }
    Ok(count)
}

pub fn is_tautology(expr: &Expr) -> Result<bool> {
    for assignment in Assignments::new(&expr.variables()) {
        if !expr.evaluate(&assignment)? {
            return Ok(false);
        }
    }
    Ok(true)
}

pub fn is_satisfiable(expr: &Expr) -> Result<bool> {
    for assignment in Assignments::new(&expr.variables()) {
        if expr.evaluate(&assignment)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// A multi-output truth table with rows of equal width.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TruthTable {
    inputs: Vec<Vec<bool>>,
    outputs: Vec<Vec<bool>>,
}

impl TruthTable {
    /// Full truth table of `expr` over `variables`, one output column.
    pub fn from_expr<S: AsRef<str>>(expr: &Expr, variables: &[S]) -> Result<Self> {
        let mut inputs = Vec::new();
        let mut outputs = Vec::new();
        for assignment in Assignments::new(variables) {
            let row: Vec<bool> = variables.iter().map(|v| assignment[v.as_ref()]).collect();
            outputs.push(vec![expr.evaluate(&assignment)?]);
            inputs.push(row);
        }
        Ok(Self { inputs, outputs })
    }

    /// Validates and converts caller-supplied rows.
    ///
    /// Both tables must be non-empty, have the same number of rows, and each
    /// must have a constant non-zero row width.
    pub fn from_rows(inputs: &[Vec<Value>], outputs: &[Vec<Value>]) -> Result<Self> {
        if inputs.is_empty() || outputs.is_empty() {
            return Err(Error::EmptyTable);
        }
        if inputs.len() != outputs.len() {
            return Err(Error::RowCountMismatch {
                inputs: inputs.len(),
                outputs: outputs.len(),
            });
        }
        Ok(Self {
            inputs: convert_rows(inputs)?,
            outputs: convert_rows(outputs)?,
        })
    }

    pub fn rows(&self) -> usize {
        self.inputs.len()
    }

    pub fn input_width(&self) -> usize {
        self.inputs.first().map_or(0, Vec::len)
    }

    pub fn output_width(&self) -> usize {
        self.outputs.first().map_or(0, Vec::len)
    }

    pub fn inputs(&self) -> &[Vec<bool>] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Vec<bool>] {
        &self.outputs
    }

    /// Values of output column `j`, one per row.
    pub fn output_column(&self, j: usize) -> Vec<bool> {
        self.outputs.iter().map(|row| row[j]).collect()
    }
}

fn convert_rows(rows: &[Vec<Value>]) -> Result<Vec<Vec<bool>>> {
    let expected = rows[0].len();
    if expected == 0 {
        return Err(Error::EmptyTable);
    }
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            if row.len() != expected {
                return Err(Error::RowWidthMismatch {
                    row: i,
                    expected,
                    found: row.len(),
                });
            }
            row.iter().map(|v| v.truth()).collect()
        })
        .collect()
}
