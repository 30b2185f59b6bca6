//! Function synthesis from truth tables.
//!
//! Input columns get the synthetic names `a, b, c, ..., z, aa, ab, ...`.
//! Every output column becomes an expression over those names: the
//! disjunction of the minterms of the rows where the column is `1`,
//! minimized through a Karnaugh map when there are 2 to 4 inputs.

use log::debug;

use crate::error::{Error, Result};
use crate::expr::Expr;
use crate::minimize::minimize;
use crate::simplify::simplify;
use crate::truth::TruthTable;
use crate::value::{Mode, Value};

/// Synthetic name of input column `i`, spreadsheet style.
pub fn variable_name(i: usize) -> String {
    let mut n = i + 1;
    let mut name = String::new();
    while n > 0 {
        n -= 1;
        name.insert(0, char::from(b'a' + (n % 26) as u8));
        n /= 26;
    }
    name
}

/// A synthesized multi-output boolean function.
#[derive(Debug, Clone)]
pub struct Mapping {
    names: Vec<String>,
    columns: Vec<Expr>,
    mode: Mode,
}

impl Mapping {
    /// Synthesizes one expression per output column of `table`.
    pub fn synthesize(table: &TruthTable, mode: Mode) -> Result<Self> {
        let width = table.input_width();
        let names: Vec<String> = (0..width).map(variable_name).collect();
        debug!(
            "mapping(rows = {}, inputs = {}, outputs = {})",
            table.rows(),
            width,
            table.output_width()
        );

        let mut columns = Vec::with_capacity(table.output_width());
        for j in 0..table.output_width() {
            let column = table.output_column(j);
            let expr = if column.iter().all(|&b| !b) {
                Expr::Literal(false)
            } else if column.iter().all(|&b| b) {
                Expr::Literal(true)
            } else {
                let minterms = table
                    .inputs()
                    .iter()
                    .zip(&column)
                    .filter(|(_, &out)| out)
                    .map(|(row, _)| minterm(&names, row));
                let sum = Expr::or_all(minterms);
                if (2..=4).contains(&width) {
                    minimize(&sum, &names)?
                } else {
                    simplify(sum)
                }
            };
            debug!("mapping: column {} = {}", j, expr);
            columns.push(expr);
        }

        Ok(Self { names, columns, mode })
    }

    /// Validates caller rows and synthesizes them.
    ///
    /// Results are presented as bits unless some output cell was given as a `bool`.
    pub fn from_rows(inputs: &[Vec<Value>], outputs: &[Vec<Value>]) -> Result<Self> {
        let table = TruthTable::from_rows(inputs, outputs)?;
        Self::synthesize(&table, Mode::of_values(outputs.iter().flatten()))
    }

    pub fn variables(&self) -> &[String] {
        &self.names
    }

    /// The expression computing each output column.
    pub fn expressions(&self) -> &[Expr] {
        &self.columns
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn arity(&self) -> usize {
        self.names.len()
    }

    /// Evaluates every output column for one row of arguments.
    pub fn call(&self, args: &[bool]) -> Result<Vec<bool>> {
        if args.len() != self.names.len() {
            return Err(Error::ArgumentCount {
                expected: self.names.len(),
                found: args.len(),
            });
        }
        let lookup = |name: &str| self.names.iter().position(|n| n == name).map(|i| args[i]);
        self.columns.iter().map(|e| e.evaluate_with(&lookup)).collect()
    }

    /// Like [`call`][Self::call], but takes and returns caller values.
    pub fn call_values(&self, args: &[Value]) -> Result<Vec<Value>> {
        let args = args.iter().map(|v| v.truth()).collect::<Result<Vec<bool>>>()?;
        Ok(self.call(&args)?.into_iter().map(|b| self.mode.present(b)).collect())
    }

    /// Turns the mapping into a plain closure over caller values.
    pub fn into_fn(self) -> impl Fn(&[Value]) -> Result<Vec<Value>> {
        move |args| self.call_values(args)
    }
}

fn minterm(names: &[String], row: &[bool]) -> Expr {
    Expr::and_all(names.iter().zip(row).map(|(name, &bit)| {
        let var = Expr::var(name.clone());
        if bit {
            var
        } else {
            Expr::not(var)
        }
    }))
}
