//! Karnaugh maps for functions of 2, 3 or 4 variables.
//!
//! The caller's variable list is split into row variables and column
//! variables (1/1, 1/2 or 2/2). Rows and columns are indexed by reflected
//! Gray codes over their variables, so adjacent cells (including across the
//! edges of the map, which is a torus) differ in exactly one variable.
//!
//! ```text
//! x \ yz   00  01  11  10
//!   0       .   .   .   .
//!   1       .   1   1   1      x & (y | z)
//! ```

use std::fmt::{Display, Formatter};

use log::debug;

use crate::error::{Error, Result};
use crate::expr::Expr;
use crate::gray::gray_code;

/// Number of row and column variables for a map over `n` variables.
pub fn split_variables(n: usize) -> Result<(usize, usize)> {
    match n {
        2 => Ok((1, 1)),
        3 => Ok((1, 2)),
        4 => Ok((2, 2)),
        _ => Err(Error::UnsupportedVariableCount(n)),
    }
}

/// Position of a single cell together with its Gray codes.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub row_code: String,
    pub col_code: String,
}

#[derive(Debug, Clone)]
pub struct KarnaughMap {
    variables: Vec<String>,
    row_vars: usize,
    row_codes: Vec<String>,
    col_codes: Vec<String>,
    grid: Vec<Vec<bool>>,
}

impl KarnaughMap {
    /// Builds the map of `expr` over `variables`.
    ///
    /// Fails if there are not 2, 3 or 4 variables, or if `expr` mentions a
    /// variable missing from the list.
    pub fn new<S: AsRef<str>>(expr: &Expr, variables: &[S]) -> Result<Self> {
        let variables: Vec<String> = variables.iter().map(|v| v.as_ref().to_string()).collect();
        debug!("karnaugh(expr = {}, variables = {:?})", expr, variables);

        let (row_vars, col_vars) = split_variables(variables.len())?;
        let row_codes = gray_code(row_vars);
        let col_codes = gray_code(col_vars);

        let mut grid = Vec::with_capacity(row_codes.len());
        for row_code in &row_codes {
            let mut row = Vec::with_capacity(col_codes.len());
            for col_code in &col_codes {
                let bits: Vec<bool> = row_code.bytes().chain(col_code.bytes()).map(|b| b == b'1').collect();
                let lookup = |name: &str| variables.iter().position(|v| v == name).map(|i| bits[i]);
                row.push(expr.evaluate_with(&lookup)?);
            }
            grid.push(row);
        }

        Ok(Self {
            variables,
            row_vars,
            row_codes,
            col_codes,
            grid,
        })
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn row_variables(&self) -> &[String] {
        &self.variables[..self.row_vars]
    }

    pub fn col_variables(&self) -> &[String] {
        &self.variables[self.row_vars..]
    }

    pub fn rows(&self) -> usize {
        self.row_codes.len()
    }

    pub fn cols(&self) -> usize {
        self.col_codes.len()
    }

    pub fn row_codes(&self) -> &[String] {
        &self.row_codes
    }

    pub fn col_codes(&self) -> &[String] {
        &self.col_codes
    }

    pub fn value(&self, row: usize, col: usize) -> bool {
        self.grid[row][col]
    }

    pub fn grid(&self) -> &[Vec<bool>] {
        &self.grid
    }

    pub fn into_grid(self) -> Vec<Vec<bool>> {
        self.grid
    }

    pub fn cell(&self, row: usize, col: usize) -> Cell {
        Cell {
            row,
            col,
            row_code: self.row_codes[row].clone(),
            col_code: self.col_codes[col].clone(),
        }
    }

    /// Coordinates of all `1` cells, in row-major order.
    pub fn ones(&self) -> Vec<(usize, usize)> {
        let mut ones = Vec::new();
        for (r, row) in self.grid.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                if value {
                    ones.push((r, c));
                }
            }
        }
        ones
    }

    /// Value of variable `var` (index into [`variables`][Self::variables]) at the given cell.
    pub fn bit(&self, (row, col): (usize, usize), var: usize) -> bool {
        if var < self.row_vars {
            self.row_codes[row].as_bytes()[var] == b'1'
        } else {
            self.col_codes[col].as_bytes()[var - self.row_vars] == b'1'
        }
    }

    /// Whether two cells are neighbours on the torus: one coordinate equal,
    /// the other one step apart with wrap-around.
    pub fn is_adjacent(&self, a: (usize, usize), b: (usize, usize)) -> bool {
        let dr = cyclic_distance(a.0, b.0, self.rows());
        let dc = cyclic_distance(a.1, b.1, self.cols());
        (dr == 1 && dc == 0) || (dr == 0 && dc == 1)
    }
}

fn cyclic_distance(a: usize, b: usize, n: usize) -> usize {
    let d = a.abs_diff(b);
    d.min(n - d)
}

impl Display for KarnaughMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let header = format!("{} \\ {}", self.row_variables().concat(), self.col_variables().concat());
        write!(f, "{}", header)?;
        for code in &self.col_codes {
            write!(f, " {:>3}", code)?;
        }
        writeln!(f)?;
        for (code, row) in self.row_codes.iter().zip(&self.grid) {
            write!(f, "{:>width$}", code, width = header.len())?;
            for &value in row {
                write!(f, " {:>3}", value as u8)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
