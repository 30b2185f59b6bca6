//! String-level entry points.
//!
//! Each function here parses its textual input, runs one operation from
//! the lower-level modules, and wraps any failure in [`Error::Context`][crate::error::Error::Context] so
//! the message names the operation (`"Error minimizing expression: ..."`).
//! Use [`Error::root`][crate::error::Error::root] to match on the underlying kind.

use std::collections::HashMap;

use log::debug;

use crate::error::{Operation, Result};
use crate::expr::Expr;
use crate::gate::Gate;
use crate::implicant;
use crate::karnaugh::KarnaughMap;
use crate::mapping::Mapping;
use crate::minimize::minimize as minimize_expr;
use crate::normal::{self, Form};
use crate::parser::parse_expr;
use crate::simplify::{simplify, simplify_with_limit, DEFAULT_MAX_PASSES};
use crate::truth::{self, TruthTable};
use crate::value::{Mode, Value};

/// What [`parse`] returns when no values are supplied.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Output {
    /// Canonical simplified text.
    #[default]
    Text,
    /// The simplified tree.
    Ast,
    /// The simplified tree serialized as JSON.
    Json,
}

/// Options for [`parse`].
///
/// ```
/// use logic_rs::engine::{parse, Parsed, ParseConfig};
///
/// let parsed = parse("x & x | false", &ParseConfig::default()).unwrap();
/// assert_eq!(parsed, Parsed::Text("x".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct ParseConfig {
    /// Evaluate under this assignment instead of returning the expression.
    pub values: Option<HashMap<String, Value>>,
    /// Result shape when `values` is `None`.
    pub output: Output,
    /// Upper bound on simplifier passes.
    pub max_passes: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            values: None,
            output: Output::Text,
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

impl ParseConfig {
    pub fn with_values(values: HashMap<String, Value>) -> Self {
        Self {
            values: Some(values),
            ..Self::default()
        }
    }

    pub fn with_output(output: Output) -> Self {
        Self {
            output,
            ..Self::default()
        }
    }
}

/// Result of [`parse`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Parsed {
    Text(String),
    Value(Value),
    Ast(Expr),
    Json(String),
}

/// Parses and simplifies `input`, then evaluates or renders it per `config`.
pub fn parse(input: &str, config: &ParseConfig) -> Result<Parsed> {
    parse_inner(input, config).map_err(|e| e.context(Operation::Parse))
}

fn parse_inner(input: &str, config: &ParseConfig) -> Result<Parsed> {
    debug!("parse(input = {:?})", input);
    let expr = simplify_with_limit(parse_expr(input)?, config.max_passes);

    if let Some(values) = &config.values {
        let assignment = values
            .iter()
            .map(|(name, v)| v.truth().map(|b| (name.clone(), b)))
            .collect::<Result<HashMap<String, bool>>>()?;
        let result = expr.evaluate(&assignment)?;
        return Ok(Parsed::Value(Mode::of_values(values.values()).present(result)));
    }

    Ok(match config.output {
        Output::Text => Parsed::Text(expr.to_string()),
        Output::Ast => Parsed::Ast(expr),
        Output::Json => Parsed::Json(serde_json::to_string(&expr)?),
    })
}

/// Canonical simplified form of `input`.
pub fn parse_to_string(input: &str) -> Result<String> {
    parse_expr(input)
        .map(|e| simplify(e).to_string())
        .map_err(|e| e.context(Operation::Parse))
}

/// Simplified tree of `input`.
pub fn parse_to_ast(input: &str) -> Result<Expr> {
    parse_expr(input).map(simplify).map_err(|e| e.context(Operation::Parse))
}

/// Karnaugh map of `input` over 2, 3 or 4 variables, in Gray-code order.
pub fn karnaugh<S: AsRef<str>>(input: &str, variables: &[S]) -> Result<Vec<Vec<bool>>> {
    parse_expr(input)
        .and_then(|e| KarnaughMap::new(&e, variables))
        .map(KarnaughMap::into_grid)
        .map_err(|e| e.context(Operation::Karnaugh))
}

/// Prime implicant terms of `input`, sorted.
pub fn prime_implicants<S: AsRef<str>>(input: &str, variables: &[S]) -> Result<Vec<String>> {
    parse_expr(input)
        .and_then(|e| implicant::prime_implicants(&e, variables))
        .map_err(|e| e.context(Operation::PrimeImplicants))
}

/// Minimized canonical form of `input`.
pub fn minimize<S: AsRef<str>>(input: &str, variables: &[S]) -> Result<String> {
    parse_expr(input)
        .and_then(|e| minimize_expr(&e, variables))
        .map(|e| e.to_string())
        .map_err(|e| e.context(Operation::Minimize))
}

fn normal_form(input: &str, form: Form) -> Result<String> {
    let expr = simplify(parse_expr(input)?);
    Ok(normal::to_normal_form(expr, form).to_explicit_string())
}

/// Conjunctive normal form of `input`, clauses parenthesized.
pub fn to_cnf(input: &str) -> Result<String> {
    normal_form(input, Form::Cnf).map_err(|e| e.context(Operation::Cnf))
}

/// Disjunctive normal form of `input`, terms parenthesized.
pub fn to_dnf(input: &str) -> Result<String> {
    normal_form(input, Form::Dnf).map_err(|e| e.context(Operation::Dnf))
}

/// Whether both inputs denote the same function.
pub fn is_equal(a: &str, b: &str) -> Result<bool> {
    parse_expr(a)
        .and_then(|a| parse_expr(b).map(|b| (a, b)))
        .and_then(|(a, b)| truth::is_equal(&a, &b))
        .map_err(|e| e.context(Operation::Equivalence))
}

/// Full truth table of `input` over `variables`.
pub fn truth_table<S: AsRef<str>>(input: &str, variables: &[S]) -> Result<TruthTable> {
    parse_expr(input)
        .and_then(|e| TruthTable::from_expr(&e, variables))
        .map_err(|e| e.context(Operation::TruthTable))
}

/// Synthesizes a function from input and output rows.
pub fn mapping(inputs: &[Vec<Value>], outputs: &[Vec<Value>]) -> Result<Mapping> {
    Mapping::from_rows(inputs, outputs).map_err(|e| e.context(Operation::Mapping))
}

/// Applies the gate called `name` (e.g. `"NAND"`) and presents the result in `mode`.
pub fn apply_gate(name: &str, mode: Mode, inputs: &[Value]) -> Result<Value> {
    name.parse::<Gate>()
        .and_then(|g| g.apply(mode, inputs))
        .map_err(|e| e.context(Operation::Gate))
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::error::Error;

    #[test]
    fn test_parse_text() {
        assert_eq!(parse_to_string("x & y | x & z").unwrap(), "x & (y | z)");
        assert_eq!(parse_to_string("!!a").unwrap(), "a");
        assert_eq!(parse_to_string("a | !a").unwrap(), "true");
    }

    #[test]
    fn test_parse_values() {
        let values = HashMap::from([("x".to_string(), Value::Bit(1)), ("y".to_string(), Value::Bit(0))]);
        let parsed = parse("x & !y", &ParseConfig::with_values(values)).unwrap();
        assert_eq!(parsed, Parsed::Value(Value::Bit(1)));

        let values = HashMap::from([("x".to_string(), Value::Bool(true)), ("y".to_string(), Value::Bit(1))]);
        let parsed = parse("x & !y", &ParseConfig::with_values(values)).unwrap();
        assert_eq!(parsed, Parsed::Value(Value::Bool(false)));
    }

    #[test]
    fn test_parse_values_after_simplification() {
        // `y` disappears during simplification and need not be assigned.
        let values = HashMap::from([("x".to_string(), Value::Bool(true))]);
        let parsed = parse("x | y & !y", &ParseConfig::with_values(values)).unwrap();
        assert_eq!(parsed, Parsed::Value(Value::Bool(true)));
    }

    #[test]
    fn test_parse_ast_and_json() {
        let parsed = parse("!!x", &ParseConfig::with_output(Output::Ast)).unwrap();
        assert_eq!(parsed, Parsed::Ast(Expr::var("x")));
        let parsed = parse("!x", &ParseConfig::with_output(Output::Json)).unwrap();
        assert_eq!(parsed, Parsed::Json(r#"{"Not":{"Variable":"x"}}"#.to_string()));
    }

    #[test]
    fn test_error_context() {
        let err = parse_to_string("x & )").unwrap_err();
        assert_eq!(err.to_string(), "Error parsing expression: unexpected token ')'");
        assert!(matches!(err.root(), Error::UnexpectedToken(_)));

        let err = minimize("a", &["a"]).unwrap_err();
        assert!(err.to_string().starts_with("Error minimizing expression: "));
        assert!(matches!(err.root(), Error::UnsupportedVariableCount(1)));
    }

    #[test]
    fn test_normal_forms() {
        assert_eq!(to_dnf("x & (y | z)").unwrap(), "(x & y) | (x & z)");
        assert_eq!(to_cnf("x | y & z").unwrap(), "(x | y) & (x | z)");
    }

    #[test]
    fn test_karnaugh() {
        let grid = karnaugh("a & b", &["a", "b"]).unwrap();
        assert_eq!(grid, vec![vec![false, false], vec![false, true]]);
        let err = karnaugh("a", &["a", "b", "c", "d", "e"]).unwrap_err();
        assert!(matches!(err.root(), Error::UnsupportedVariableCount(5)));
    }

    #[test]
    fn test_gate() {
        let inputs = [Value::Bit(1), Value::Bit(1)];
        assert_eq!(apply_gate("XOR", Mode::Binary, &inputs).unwrap(), Value::Bit(0));
        assert_eq!(apply_gate("nand", Mode::Boolean, &inputs).unwrap(), Value::Bool(false));
        let err = apply_gate("IMPLY", Mode::Binary, &inputs).unwrap_err();
        assert!(matches!(err.root(), Error::UnknownGate(_)));
    }

    #[test]
    fn test_truth_table() {
        let table = truth_table("a | b", &["a", "b"]).unwrap();
        assert_eq!(table.output_column(0), vec![false, true, true, true]);
    }
}
