//! Boolean expression trees.
//!
//! [`Expr`] is a closed sum type over constants, named variables and the
//! three fundamental connectives. Trees are immutable values: every
//! transformation in this crate consumes or borrows a tree and builds a new one.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::ops::{BitAnd, BitOr, Not};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A Boolean expression over string-named variables.
///
/// ```
/// use std::collections::HashMap;
/// use logic_rs::expr::Expr;
///
/// let e = Expr::var("x") & !Expr::var("y");
/// assert_eq!(e.to_string(), "x & !y");
///
/// let values = HashMap::from([("x".to_string(), true), ("y".to_string(), false)]);
/// assert!(e.evaluate(&values).unwrap());
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Expr {
    Literal(bool),
    Variable(String),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

// Constructors
impl Expr {
    pub fn constant(value: bool) -> Self {
        Expr::Literal(value)
    }

    pub fn var(name: impl Into<String>) -> Self {
        Expr::Variable(name.into())
    }

    pub fn not(e: Expr) -> Self {
        Expr::Not(Box::new(e))
    }

    pub fn and(lhs: Expr, rhs: Expr) -> Self {
        Expr::And(Box::new(lhs), Box::new(rhs))
    }

    pub fn or(lhs: Expr, rhs: Expr) -> Self {
        Expr::Or(Box::new(lhs), Box::new(rhs))
    }

    /// Left-associated conjunction of all factors, or `true` if there are none.
    pub fn and_all(factors: impl IntoIterator<Item = Expr>) -> Self {
        factors
            .into_iter()
            .reduce(Expr::and)
            .unwrap_or(Expr::Literal(true))
    }

    /// Left-associated disjunction of all terms, or `false` if there are none.
    pub fn or_all(terms: impl IntoIterator<Item = Expr>) -> Self {
        terms.into_iter().reduce(Expr::or).unwrap_or(Expr::Literal(false))
    }
}

// Queries
impl Expr {
    pub fn is_literal(&self) -> bool {
        matches!(self, Expr::Literal(_))
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Expr::Variable(_))
    }

    pub fn is_and(&self) -> bool {
        matches!(self, Expr::And(_, _))
    }

    pub fn is_or(&self) -> bool {
        matches!(self, Expr::Or(_, _))
    }

    /// Returns the constant value if this node is a literal.
    pub fn as_literal(&self) -> Option<bool> {
        match self {
            Expr::Literal(b) => Some(*b),
            _ => None,
        }
    }

    /// Structural equality: same shape and same leaves.
    ///
    /// Two semantically equivalent trees such as `x & y` and `y & x` are
    /// *not* structurally equal. For semantic equivalence see
    /// [`is_equal`][crate::truth::is_equal].
    pub fn same_structure(&self, other: &Expr) -> bool {
        self == other
    }

    /// Returns `true` if one side is the negation of the other, i.e. `x` and `!x`.
    pub fn is_complement_of(&self, other: &Expr) -> bool {
        fn negates(a: &Expr, b: &Expr) -> bool {
            matches!(a, Expr::Not(inner) if inner.same_structure(b))
        }
        negates(self, other) || negates(other, self)
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        match self {
            Expr::Literal(_) | Expr::Variable(_) => 1,
            Expr::Not(x) => 1 + x.size(),
            Expr::And(a, b) | Expr::Or(a, b) => 1 + a.size() + b.size(),
        }
    }

    /// Free variables in first-seen (left-to-right) order, without duplicates.
    pub fn variables(&self) -> Vec<String> {
        let mut vars = Vec::new();
        self.collect_variables(&mut vars);
        vars
    }

    fn collect_variables(&self, vars: &mut Vec<String>) {
        match self {
            Expr::Literal(_) => {}
            Expr::Variable(name) => {
                if !vars.contains(name) {
                    vars.push(name.clone());
                }
            }
            Expr::Not(x) => x.collect_variables(vars),
            Expr::And(a, b) | Expr::Or(a, b) => {
                a.collect_variables(vars);
                b.collect_variables(vars);
            }
        }
    }

    /// Flattens a chain of `And` nodes into its factors, left to right.
    pub fn and_factors(&self) -> Vec<&Expr> {
        let mut factors = Vec::new();
        self.collect_and_factors(&mut factors);
        factors
    }

    fn collect_and_factors<'a>(&'a self, factors: &mut Vec<&'a Expr>) {
        match self {
            Expr::And(a, b) => {
                a.collect_and_factors(factors);
                b.collect_and_factors(factors);
            }
            e => factors.push(e),
        }
    }

    /// Flattens a chain of `Or` nodes into its terms, left to right.
    pub fn or_terms(&self) -> Vec<&Expr> {
        let mut terms = Vec::new();
        self.collect_or_terms(&mut terms);
        terms
    }

    fn collect_or_terms<'a>(&'a self, terms: &mut Vec<&'a Expr>) {
        match self {
            Expr::Or(a, b) => {
                a.collect_or_terms(terms);
                b.collect_or_terms(terms);
            }
            e => terms.push(e),
        }
    }
}

// Evaluation
impl Expr {
    /// Evaluates the expression under the given assignment.
    ///
    /// Fails with [`Error::UnboundVariable`] if a variable is missing from `values`.
    /// Both operands of binary nodes are always evaluated.
    pub fn evaluate(&self, values: &HashMap<String, bool>) -> Result<bool> {
        self.evaluate_with(&|name: &str| values.get(name).copied())
    }

    /// Evaluates the expression using `lookup` to resolve variables.
    pub fn evaluate_with<F>(&self, lookup: &F) -> Result<bool>
    where
        F: Fn(&str) -> Option<bool>,
    {
        match self {
            Expr::Literal(b) => Ok(*b),
            Expr::Variable(name) => lookup(name).ok_or_else(|| Error::UnboundVariable(name.clone())),
            Expr::Not(x) => Ok(!x.evaluate_with(lookup)?),
            Expr::And(a, b) => {
                let a = a.evaluate_with(lookup)?;
                let b = b.evaluate_with(lookup)?;
                Ok(a & b)
            }
            Expr::Or(a, b) => {
                let a = a.evaluate_with(lookup)?;
                let b = b.evaluate_with(lookup)?;
                Ok(a | b)
            }
        }
    }
}

impl Not for Expr {
    type Output = Self;

    fn not(self) -> Self::Output {
        Expr::not(self)
    }
}

impl BitAnd for Expr {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Expr::and(self, rhs)
    }
}

impl BitOr for Expr {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Expr::or(self, rhs)
    }
}

// Printing

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Style {
    /// Fewest parentheses that keep precedence: only `Or` under `And` is wrapped.
    Canonical,
    /// Additionally wraps `And` under `Or`, making clauses and terms of normal forms explicit.
    Explicit,
}

impl Expr {
    /// Renders the expression with every clause (or term) of a normal form
    /// parenthesized, e.g. `(x & y) | (x & z)`.
    pub fn to_explicit_string(&self) -> String {
        Explicit(self).to_string()
    }
}

/// [`Display`] adapter for the explicit style.
struct Explicit<'a>(&'a Expr);

impl Display for Explicit<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write_expr(f, self.0, Style::Explicit)
    }
}

fn write_expr(f: &mut impl std::fmt::Write, expr: &Expr, style: Style) -> std::fmt::Result {
    match expr {
        Expr::Literal(b) => write!(f, "{}", b),
        Expr::Variable(name) => write!(f, "{}", name),
        Expr::Not(x) => {
            if x.is_variable() {
                write!(f, "!")?;
                write_expr(f, x, style)
            } else {
                write!(f, "!(")?;
                write_expr(f, x, style)?;
                write!(f, ")")
            }
        }
        Expr::And(a, b) => {
            write_operand(f, a, a.is_or(), style)?;
            write!(f, " & ")?;
            write_operand(f, b, b.is_or(), style)
        }
        Expr::Or(a, b) => {
            let wrap = style == Style::Explicit;
            write_operand(f, a, wrap && a.is_and(), style)?;
            write!(f, " | ")?;
            write_operand(f, b, wrap && b.is_and(), style)
        }
    }
}

fn write_operand(f: &mut impl std::fmt::Write, expr: &Expr, wrap: bool, style: Style) -> std::fmt::Result {
    if wrap {
        write!(f, "(")?;
        write_expr(f, expr, style)?;
        write!(f, ")")
    } else {
        write_expr(f, expr, style)
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write_expr(f, self, Style::Canonical)
    }
}
