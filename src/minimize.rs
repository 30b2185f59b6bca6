//! Karnaugh-map based minimization.

use std::collections::HashMap;

use log::debug;

use crate::error::Result;
use crate::expr::Expr;
use crate::implicant::{prime_implicant_groups_with, Cover, GreedyCover};
use crate::karnaugh::KarnaughMap;
use crate::simplify::simplify;

/// Minimizes `expr` over `variables` using the greedy cover.
///
/// With no variables the expression is evaluated directly. Otherwise there
/// must be 2, 3 or 4 variables.
pub fn minimize<S: AsRef<str>>(expr: &Expr, variables: &[S]) -> Result<Expr> {
    minimize_with(expr, variables, &GreedyCover)
}

/// Minimizes `expr` over `variables`, choosing implicants with `cover`.
///
/// The chosen terms are joined with `Or` and run through the simplifier,
/// which factors out common literals (`x & y | x & z` becomes `x & (y | z)`).
pub fn minimize_with<S: AsRef<str>>(expr: &Expr, variables: &[S], cover: &impl Cover) -> Result<Expr> {
    if variables.is_empty() {
        return Ok(Expr::Literal(expr.evaluate(&HashMap::new())?));
    }

    let map = KarnaughMap::new(expr, variables)?;
    let groups = prime_implicant_groups_with(&map, cover);
    debug!("minimize: {} implicants", groups.len());

    if groups.is_empty() {
        return Ok(Expr::Literal(false));
    }
    if groups.iter().any(|g| g.literals.is_empty()) {
        return Ok(Expr::Literal(true));
    }

    let sum = Expr::or_all(groups.iter().map(|g| g.to_expr()));
    Ok(simplify(sum))
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::error::Error;
    use crate::parser::parse_expr;
    use crate::truth::is_equal;

    fn minimized(s: &str, vars: &[&str]) -> String {
        minimize(&parse_expr(s).unwrap(), vars).unwrap().to_string()
    }

    #[test]
    fn test_minimize_factored() {
        assert_eq!(minimized("x & y | x & z", &["x", "y", "z"]), "x & (y | z)");
    }

    #[test]
    fn test_minimize_merges_adjacent_minterms() {
        assert_eq!(minimized("a & b | a & !b", &["a", "b"]), "a");
        assert_eq!(minimized("!a & !b & c | !a & b & c | a & b & c | a & !b & c", &["a", "b", "c"]), "c");
    }

    #[test]
    fn test_minimize_constants() {
        assert_eq!(minimized("a | !a", &["a", "b"]), "true");
        assert_eq!(minimized("a & !a", &["a", "b"]), "false");
    }

    #[test]
    fn test_minimize_without_variables() {
        assert_eq!(minimized("true & !false", &[]), "true");
        assert_eq!(minimized("false", &[]), "false");
        let err = minimize(&parse_expr("x").unwrap(), &[] as &[&str]).unwrap_err();
        assert!(matches!(err, Error::UnboundVariable(_)));
    }

    #[test]
    fn test_minimize_preserves_semantics() {
        for s in [
            "a & b & c | a & b & !c | !a & c",
            "!(a | b) | c & d",
            "a & !b & !c & !d | a & b & c & d | !a & !b",
        ] {
            let e = parse_expr(s).unwrap();
            let vars = e.variables();
            let m = minimize(&e, &vars).unwrap();
            assert!(is_equal(&e, &m).unwrap(), "{} vs {}", s, m);
        }
    }

    #[test]
    fn test_minimize_unsupported() {
        let e = parse_expr("a").unwrap();
        assert!(matches!(minimize(&e, &["a"]), Err(Error::UnsupportedVariableCount(1))));
    }
}
