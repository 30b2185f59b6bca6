//! Algebraic simplification of expression trees.
//!
//! A single bottom-up pass applies the rewrite rules below. Because the
//! rules are not confluent, passes are repeated until the tree stops
//! changing structurally, up to a fixed cap. The result is a heuristic
//! normal form, not a guaranteed minimum.
//!
//! Rules:
//!
//! - `!!x => x`, `!true => false`, `!false => true`
//! - `x & false => false`, `x & true => x`, `x & x => x`, `x & !x => false`
//! - `x | true => true`, `x | false => x`, `x | !x => true`
//! - `a & b | a & c => a & (b | c)`, recursing on the remainder, which
//!   also yields absorption (`a | a & b => a`)
//!
//! `And`/`Or` chains are kept left-associated, matching the shape the
//! parser produces, so the printed form of a simplified tree reparses to
//! the identical tree.

use log::debug;

use crate::expr::Expr;

/// Default cap on the number of simplification passes.
pub const DEFAULT_MAX_PASSES: usize = 8;

struct Simplifier {
    rewrites: usize,
}

impl Simplifier {
    fn new() -> Self {
        Self { rewrites: 0 }
    }

    fn fired(&mut self, rule: &str) {
        debug!("simplify: {}", rule);
        self.rewrites += 1;
    }

    /// One bottom-up pass.
    fn step(&mut self, expr: Expr) -> Expr {
        match expr {
            Expr::Not(x) => {
                let x = self.step(*x);
                self.not(x)
            }
            Expr::And(a, b) => {
                let a = self.step(*a);
                let b = self.step(*b);
                self.and(a, b)
            }
            Expr::Or(a, b) => {
                let a = self.step(*a);
                let b = self.step(*b);
                self.or(a, b)
            }
            e => e,
        }
    }

    fn not(&mut self, x: Expr) -> Expr {
        match x {
            Expr::Not(inner) => {
                self.fired("!!x => x");
                *inner
            }
            Expr::Literal(b) => {
                self.fired("!const");
                Expr::Literal(!b)
            }
            x => Expr::not(x),
        }
    }

    fn and(&mut self, a: Expr, b: Expr) -> Expr {
        match (a.as_literal(), b.as_literal()) {
            (Some(false), _) | (_, Some(false)) => {
                self.fired("x & false => false");
                return Expr::Literal(false);
            }
            (Some(true), _) => return b,
            (_, Some(true)) => {
                self.fired("x & true => x");
                return a;
            }
            _ => {}
        }

        // a & (b1 & b2) => (a & b1) & b2
        let b = match b {
            Expr::And(b1, b2) => {
                let lhs = self.and(a, *b1);
                return self.and(lhs, *b2);
            }
            b => b,
        };

        let factors = a.and_factors();
        if factors.iter().any(|f| f.same_structure(&b)) {
            self.fired("x & x => x");
            return a;
        }
        if factors.iter().any(|f| f.is_complement_of(&b)) {
            self.fired("x & !x => false");
            return Expr::Literal(false);
        }

        Expr::and(a, b)
    }

    fn or(&mut self, a: Expr, b: Expr) -> Expr {
        match (a.as_literal(), b.as_literal()) {
            (Some(true), _) | (_, Some(true)) => {
                self.fired("x | true => true");
                return Expr::Literal(true);
            }
            (Some(false), _) => return b,
            (_, Some(false)) => {
                self.fired("x | false => x");
                return a;
            }
            _ => {}
        }

        // a | (b1 | b2) => (a | b1) | b2
        let b = match b {
            Expr::Or(b1, b2) => {
                let lhs = self.or(a, *b1);
                return self.or(lhs, *b2);
            }
            b => b,
        };

        let terms = a.or_terms();
        if terms.iter().any(|t| t.is_complement_of(&b)) {
            self.fired("x | !x => true");
            return Expr::Literal(true);
        }
        if terms.iter().any(|t| t.same_structure(&b)) {
            self.fired("x | x => x");
            return a;
        }

        if let Some(factored) = self.factor(&a, &b) {
            return factored;
        }

        Expr::or(a, b)
    }

    /// `a & b | a & c => a & (b | c)`.
    ///
    /// Returns `None` if the two sides share no `And` factor.
    fn factor(&mut self, a: &Expr, b: &Expr) -> Option<Expr> {
        let lhs = a.and_factors();
        let rhs = b.and_factors();

        let mut common: Vec<&Expr> = Vec::new();
        for &f in &lhs {
            if contains(&rhs, f) && !contains(&common, f) {
                common.push(f);
            }
        }
        if common.is_empty() {
            return None;
        }
        self.fired("a & b | a & c => a & (b | c)");

        let rest_lhs: Vec<Expr> = lhs.iter().filter(|e| !contains(&common, e)).map(|&e| e.clone()).collect();
        let rest_rhs: Vec<Expr> = rhs.iter().filter(|e| !contains(&common, e)).map(|&e| e.clone()).collect();
        let common: Vec<Expr> = common.into_iter().cloned().collect();

        // An empty remainder is `true`, so `a | a & b` collapses to `a`.
        let rest_lhs = self.conjunction(rest_lhs);
        let rest_rhs = self.conjunction(rest_rhs);
        let rest = self.or(rest_lhs, rest_rhs);
        let common = self.conjunction(common);
        Some(self.and(common, rest))
    }

    fn conjunction(&mut self, factors: Vec<Expr>) -> Expr {
        factors
            .into_iter()
            .fold(Expr::Literal(true), |acc, f| self.and(acc, f))
    }
}

fn contains(list: &[&Expr], e: &Expr) -> bool {
    list.iter().any(|x| x.same_structure(e))
}

/// Simplifies `expr` with the default pass cap.
pub fn simplify(expr: Expr) -> Expr {
    simplify_with_limit(expr, DEFAULT_MAX_PASSES)
}

/// Simplifies `expr`, repeating passes until the tree is structurally
/// unchanged or `max_passes` passes have run.
pub fn simplify_with_limit(mut expr: Expr, max_passes: usize) -> Expr {
    debug!("simplify(expr = {}, max_passes = {})", expr, max_passes);

    for pass in 1..=max_passes {
        let mut simplifier = Simplifier::new();
        let next = simplifier.step(expr.clone());
        debug!("simplify: pass {} made {} rewrites: {}", pass, simplifier.rewrites, next);
        if next.same_structure(&expr) {
            return next;
        }
        expr = next;
    }

    debug!("simplify: pass limit reached");
    expr
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::parser::parse_expr;

    fn simplified(s: &str) -> String {
        simplify(parse_expr(s).unwrap()).to_string()
    }

    #[test]
    fn test_double_negation() {
        assert_eq!(simplified("!!x"), "x");
        assert_eq!(simplified("!!!x"), "!x");
        assert_eq!(simplified("!true"), "false");
        assert_eq!(simplified("!(!false)"), "false");
    }

    #[test]
    fn test_and_rules() {
        assert_eq!(simplified("x & false"), "false");
        assert_eq!(simplified("false & x"), "false");
        assert_eq!(simplified("x & true"), "x");
        assert_eq!(simplified("true & x"), "x");
        assert_eq!(simplified("x & x"), "x");
        assert_eq!(simplified("x & !x"), "false");
        assert_eq!(simplified("!x & x"), "false");
    }

    #[test]
    fn test_and_chain_rules() {
        assert_eq!(simplified("x & y & x"), "x & y");
        assert_eq!(simplified("x & y & !x"), "false");
        assert_eq!(simplified("x & (y & z)"), "x & y & z");
    }

    #[test]
    fn test_or_rules() {
        assert_eq!(simplified("x | true"), "true");
        assert_eq!(simplified("false | x"), "x");
        assert_eq!(simplified("x | false"), "x");
        assert_eq!(simplified("x | !x"), "true");
        assert_eq!(simplified("!x | x"), "true");
        assert_eq!(simplified("x | x"), "x");
        assert_eq!(simplified("x | (y | z)"), "x | y | z");
    }

    #[test]
    fn test_factoring() {
        assert_eq!(simplified("x & y | x & z"), "x & (y | z)");
        assert_eq!(simplified("a & b & c | a & b & d"), "a & b & (c | d)");
        assert_eq!(simplified("y & x | x & z"), "x & (y | z)");
    }

    #[test]
    fn test_absorption() {
        assert_eq!(simplified("a | a & b"), "a");
        assert_eq!(simplified("a & b | a"), "a");
    }

    #[test]
    fn test_factoring_to_tautology() {
        assert_eq!(simplified("a & b | a & !b"), "a");
        assert_eq!(simplified("a & b & c | a & b & !c"), "a & b");
    }

    #[test]
    fn test_nested_negation_of_compound() {
        assert_eq!(simplified("!(x & y)"), "!(x & y)");
        assert_eq!(simplified("!!(x | y)"), "x | y");
    }

    #[test]
    fn test_fixpoint() {
        for s in ["x & y | x & z", "!(a | !b) & c", "a | b & (c | !a)", "(a | b) & (a | c)"] {
            let once = simplified(s);
            let twice = simplified(&once);
            assert_eq!(once, twice, "not a fixpoint for {}", s);
        }
    }

    #[test]
    fn test_zero_passes() {
        let e = parse_expr("x & true").unwrap();
        assert_eq!(simplify_with_limit(e.clone(), 0), e);
    }
}
