//! Conjunctive and disjunctive normal forms.
//!
//! Conversion first pushes negations down to the variables (negation
//! normal form) using De Morgan's laws and double-negation elimination,
//! then distributes `And` over `Or` (DNF) or `Or` over `And` (CNF).
//!
//! The result can be exponentially larger than the input; this is
//! inherent to normal forms and callers should keep inputs small.

use log::debug;

use crate::expr::Expr;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Form {
    /// Conjunction of clauses (AND of ORs).
    Cnf,
    /// Disjunction of terms (OR of ANDs).
    Dnf,
}

/// Negation normal form: `Not` only appears directly above variables.
pub fn to_nnf(expr: Expr) -> Expr {
    match expr {
        Expr::Not(x) => negate(*x),
        Expr::And(a, b) => Expr::and(to_nnf(*a), to_nnf(*b)),
        Expr::Or(a, b) => Expr::or(to_nnf(*a), to_nnf(*b)),
        e => e,
    }
}

/// NNF of `!expr`.
fn negate(expr: Expr) -> Expr {
    match expr {
        Expr::Literal(b) => Expr::Literal(!b),
        Expr::Variable(name) => Expr::not(Expr::Variable(name)),
        Expr::Not(x) => to_nnf(*x),
        Expr::And(a, b) => Expr::or(negate(*a), negate(*b)),
        Expr::Or(a, b) => Expr::and(negate(*a), negate(*b)),
    }
}

pub fn to_cnf(expr: Expr) -> Expr {
    to_normal_form(expr, Form::Cnf)
}

pub fn to_dnf(expr: Expr) -> Expr {
    to_normal_form(expr, Form::Dnf)
}

pub fn to_normal_form(expr: Expr, form: Form) -> Expr {
    debug!("to_normal_form(expr = {}, form = {:?})", expr, form);
    distribute(to_nnf(expr), form)
}

/// Post-order conversion of an NNF tree.
fn distribute(expr: Expr, form: Form) -> Expr {
    match expr {
        Expr::And(a, b) => {
            let a = distribute(*a, form);
            let b = distribute(*b, form);
            match form {
                Form::Dnf => combine(a, b, form),
                Form::Cnf => Expr::and(a, b),
            }
        }
        Expr::Or(a, b) => {
            let a = distribute(*a, form);
            let b = distribute(*b, form);
            match form {
                Form::Dnf => Expr::or(a, b),
                Form::Cnf => combine(a, b, form),
            }
        }
        e => e,
    }
}

/// Joins two normal-form operands with the inner connective of `form`,
/// distributing over the outer connective of either operand.
fn combine(a: Expr, b: Expr, form: Form) -> Expr {
    match form {
        // (a1 | a2) & b => (a1 & b) | (a2 & b)
        Form::Dnf => match (a, b) {
            (Expr::Or(a1, a2), b) => Expr::or(combine(*a1, b.clone(), form), combine(*a2, b, form)),
            (a, Expr::Or(b1, b2)) => Expr::or(combine(a.clone(), *b1, form), combine(a, *b2, form)),
            (a, b) => Expr::and(a, b),
        },
        // (a1 & a2) | b => (a1 | b) & (a2 | b)
        Form::Cnf => match (a, b) {
            (Expr::And(a1, a2), b) => Expr::and(combine(*a1, b.clone(), form), combine(*a2, b, form)),
            (a, Expr::And(b1, b2)) => Expr::and(combine(a.clone(), *b1, form), combine(a, *b2, form)),
            (a, b) => Expr::or(a, b),
        },
    }
}

fn is_literal_like(expr: &Expr) -> bool {
    match expr {
        Expr::Literal(_) | Expr::Variable(_) => true,
        Expr::Not(x) => x.is_variable(),
        _ => false,
    }
}

/// Checks that `expr` has the shape of `form`.
pub fn is_normal_form(expr: &Expr, form: Form) -> bool {
    let (outer, inner): (fn(&Expr) -> Vec<&Expr>, fn(&Expr) -> Vec<&Expr>) = match form {
        Form::Cnf => (Expr::and_factors, Expr::or_terms),
        Form::Dnf => (Expr::or_terms, Expr::and_factors),
    };
    outer(expr)
        .into_iter()
        .all(|part| inner(part).into_iter().all(is_literal_like))
}
