//! Property tests over small random expressions.

use proptest::prelude::*;

use logic_rs::expr::Expr;
use logic_rs::gray::{gray_code, hamming};
use logic_rs::minimize::minimize;
use logic_rs::normal::{is_normal_form, to_cnf, to_dnf, Form};
use logic_rs::parser::parse_expr;
use logic_rs::simplify::simplify;
use logic_rs::truth::is_equal;

const VARIABLES: [&str; 4] = ["a", "b", "c", "d"];

fn expr() -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![
        1 => any::<bool>().prop_map(Expr::Literal),
        4 => prop::sample::select(VARIABLES.to_vec()).prop_map(Expr::var),
    ];
    leaf.prop_recursive(4, 24, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(Expr::not),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| Expr::and(a, b)),
            (inner.clone(), inner).prop_map(|(a, b)| Expr::or(a, b)),
        ]
    })
}

proptest! {
    #[test]
    fn prop_display_reparses_to_equivalent_expr(e in expr()) {
        let text = e.to_string();
        let back = parse_expr(&text).unwrap();
        prop_assert!(is_equal(&e, &back).unwrap(), "{} reparsed as {}", text, back);
    }

    #[test]
    fn prop_simplify_preserves_semantics(e in expr()) {
        let s = simplify(e.clone());
        prop_assert!(is_equal(&e, &s).unwrap(), "{} simplified to {}", e, s);
    }

    #[test]
    fn prop_canonical_text_is_fixpoint(e in expr()) {
        let once = simplify(e).to_string();
        let twice = simplify(parse_expr(&once).unwrap()).to_string();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_cnf(e in expr()) {
        let cnf = to_cnf(e.clone());
        prop_assert!(is_normal_form(&cnf, Form::Cnf), "not CNF: {}", cnf);
        prop_assert!(is_equal(&e, &cnf).unwrap());
    }

    #[test]
    fn prop_dnf(e in expr()) {
        let dnf = to_dnf(e.clone());
        prop_assert!(is_normal_form(&dnf, Form::Dnf), "not DNF: {}", dnf);
        prop_assert!(is_equal(&e, &dnf).unwrap());
    }

    #[test]
    fn prop_minimize_preserves_semantics(e in expr(), n in 2usize..=4) {
        let vars = &VARIABLES[..n];
        // Expressions mentioning variables outside `vars` cannot be mapped.
        prop_assume!(e.variables().iter().all(|v| vars.contains(&v.as_str())));
        let m = minimize(&e, vars).unwrap();
        prop_assert!(is_equal(&e, &m).unwrap(), "{} minimized to {}", e, m);
    }

    #[test]
    fn prop_gray_code_adjacency(k in 0usize..=6) {
        let codes = gray_code(k);
        prop_assert_eq!(codes.len(), 1 << k);
        if k > 0 {
            for i in 0..codes.len() {
                let next = &codes[(i + 1) % codes.len()];
                prop_assert_eq!(hamming(&codes[i], next), 1);
            }
        }
    }
}
