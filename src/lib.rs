//! # logic-rs: Boolean expressions, normal forms and Karnaugh minimization
//!
//! **`logic-rs`** parses a small textual logic grammar (`!`, `&`, `|`,
//! parentheses, `true`/`false` and identifiers), simplifies the resulting
//! tree with algebraic rewrites, converts it to CNF or DNF, and minimizes
//! functions of 2 to 4 variables through Karnaugh maps.
//!
//! ## Basic Usage
//!
//! ```rust
//! use logic_rs::engine;
//!
//! assert_eq!(engine::parse_to_string("x & y | x & z").unwrap(), "x & (y | z)");
//! assert_eq!(engine::to_dnf("x & (y | z)").unwrap(), "(x & y) | (x & z)");
//! assert_eq!(engine::minimize("a & b | a & !b", &["a", "b"]).unwrap(), "a");
//! assert!(engine::is_equal("x & y", "y & x").unwrap());
//! ```
//!
//! Working with trees directly:
//!
//! ```rust
//! use logic_rs::expr::Expr;
//! use logic_rs::simplify::simplify;
//! use logic_rs::truth::is_equal;
//!
//! let e = Expr::var("a") & !Expr::var("a") | Expr::var("b");
//! let s = simplify(e.clone());
//! assert_eq!(s.to_string(), "b");
//! assert!(is_equal(&e, &s).unwrap());
//! ```
//!
//! ## Core Components
//!
//! - **[`engine`]**: String-level entry points with operation-prefixed errors.
//! - **[`expr`]**, **[`parser`]**, **[`simplify`]**: The tree, its grammar and its rewrite rules.
//! - **[`karnaugh`]**, **[`implicant`]**, **[`minimize`]**: Gray-coded maps, prime implicants and the minimizer.
//! - **[`truth`]**, **[`mapping`]**: Truth tables, equivalence and function synthesis.
//! - **[`gate`]**: Gate functions over truth values, presented per [`Mode`][crate::value::Mode].
//!
//! The library logs through the `log` facade and never installs a logger.

pub mod dot;
pub mod engine;
pub mod error;
pub mod expr;
pub mod gate;
pub mod gray;
pub mod implicant;
pub mod karnaugh;
pub mod mapping;
pub mod minimize;
pub mod normal;
pub mod parser;
pub mod simplify;
pub mod token;
pub mod truth;
pub mod value;
