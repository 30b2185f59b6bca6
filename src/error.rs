//! Error types for parsing, evaluation and minimization.

use std::fmt;

use thiserror::Error;

use crate::token::Token;

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Public operation that failed, used to prefix error messages at the call boundary.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Operation {
    Parse,
    Karnaugh,
    PrimeImplicants,
    Minimize,
    Cnf,
    Dnf,
    Equivalence,
    Mapping,
    TruthTable,
    Gate,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operation::Parse => "parsing expression",
            Operation::Karnaugh => "building Karnaugh map",
            Operation::PrimeImplicants => "finding prime implicants",
            Operation::Minimize => "minimizing expression",
            Operation::Cnf => "converting to CNF",
            Operation::Dnf => "converting to DNF",
            Operation::Equivalence => "checking equivalence",
            Operation::Mapping => "building mapping",
            Operation::TruthTable => "building truth table",
            Operation::Gate => "applying gate",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// A character outside `!&|()`, identifier characters and whitespace.
    #[error("unexpected character {ch:?} at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    #[error("unexpected token '{0}'")]
    UnexpectedToken(Token),

    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("expected '{expected}', found {}", describe(.found))]
    ExpectedToken { expected: Token, found: Option<Token> },

    /// Tokens left over after a complete expression.
    #[error("unexpected trailing token '{0}'")]
    TrailingTokens(Token),

    /// The tree would be higher than the parser's depth limit.
    #[error("expression is nested deeper than {limit} levels")]
    TooDeep { limit: usize },

    #[error("variable '{0}' is not assigned")]
    UnboundVariable(String),

    #[error("unsupported number of variables: {0} (expected 2, 3 or 4)")]
    UnsupportedVariableCount(usize),

    #[error("truth table is empty")]
    EmptyTable,

    #[error("inputs have {inputs} rows but outputs have {outputs}")]
    RowCountMismatch { inputs: usize, outputs: usize },

    #[error("row {row} has width {found}, expected {expected}")]
    RowWidthMismatch { row: usize, expected: usize, found: usize },

    #[error("expected {expected} arguments, got {found}")]
    ArgumentCount { expected: usize, found: usize },

    #[error("invalid binary value {0} (expected 0 or 1)")]
    InvalidValue(u8),

    #[error("gate {gate} expects {expected} inputs, got {found}")]
    GateArity {
        gate: &'static str,
        expected: &'static str,
        found: usize,
    },

    #[error("invalid mode '{0}' (expected \"boolean\" or \"binary\")")]
    InvalidMode(String),

    #[error("unknown gate '{0}'")]
    UnknownGate(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Error {op}: {source}")]
    Context { op: Operation, source: Box<Error> },
}

fn describe(found: &Option<Token>) -> String {
    match found {
        Some(token) => format!("'{}'", token),
        None => "end of input".to_string(),
    }
}

impl Error {
    /// Wraps the error with the operation that failed.
    pub fn context(self, op: Operation) -> Self {
        Error::Context {
            op,
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, skipping any operation context.
    pub fn root(&self) -> &Error {
        match self {
            Error::Context { source, .. } => source.root(),
            e => e,
        }
    }
}
