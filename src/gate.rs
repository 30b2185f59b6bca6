use std::str::FromStr;

use crate::error::{Error, Result};
use crate::value::{Mode, Value};

/// Two-input connectives.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BinaryType {
    /// Material conditional `a -> b`.
    Cond,
    NCond,
    /// Converse `a <- b`.
    Conv,
    NConv,
    /// Biconditional `a <-> b`.
    Bicond,
    NBicond,
}

/// Connectives over two or more inputs.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum NaryType {
    And,
    Or,
    Xor,
    Nand,
    Nor,
    Xnor,
}

/// Gate functions over already-computed truth values.
///
/// These are not part of the expression grammar; they operate directly on
/// [`Value`]s and present their result according to an explicit [`Mode`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Gate {
    Not,
    Binary(BinaryType),
    Nary(NaryType),
}

// Constructors
impl Gate {
    pub fn not() -> Gate {
        Gate::Not
    }

    pub fn and() -> Gate {
        Gate::Nary(NaryType::And)
    }

    pub fn or() -> Gate {
        Gate::Nary(NaryType::Or)
    }

    pub fn xor() -> Gate {
        Gate::Nary(NaryType::Xor)
    }

    pub fn nand() -> Gate {
        Gate::Nary(NaryType::Nand)
    }

    pub fn nor() -> Gate {
        Gate::Nary(NaryType::Nor)
    }

    pub fn xnor() -> Gate {
        Gate::Nary(NaryType::Xnor)
    }

    pub fn cond() -> Gate {
        Gate::Binary(BinaryType::Cond)
    }

    pub fn conv() -> Gate {
        Gate::Binary(BinaryType::Conv)
    }

    pub fn bicond() -> Gate {
        Gate::Binary(BinaryType::Bicond)
    }
}

// Getters
impl Gate {
    pub fn name(&self) -> &'static str {
        match self {
            Gate::Not => "NOT",
            Gate::Binary(BinaryType::Cond) => "COND",
            Gate::Binary(BinaryType::NCond) => "NCOND",
            Gate::Binary(BinaryType::Conv) => "CONV",
            Gate::Binary(BinaryType::NConv) => "NCONV",
            Gate::Binary(BinaryType::Bicond) => "BICOND",
            Gate::Binary(BinaryType::NBicond) => "NBICOND",
            Gate::Nary(NaryType::And) => "AND",
            Gate::Nary(NaryType::Or) => "OR",
            Gate::Nary(NaryType::Xor) => "XOR",
            Gate::Nary(NaryType::Nand) => "NAND",
            Gate::Nary(NaryType::Nor) => "NOR",
            Gate::Nary(NaryType::Xnor) => "XNOR",
        }
    }

    /// The gate computing the complement of this one.
    pub fn negated(&self) -> Gate {
        match self {
            Gate::Not => Gate::Not,
            Gate::Binary(t) => Gate::Binary(match t {
                BinaryType::Cond => BinaryType::NCond,
                BinaryType::NCond => BinaryType::Cond,
                BinaryType::Conv => BinaryType::NConv,
                BinaryType::NConv => BinaryType::Conv,
                BinaryType::Bicond => BinaryType::NBicond,
                BinaryType::NBicond => BinaryType::Bicond,
            }),
            Gate::Nary(t) => Gate::Nary(match t {
                NaryType::And => NaryType::Nand,
                NaryType::Nand => NaryType::And,
                NaryType::Or => NaryType::Nor,
                NaryType::Nor => NaryType::Or,
                NaryType::Xor => NaryType::Xnor,
                NaryType::Xnor => NaryType::Xor,
            }),
        }
    }
}

// Evaluation
impl Gate {
    fn arity_error(&self, found: usize) -> Error {
        let expected = match self {
            Gate::Not => "1",
            Gate::Binary(_) => "2",
            Gate::Nary(_) => "at least 2",
        };
        Error::GateArity {
            gate: self.name(),
            expected,
            found,
        }
    }

    pub fn eval(&self, inputs: &[bool]) -> Result<bool> {
        match *self {
            Gate::Not => match inputs {
                [a] => Ok(!a),
                _ => Err(self.arity_error(inputs.len())),
            },
            Gate::Binary(t) => {
                let (a, b) = match inputs {
                    [a, b] => (*a, *b),
                    _ => return Err(self.arity_error(inputs.len())),
                };
                Ok(match t {
                    BinaryType::Cond => !a | b,
                    BinaryType::NCond => a & !b,
                    BinaryType::Conv => a | !b,
                    BinaryType::NConv => !a & b,
                    BinaryType::Bicond => a == b,
                    BinaryType::NBicond => a != b,
                })
            }
            Gate::Nary(t) => {
                if inputs.len() < 2 {
                    return Err(self.arity_error(inputs.len()));
                }
                let all = inputs.iter().all(|&x| x);
                let any = inputs.iter().any(|&x| x);
                let parity = inputs.iter().filter(|&&x| x).count() % 2 == 1;
                Ok(match t {
                    NaryType::And => all,
                    NaryType::Or => any,
                    NaryType::Xor => parity,
                    NaryType::Nand => !all,
                    NaryType::Nor => !any,
                    NaryType::Xnor => !parity,
                })
            }
        }
    }

    /// Applies the gate to caller values and presents the result in `mode`.
    pub fn apply(&self, mode: Mode, inputs: &[Value]) -> Result<Value> {
        let inputs = inputs.iter().map(|v| v.truth()).collect::<Result<Vec<bool>>>()?;
        Ok(mode.present(self.eval(&inputs)?))
    }
}

impl FromStr for Gate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let gate = match s.to_ascii_uppercase().as_str() {
            "NOT" => Gate::Not,
            "AND" => Gate::Nary(NaryType::And),
            "OR" => Gate::Nary(NaryType::Or),
            "XOR" => Gate::Nary(NaryType::Xor),
            "NAND" => Gate::Nary(NaryType::Nand),
            "NOR" => Gate::Nary(NaryType::Nor),
            "XNOR" => Gate::Nary(NaryType::Xnor),
            "COND" => Gate::Binary(BinaryType::Cond),
            "NCOND" => Gate::Binary(BinaryType::NCond),
            "CONV" => Gate::Binary(BinaryType::Conv),
            "NCONV" => Gate::Binary(BinaryType::NConv),
            "BICOND" => Gate::Binary(BinaryType::Bicond),
            "NBICOND" => Gate::Binary(BinaryType::NBicond),
            _ => return Err(Error::UnknownGate(s.to_string())),
        };
        Ok(gate)
    }
}
