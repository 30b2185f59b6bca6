//! Truth values in boolean (`true`/`false`) or binary (`1`/`0`) presentation.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A truth value as supplied by or returned to a caller.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Bit(u8),
}

impl Value {
    /// Converts to `bool`, rejecting bits other than `0` and `1`.
    pub fn truth(self) -> Result<bool> {
        match self {
            Value::Bool(b) => Ok(b),
            Value::Bit(0) => Ok(false),
            Value::Bit(1) => Ok(true),
            Value::Bit(n) => Err(Error::InvalidValue(n)),
        }
    }

    pub fn is_bit(self) -> bool {
        matches!(self, Value::Bit(_))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<u8> for Value {
    fn from(n: u8) -> Self {
        Value::Bit(n)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Bit(n) => write!(f, "{}", n),
        }
    }
}

/// Output presentation for gate functions.
///
/// There is no global mode: callers pass a `Mode` to every operation that
/// presents truth values.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Mode {
    #[default]
    Boolean,
    Binary,
}

impl Mode {
    pub fn present(self, b: bool) -> Value {
        match self {
            Mode::Boolean => Value::Bool(b),
            Mode::Binary => Value::Bit(b as u8),
        }
    }

    /// `Binary` if there is at least one value and all values are bits, `Boolean` otherwise.
    pub fn of_values<'a>(values: impl IntoIterator<Item = &'a Value>) -> Mode {
        let mut any = false;
        for v in values {
            if !v.is_bit() {
                return Mode::Boolean;
            }
            any = true;
        }
        if any {
            Mode::Binary
        } else {
            Mode::Boolean
        }
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "boolean" => Ok(Mode::Boolean),
            "binary" => Ok(Mode::Binary),
            _ => Err(Error::InvalidMode(s.to_string())),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Boolean => write!(f, "boolean"),
            Mode::Binary => write!(f, "binary"),
        }
    }
}
