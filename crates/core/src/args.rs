//! Host argument handling for extension entry points
//!
//! The host interpreter hands entry points a tuple of dynamically typed
//! values. `HostArg` is the slice of that value space the core cares about,
//! and `parse_iteration_count` applies the same rules as a C extension's
//! `PyArg_ParseTuple(args, "i", &n)`:
//!
//! - exactly one positional argument
//! - it must be an integer (booleans count, floats and strings do not)
//! - it must fit in a C `int`

use crate::error::ArgumentParseError;

/// A positional argument as received from the host interpreter
#[derive(Debug, Clone, PartialEq)]
pub enum HostArg {
    Int(i64),
    /// An integer too large for 64 bits
    OversizedInt { negative: bool },
    Bool(bool),
    Float(f64),
    Str(String),
    NoneValue,
    /// Any other host object, carrying its type name
    Other(String),
}

impl HostArg {
    /// The host-level type name, as used in error messages
    pub fn type_name(&self) -> &str {
        match self {
            HostArg::Int(_) | HostArg::OversizedInt { .. } => "int",
            HostArg::Bool(_) => "bool",
            HostArg::Float(_) => "float",
            HostArg::Str(_) => "str",
            HostArg::NoneValue => "NoneType",
            HostArg::Other(name) => name,
        }
    }
}

impl From<i64> for HostArg {
    fn from(n: i64) -> Self {
        HostArg::Int(n)
    }
}

impl From<i32> for HostArg {
    fn from(n: i32) -> Self {
        HostArg::Int(n as i64)
    }
}

impl From<&str> for HostArg {
    fn from(s: &str) -> Self {
        HostArg::Str(s.to_string())
    }
}

impl From<f64> for HostArg {
    fn from(x: f64) -> Self {
        HostArg::Float(x)
    }
}

impl From<bool> for HostArg {
    fn from(b: bool) -> Self {
        HostArg::Bool(b)
    }
}

/// Parse the single iteration-count argument of the timed-loop entry point
pub fn parse_iteration_count(args: &[HostArg]) -> Result<i32, ArgumentParseError> {
    let arg = match args {
        [arg] => arg,
        _ => {
            return Err(ArgumentParseError::Arity {
                expected: 1,
                got: args.len(),
            });
        }
    };

    match arg {
        HostArg::Int(n) => i32::try_from(*n).map_err(|_| ArgumentParseError::Overflow {
            negative: *n < 0,
        }),
        HostArg::OversizedInt { negative } => Err(ArgumentParseError::Overflow {
            negative: *negative,
        }),
        HostArg::Bool(b) => Ok(i32::from(*b)),
        other => Err(ArgumentParseError::WrongType {
            found: other.type_name().to_string(),
        }),
    }
}
