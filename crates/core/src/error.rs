//! Error types for the extension entry points.

/// The single error the timed-loop entry point reports for bad input.
///
/// Mirrors the three ways `"i"`-format argument parsing can fail. The host
/// binding decides which host exception each variant becomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentParseError {
    /// Wrong number of positional arguments
    Arity { expected: usize, got: usize },
    /// The argument is not an integer
    WrongType { found: String },
    /// The integer does not fit in a C `int`
    Overflow { negative: bool },
}

impl std::fmt::Display for ArgumentParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArgumentParseError::Arity { expected, got } => write!(
                f,
                "function takes exactly {} argument{} ({} given)",
                expected,
                if *expected == 1 { "" } else { "s" },
                got
            ),
            ArgumentParseError::WrongType { found } => {
                write!(f, "'{}' object cannot be interpreted as an integer", found)
            }
            ArgumentParseError::Overflow { negative: false } => {
                write!(f, "signed integer is greater than maximum")
            }
            ArgumentParseError::Overflow { negative: true } => {
                write!(f, "signed integer is less than minimum")
            }
        }
    }
}

impl std::error::Error for ArgumentParseError {}

/// Error type for a full `c_benchmark` call.
///
/// Argument failures happen before any work; I/O failures can only happen
/// when the elapsed-time line is written.
#[derive(Debug)]
pub enum BenchmarkError {
    Args(ArgumentParseError),
    Io(std::io::Error),
}

impl std::fmt::Display for BenchmarkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BenchmarkError::Args(e) => write!(f, "{}", e),
            BenchmarkError::Io(e) => write!(f, "failed to report benchmark: {}", e),
        }
    }
}

impl std::error::Error for BenchmarkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BenchmarkError::Args(e) => Some(e),
            BenchmarkError::Io(e) => Some(e),
        }
    }
}

impl From<ArgumentParseError> for BenchmarkError {
    fn from(e: ArgumentParseError) -> Self {
        BenchmarkError::Args(e)
    }
}

impl From<std::io::Error> for BenchmarkError {
    fn from(e: std::io::Error) -> Self {
        BenchmarkError::Io(e)
    }
}
