//! pymodule core: the engine behind the `cmodulea` extension module
//!
//! The extension exposes two entry points to its host interpreter:
//! - a greeting that prints a line and hands off to the utils collaborator
//! - a timed sum-of-squares loop that reports how long it ran
//!
//! Everything here is plain Rust. The PyO3 crate converts host values into
//! [`HostArg`]s and forwards to [`ExtensionModule`], so the behaviour can be
//! tested without an interpreter.
//!
//! # Modules
//!
//! - `args`: host argument model and `"i"`-format parsing
//! - `error`: argument and benchmark error types
//! - `time_ops`: monotonic elapsed-time measurement
//! - `benchmark`: the timed loops and the reference comparison
//! - `utils`: the `hello_from_utils` collaborator
//! - `extension`: `ExtensionModule`, the two entry points
//! - `greetings`: the demo core modules A and B
//! - `ffi`: C ABI exports for sibling native extensions

pub mod args;
pub mod benchmark;
pub mod error;
pub mod extension;
pub mod ffi;
pub mod greetings;
pub mod time_ops;
pub mod utils;

// Re-export key types and functions
pub use args::{HostArg, parse_iteration_count};
pub use benchmark::{
    BenchmarkRun, Comparison, compare, count_loop, fibonacci, reference_benchmark,
    run_sum_squares, sum_squares,
};
pub use error::{ArgumentParseError, BenchmarkError};
pub use extension::{ExtensionModule, GREETING, MODULE_NAME};
pub use greetings::{
    goodbye_from_core_module_a, goodbye_from_core_module_b, hello_from_core_module_a,
    hello_from_core_module_b,
};
pub use time_ops::Stopwatch;
pub use utils::{HelloUtils, PrintUtils, hello_from_utils};
