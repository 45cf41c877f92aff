//! ExampleExtensionModule: the two entry points of `cmodulea`
//!
//! The module owns an output sink and a utils collaborator. Bindings create
//! one per call with `ExtensionModule::stdout()`; tests substitute a buffer
//! and a closure.

use crate::args::{HostArg, parse_iteration_count};
use crate::benchmark::{BenchmarkRun, run_sum_squares};
use crate::error::BenchmarkError;
use crate::utils::{HelloUtils, PrintUtils};
use std::io::{self, Stdout, Write};
use tracing::debug;

/// Name the module is exported under, and the tag handed to the utils
pub const MODULE_NAME: &str = "cmodulea";

/// Line printed by the greeting entry point
pub const GREETING: &str = "Hello to Python world from Rust world! I am CModule A!";

pub struct ExtensionModule<W: Write, U: HelloUtils> {
    out: W,
    utils: U,
}

impl ExtensionModule<Stdout, PrintUtils> {
    /// Module wired to the process stdout and the default utils
    pub fn stdout() -> Self {
        ExtensionModule::new(io::stdout(), PrintUtils)
    }
}

impl<W: Write, U: HelloUtils> ExtensionModule<W, U> {
    pub fn new(out: W, utils: U) -> Self {
        ExtensionModule { out, utils }
    }

    /// Greeting entry point: print the fixed line, then call the utils with
    /// this module's tag.
    pub fn print_hello(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", GREETING)?;
        self.out.flush()?;
        self.utils.hello_from_utils(MODULE_NAME);
        Ok(())
    }

    /// Timed-loop entry point with host-style arguments.
    ///
    /// Argument errors are returned before any work is done or any output
    /// is written. On success, returns the sum of squares.
    pub fn c_benchmark(&mut self, args: &[HostArg]) -> Result<i64, BenchmarkError> {
        let n = parse_iteration_count(args)?;
        let run = self.benchmark(n)?;
        Ok(run.sum)
    }

    /// Typed timed-loop entry point: run, report the elapsed time, return
    /// the full run.
    pub fn benchmark(&mut self, n: i32) -> io::Result<BenchmarkRun> {
        let run = run_sum_squares(n);
        debug!(module = MODULE_NAME, iterations = n, "benchmark complete");
        writeln!(self.out, "{}", run)?;
        self.out.flush()?;
        Ok(run)
    }

    /// Consume the module and hand back its output sink
    pub fn into_output(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ArgumentParseError;

    fn module_with_tags(tags: &mut Vec<String>) -> ExtensionModule<Vec<u8>, impl FnMut(&str) + '_> {
        ExtensionModule::new(Vec::new(), move |tag: &str| tags.push(tag.to_string()))
    }

    #[test]
    fn test_print_hello_calls_utils_with_tag() {
        let mut tags = Vec::new();
        let mut module = module_with_tags(&mut tags);
        module.print_hello().unwrap();
        let out = String::from_utf8(module.into_output()).unwrap();

        assert_eq!(out, format!("{}\n", GREETING));
        assert_eq!(tags, vec![MODULE_NAME]);
    }

    #[test]
    fn test_c_benchmark_returns_sum() {
        let mut module = ExtensionModule::new(Vec::new(), |_: &str| {});
        assert_eq!(module.c_benchmark(&[HostArg::Int(5)]).unwrap(), 30);
        assert_eq!(module.c_benchmark(&[HostArg::Int(10)]).unwrap(), 285);

        let out = String::from_utf8(module.into_output()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Benchmark with 5 iterations took "));
        assert!(lines[1].ends_with(" microseconds"));
    }

    #[test]
    fn test_c_benchmark_bad_args_write_nothing() {
        let mut module = ExtensionModule::new(Vec::new(), |_: &str| {});
        let err = module.c_benchmark(&[HostArg::from("ten")]).unwrap_err();
        assert!(matches!(
            err,
            BenchmarkError::Args(ArgumentParseError::WrongType { .. })
        ));
        let err = module.c_benchmark(&[]).unwrap_err();
        assert!(matches!(
            err,
            BenchmarkError::Args(ArgumentParseError::Arity { got: 0, .. })
        ));
        assert!(module.into_output().is_empty());
    }

    #[test]
    fn test_benchmark_negative_n() {
        let mut module = ExtensionModule::new(Vec::new(), |_: &str| {});
        let run = module.benchmark(-7).unwrap();
        assert_eq!(run.sum, 0);
        assert_eq!(run.iterations, -7);
    }
}
