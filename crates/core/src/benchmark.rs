//! Timed loops behind `c_benchmark`, plus the reference workload it is
//! compared against.
//!
//! `sum_squares` is the exported loop. `count_loop` is the older no-op loop
//! that discards `i * 2`; it is kept for library callers only.
//!
//! Note: the accumulator wraps instead of panicking. `n` up to ~3M stays
//! exact in i64; above that the sum wraps like the C original would.

use crate::time_ops::Stopwatch;
use std::fmt;
use std::hint::black_box;
use std::io::{self, Write};
use std::time::Duration;
use tracing::debug;

/// Fibonacci index computed per iteration of the reference benchmark
pub const REFERENCE_FIB_INDEX: u32 = 300;

/// Sum of `i * i` for `i` in `0..n`. Non-positive `n` gives 0.
pub fn sum_squares(n: i32) -> i64 {
    let mut acc: i64 = 0;
    for i in 0..n.max(0) {
        let i = black_box(i as i64);
        acc = acc.wrapping_add(i.wrapping_mul(i));
    }
    acc
}

/// The no-op counting loop: `n` iterations of a discarded `i * 2`.
/// Returns the number of iterations run.
pub fn count_loop(n: i32) -> u32 {
    let mut runs = 0u32;
    for i in 0..n.max(0) {
        black_box(i.wrapping_mul(2));
        runs += 1;
    }
    runs
}

/// Iterative Fibonacci with wrapping u64 arithmetic
pub fn fibonacci(n: u32) -> u64 {
    let (mut a, mut b) = (0u64, 1u64);
    for _ in 0..n {
        (a, b) = (b, a.wrapping_add(b));
    }
    a
}

/// Result of one timed sum-of-squares run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchmarkRun {
    pub iterations: i32,
    pub sum: i64,
    pub elapsed: Duration,
}

impl BenchmarkRun {
    pub fn elapsed_micros(&self) -> u128 {
        self.elapsed.as_micros()
    }

    pub fn elapsed_millis(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

impl fmt::Display for BenchmarkRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Benchmark with {} iterations took {} microseconds",
            self.iterations,
            self.elapsed_micros()
        )
    }
}

/// Run `sum_squares(n)` between two monotonic timestamps
pub fn run_sum_squares(n: i32) -> BenchmarkRun {
    let watch = Stopwatch::start();
    let sum = sum_squares(n);
    let elapsed = watch.elapsed();
    debug!(iterations = n, sum, ?elapsed, "sum_squares finished");
    BenchmarkRun {
        iterations: n,
        sum,
        elapsed,
    }
}

/// Run `fibonacci(300)` `n` times and report the elapsed milliseconds
pub fn reference_benchmark<W: Write>(n: i32, out: &mut W) -> io::Result<f64> {
    let watch = Stopwatch::start();
    for _ in 0..n.max(0) {
        black_box(fibonacci(black_box(REFERENCE_FIB_INDEX)));
    }
    let millis = watch.elapsed_millis_f64();
    writeln!(out, "Reference function executed in {:03.6} milliseconds", millis)?;
    Ok(millis)
}

/// Timings of the reference workload and the extension loop for the same `n`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    pub reference_ms: f64,
    pub extension_ms: f64,
}

impl Comparison {
    /// Extension time as a percentage of the reference time.
    /// A zero reference time reports 0% instead of dividing by zero.
    pub fn extension_percent(&self) -> f64 {
        if self.reference_ms > 0.0 {
            (self.extension_ms / self.reference_ms) * 100.0
        } else {
            0.0
        }
    }
}

/// Run both workloads and print the extension time relative to the reference
pub fn compare<W: Write>(n: i32, out: &mut W) -> io::Result<Comparison> {
    let reference_ms = reference_benchmark(n, out)?;
    let run = run_sum_squares(n);
    writeln!(out, "{}", run)?;

    let comparison = Comparison {
        reference_ms,
        extension_ms: run.elapsed_millis(),
    };
    writeln!(out, "Reference = 100.0%")?;
    writeln!(out, "Extension = {}%", comparison.extension_percent())?;
    Ok(comparison)
}
