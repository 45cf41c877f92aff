//! Time operations for the timed-loop entry points
//!
//! Elapsed time is always measured with `Instant`, the platform's monotonic
//! clock, so a measurement can never come out negative.
//!
//! # Example: Measuring execution time
//!
//! ```
//! use pymodule_core::Stopwatch;
//!
//! let watch = Stopwatch::start();
//! let _ = pymodule_core::sum_squares(1_000);
//! let micros = watch.elapsed_micros();
//! println!("Elapsed: {} microseconds", micros);
//! ```

use std::time::{Duration, Instant};

/// A started monotonic timer
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started: Instant,
}

impl Stopwatch {
    /// Record the start instant
    pub fn start() -> Self {
        Stopwatch {
            started: Instant::now(),
        }
    }

    /// Time since `start`
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn elapsed_micros(&self) -> u128 {
        self.elapsed().as_micros()
    }

    pub fn elapsed_millis_f64(&self) -> f64 {
        self.elapsed().as_secs_f64() * 1000.0
    }

    pub fn elapsed_secs_f64(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }
}
