//! Application run: exercises every part of the core once, then compares
//! the extension loop against the reference workload.

use crate::config::AppConfig;
use pymodule_core::{
    ExtensionModule, HelloUtils, PrintUtils, compare, goodbye_from_core_module_a,
    goodbye_from_core_module_b, hello_from_core_module_a, hello_from_core_module_b,
    hello_from_utils,
};
use std::io::{self, Write};
use tracing::{debug, error, info};

/// Iteration count for the benchmark comparison
pub const BENCHMARK_ITERATIONS: i32 = 500_000;

/// Run against stdout with the default utils collaborator
pub fn run_app(cfg: &AppConfig) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_app_with(cfg, &mut out, PrintUtils, BENCHMARK_ITERATIONS);
}

/// Run with an explicit output sink, collaborator and iteration count.
///
/// Failures are logged rather than returned; the run always ends with
/// `Exiting run_app`.
pub fn run_app_with<W: Write, U: HelloUtils>(
    cfg: &AppConfig,
    out: &mut W,
    utils: U,
    iterations: i32,
) {
    info!("Running run_app");
    info!("config = {:?}", cfg);

    if let Err(e) = run_steps(out, utils, iterations) {
        error!("Unexpected error in application run: {}", e);
    }

    info!("Exiting run_app");
}

fn run_steps<W: Write, U: HelloUtils>(out: &mut W, utils: U, iterations: i32) -> io::Result<()> {
    let markers = [
        hello_from_core_module_a(),
        goodbye_from_core_module_a(),
        hello_from_core_module_b(),
        goodbye_from_core_module_b(),
    ];
    debug!(?markers, "core modules answered");
    hello_from_utils();

    ExtensionModule::new(&mut *out, utils).print_hello()?;

    info!("Benchmarks:");
    compare(iterations, out)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::LogCapture;
    use pymodule_core::GREETING;

    #[test]
    fn test_run_app_output_and_logs() {
        let capture = LogCapture::new();
        let mut out = Vec::new();
        let mut tags = Vec::new();

        tracing::subscriber::with_default(capture.subscriber(tracing::Level::INFO), || {
            run_app_with(
                &AppConfig::default(),
                &mut out,
                |tag: &str| tags.push(tag.to_string()),
                1_000,
            );
        });

        assert_eq!(tags, vec!["cmodulea"]);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], GREETING);
        assert!(lines[1].starts_with("Reference function executed in "));
        assert!(lines[2].starts_with("Benchmark with 1000 iterations took "));
        assert_eq!(lines[3], "Reference = 100.0%");
        assert!(lines[4].starts_with("Extension = "));

        let logs = capture.logs();
        for expected in [
            "Running run_app",
            "Hello from core_module_a",
            "Goodbye from core_module_a",
            "Hello from core_module_b",
            "Goodbye from core_module_b",
            "Hello from utils",
            "Benchmarks:",
            "Exiting run_app",
        ] {
            assert!(logs.contains(expected), "missing log line: {}", expected);
        }
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_run_app_logs_output_failure() {
        let capture = LogCapture::new();
        tracing::subscriber::with_default(capture.subscriber(tracing::Level::INFO), || {
            run_app_with(&AppConfig::default(), &mut FailingWriter, |_: &str| {}, 10);
        });

        let logs = capture.logs();
        assert!(logs.contains("Unexpected error in application run: closed"));
        assert!(logs.contains("Exiting run_app"));
    }
}
